use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use dowser_dom::{DomSnapshot, NodeId, PageTextIndex, TableGrid, Tag};
use dowser_path::{FindSpot, SearchPattern, WPath};

use crate::found::FoundType;

/// One raw strategy hit before it becomes a ranked entry.
#[derive(Debug, Clone)]
pub struct MatchHit {
    pub element: NodeId,
    pub found_type: FoundType,
    pub deviation: usize,
    pub distance: usize,
    pub start: usize,
    pub index: usize,
    pub via_label: Option<NodeId>,
}

impl MatchHit {
    pub fn new(element: NodeId, found_type: FoundType, deviation: usize, frame: HitFrame) -> Self {
        Self {
            element,
            found_type,
            deviation,
            distance: frame.distance,
            start: frame.start,
            index: frame.index,
            via_label: None,
        }
    }

    pub fn via(mut self, label: NodeId) -> Self {
        self.via_label = Some(label);
        self
    }
}

/// Position facts shared by every strategy: distance to the path anchor,
/// span start and document index of the candidate.
#[derive(Debug, Clone, Copy)]
pub struct HitFrame {
    pub distance: usize,
    pub start: usize,
    pub index: usize,
}

/// One independent way of matching the target against a candidate element.
///
/// `match_element` runs per visible candidate and may yield several hits,
/// one per found type at most. `post_process` sees all of a strategy's hits
/// at once, after the candidate loop; strategies that must suppress
/// enclosing elements do it there.
pub trait ElementMatcher: Send + Sync {
    fn id(&self) -> &'static str;

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit>;

    fn post_process(&self, _ctx: &MatchContext<'_>, hits: Vec<MatchHit>) -> Vec<MatchHit> {
        hits
    }
}

/// Compiled `[column; row]` pair.
pub struct CoordPatterns {
    pub col: SearchPattern,
    pub row: SearchPattern,
}

/// Everything the strategies share while one search runs: the page, the
/// compiled patterns, the resolved path anchor and the lazy caches.
pub struct MatchContext<'a> {
    pub snapshot: &'a DomSnapshot,
    pub index: &'a PageTextIndex<'a>,
    target: Option<SearchPattern>,
    path: SearchPattern,
    path_spot: FindSpot,
    coords: Vec<CoordPatterns>,
    labels: OnceLock<Vec<NodeId>>,
    grids: Mutex<HashMap<NodeId, Arc<TableGrid>>>,
}

impl<'a> MatchContext<'a> {
    /// Compiles the path and returns `None` when the page does not contain
    /// it; a search with an absent path context has no candidates at all.
    pub fn new(
        snapshot: &'a DomSnapshot,
        index: &'a PageTextIndex<'a>,
        wpath: &WPath,
    ) -> Option<Self> {
        let path = SearchPattern::from_tokens(wpath.path_tokens());
        let path_spot = index.first_occurrence(&path)?;
        let target = wpath.target().map(SearchPattern::from_token);
        let coords = wpath
            .coord_specs()
            .iter()
            .map(|spec| CoordPatterns {
                col: SearchPattern::from_token(&spec.col),
                row: SearchPattern::from_token(&spec.row),
            })
            .collect();
        Some(Self {
            snapshot,
            index,
            target,
            path,
            path_spot,
            coords,
            labels: OnceLock::new(),
            grids: Mutex::new(HashMap::new()),
        })
    }

    pub fn target(&self) -> Option<&SearchPattern> {
        self.target.as_ref()
    }

    pub fn path(&self) -> &SearchPattern {
        &self.path
    }

    /// Where the path context sits in the canonical text. Candidates must
    /// start at or after its end.
    pub fn path_spot(&self) -> FindSpot {
        self.path_spot
    }

    pub fn has_coords(&self) -> bool {
        !self.coords.is_empty()
    }

    /// Coordinate pairs outermost first, as written.
    pub fn coords(&self) -> &[CoordPatterns] {
        &self.coords
    }

    /// Distance, start and index for a candidate, or `None` when the
    /// candidate is invisible or sits before the path anchor.
    pub fn frame(&self, element: NodeId) -> Option<HitFrame> {
        let pos = self.index.position(element)?;
        if self.path_spot.end > pos.start {
            return None;
        }
        let before = self.index.text_before(element)?;
        let distance = self.path.chars_after_last_occurrence(&before)?;
        let index = self.index.index_of(element)?;
        Some(HitFrame { distance, start: pos.start, index })
    }

    /// All visible label elements, collected once per search.
    pub fn labels(&self) -> &[NodeId] {
        self.labels.get_or_init(|| {
            self.index
                .all_visible_elements()
                .iter()
                .copied()
                .filter(|&id| self.snapshot.tag(id) == Some(&Tag::Label))
                .collect()
        })
    }

    /// Occupancy grid for a table, built once per search.
    pub fn grid(&self, table: NodeId) -> Arc<TableGrid> {
        let mut grids = match self.grids.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        grids
            .entry(table)
            .or_insert_with(|| Arc::new(TableGrid::build(self.snapshot, table)))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dowser_dom::PageBuilder;
    use dowser_path::SecretString;

    fn wpath(tokens: &[&str]) -> WPath {
        let tokens: Vec<SecretString> = tokens.iter().map(|t| SecretString::new(*t)).collect();
        WPath::parse(&tokens).unwrap()
    }

    #[test]
    fn context_resolves_the_path_anchor() {
        let page = PageBuilder::new()
            .text("SectionOne and more")
            .open("input").close()
            .finish();
        let index = PageTextIndex::build(&page);
        let ctx = MatchContext::new(&page, &index, &wpath(&["SectionOne", "x"])).unwrap();
        assert_eq!(ctx.path_spot(), FindSpot::new(0, 10));
        assert_eq!(ctx.target().unwrap().source().as_str(), "x");
    }

    #[test]
    fn absent_path_context_yields_no_context() {
        let page = PageBuilder::new().text("nothing here").finish();
        let index = PageTextIndex::build(&page);
        assert!(MatchContext::new(&page, &index, &wpath(&["Missing", "x"])).is_none());
    }

    #[test]
    fn empty_path_anchors_at_the_page_start() {
        let page = PageBuilder::new().text("abc").finish();
        let index = PageTextIndex::build(&page);
        let ctx = MatchContext::new(&page, &index, &wpath(&["x"])).unwrap();
        assert_eq!(ctx.path_spot(), FindSpot::new(0, 0));
    }

    #[test]
    fn frame_rejects_candidates_before_the_anchor() {
        let page = PageBuilder::new()
            .open("input").attr("id", "early").close()
            .text("Marker")
            .open("input").attr("id", "late").close()
            .finish();
        let index = PageTextIndex::build(&page);
        let body = page.root();
        let early = page.children(body)[0];
        let late = page.children(body)[2];
        let ctx = MatchContext::new(&page, &index, &wpath(&["Marker", "x"])).unwrap();
        assert!(ctx.frame(early).is_none());
        let frame = ctx.frame(late).unwrap();
        assert_eq!(frame.distance, 0);
        assert_eq!(frame.index, 2);
    }

    #[test]
    fn labels_are_cached_per_search() {
        let page = PageBuilder::new()
            .open("label").text("a").close()
            .open("label").text("b").close()
            .open("div").close()
            .finish();
        let index = PageTextIndex::build(&page);
        let ctx = MatchContext::new(&page, &index, &wpath(&["x"])).unwrap();
        assert_eq!(ctx.labels().len(), 2);
        assert_eq!(ctx.labels().len(), 2);
    }
}
