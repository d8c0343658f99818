use thiserror::Error;
use tracing::{debug, info_span};

use dowser_dom::{ControlKind, ControlTraits, DomSnapshot, NodeId, PageTextIndex};
use dowser_path::WPath;

use crate::found::FoundType;
use crate::list::{BackendControl, Entry, WeightedControlList};
use crate::matcher::{ElementMatcher, MatchContext};
use crate::resolver;

/// Which controls a search is after. Categories partition the visible
/// elements: a control belongs to the category its traits name, everything
/// without traits is plain page content for `Other` and `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCategory {
    Setable,
    Clickable,
    Selectable,
    Other,
    Text,
}

impl ControlCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlCategory::Setable => "setable",
            ControlCategory::Clickable => "clickable",
            ControlCategory::Selectable => "selectable",
            ControlCategory::Other => "other",
            ControlCategory::Text => "text",
        }
    }

    fn accepts(self, kind: Option<ControlKind>) -> bool {
        let traits = kind.map(ControlKind::traits).unwrap_or(ControlTraits::empty());
        match self {
            ControlCategory::Setable => traits.contains(ControlTraits::SETABLE),
            ControlCategory::Clickable => traits.contains(ControlTraits::CLICKABLE),
            ControlCategory::Selectable => traits.contains(ControlTraits::SELECTABLE),
            ControlCategory::Other | ControlCategory::Text => traits.is_empty(),
        }
    }
}

/// Strategy sets per category. Which strategies run is configuration, not
/// engine logic; the `dowser-matchers` crate provides the stock registry.
#[derive(Default)]
pub struct MatcherRegistry {
    pub setable: Vec<Box<dyn ElementMatcher>>,
    pub clickable: Vec<Box<dyn ElementMatcher>>,
    pub selectable: Vec<Box<dyn ElementMatcher>>,
    pub other: Vec<Box<dyn ElementMatcher>>,
    pub text: Vec<Box<dyn ElementMatcher>>,
    /// Runs alone when the path carries coordinates but no target.
    pub coordinate: Option<Box<dyn ElementMatcher>>,
}

impl MatcherRegistry {
    fn for_category(&self, category: ControlCategory) -> &[Box<dyn ElementMatcher>] {
        match category {
            ControlCategory::Setable => &self.setable,
            ControlCategory::Clickable => &self.clickable,
            ControlCategory::Selectable => &self.selectable,
            ControlCategory::Other => &self.other,
            ControlCategory::Text => &self.text,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FindError {
    #[error("the search path needs a target token or table coordinates")]
    MissingTarget,
}

/// Handle to one element of the snapshot. Identity is the node id; two
/// handles point at the same backend control exactly when the ids agree.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    snapshot: &'a DomSnapshot,
    pub id: NodeId,
}

impl BackendControl for ElementRef<'_> {
    fn has_same_backend_control(&self, other: &Self) -> bool {
        self.id == other.id
    }

    fn describing_text(&self) -> String {
        self.snapshot.describing_text(self.id)
    }
}

/// Entry point of a search: owns the text index and routes a parsed path
/// to the strategy set of the requested category.
pub struct ControlFinder<'a> {
    snapshot: &'a DomSnapshot,
    index: PageTextIndex<'a>,
    registry: MatcherRegistry,
}

impl<'a> ControlFinder<'a> {
    pub fn new(snapshot: &'a DomSnapshot, registry: MatcherRegistry) -> Self {
        let index = PageTextIndex::build(snapshot);
        Self { snapshot, index, registry }
    }

    pub fn index(&self) -> &PageTextIndex<'a> {
        &self.index
    }

    /// Fields a user can type into. An empty path is allowed here and
    /// returns the first visible setable control, so a bare "set" fills
    /// the first field of the page.
    pub fn find_setables(&self, wpath: &WPath) -> Result<WeightedControlList<ElementRef<'a>>, FindError> {
        if wpath.is_empty() {
            return Ok(self.first_visible_setable());
        }
        self.find(ControlCategory::Setable, wpath)
    }

    pub fn find_clickables(&self, wpath: &WPath) -> Result<WeightedControlList<ElementRef<'a>>, FindError> {
        self.find(ControlCategory::Clickable, wpath)
    }

    pub fn find_selectables(&self, wpath: &WPath) -> Result<WeightedControlList<ElementRef<'a>>, FindError> {
        self.find(ControlCategory::Selectable, wpath)
    }

    /// Non-control elements, addressed by id, name, text or coordinates.
    pub fn find_others(&self, wpath: &WPath) -> Result<WeightedControlList<ElementRef<'a>>, FindError> {
        self.find(ControlCategory::Other, wpath)
    }

    /// Plain text lookup over non-control elements.
    pub fn find_by_text(&self, wpath: &WPath) -> Result<WeightedControlList<ElementRef<'a>>, FindError> {
        self.find(ControlCategory::Text, wpath)
    }

    pub fn find(
        &self,
        category: ControlCategory,
        wpath: &WPath,
    ) -> Result<WeightedControlList<ElementRef<'a>>, FindError> {
        let span = info_span!(
            "find_controls",
            category = category.as_str(),
            path_tokens = wpath.path_tokens().len(),
            coords = wpath.coord_specs().len(),
            has_target = wpath.target().is_some(),
        );
        let _enter = span.enter();
        if wpath.target().is_none() && !wpath.has_coords() {
            return Err(FindError::MissingTarget);
        }
        let Some(ctx) = MatchContext::new(self.snapshot, &self.index, wpath) else {
            debug!("path context not found on the page");
            return Ok(WeightedControlList::new());
        };
        let matchers: &[Box<dyn ElementMatcher>] = if wpath.target().is_none() {
            match &self.registry.coordinate {
                Some(matcher) => std::slice::from_ref(matcher),
                None => &[],
            }
        } else {
            self.registry.for_category(category)
        };
        let mut buckets: Vec<Vec<_>> = matchers.iter().map(|_| Vec::new()).collect();
        for &element in self.index.all_visible_elements() {
            if !category.accepts(self.snapshot.kind(element)) {
                continue;
            }
            for (matcher, bucket) in matchers.iter().zip(buckets.iter_mut()) {
                bucket.extend(matcher.match_element(&ctx, element));
            }
        }
        let filter_coords = ctx.has_coords() && wpath.target().is_some();
        let mut list = WeightedControlList::new();
        for (matcher, mut bucket) in matchers.iter().zip(buckets) {
            if filter_coords {
                bucket.retain(|hit| resolver::element_in_coordinates(&ctx, hit.element));
            }
            let hits = matcher.post_process(&ctx, bucket);
            debug!(matcher = matcher.id(), hits = hits.len(), "strategy finished");
            for hit in hits {
                list.add(Entry {
                    control: self.control(hit.element),
                    found_type: hit.found_type,
                    deviation: hit.deviation,
                    distance: hit.distance,
                    start: hit.start,
                    index: hit.index,
                    via: hit.via_label.map(|label| self.control(label)),
                });
            }
        }
        debug!(entries = list.len(), "search finished");
        Ok(list)
    }

    fn first_visible_setable(&self) -> WeightedControlList<ElementRef<'a>> {
        let mut list = WeightedControlList::new();
        for &id in self.index.all_visible_elements() {
            if !ControlCategory::Setable.accepts(self.snapshot.kind(id)) {
                continue;
            }
            let (Some(pos), Some(index)) = (self.index.position(id), self.index.index_of(id))
            else {
                continue;
            };
            list.add(Entry {
                control: self.control(id),
                found_type: FoundType::ByText,
                deviation: 0,
                distance: 0,
                start: pos.start,
                index,
                via: None,
            });
            break;
        }
        list
    }

    fn control(&self, id: NodeId) -> ElementRef<'a> {
        ElementRef { snapshot: self.snapshot, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchHit;
    use dowser_dom::PageBuilder;
    use dowser_path::SecretString;

    fn wpath(tokens: &[&str]) -> WPath {
        let tokens: Vec<SecretString> = tokens.iter().map(|t| SecretString::new(*t)).collect();
        WPath::parse(&tokens).unwrap()
    }

    /// Hits every candidate whose id attribute equals the target source.
    struct IdEcho;

    impl ElementMatcher for IdEcho {
        fn id(&self) -> &'static str {
            "id_echo"
        }

        fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
            let Some(target) = ctx.target() else {
                return Vec::new();
            };
            let Some(frame) = ctx.frame(element) else {
                return Vec::new();
            };
            match ctx.snapshot.non_empty_attr(element, "id") {
                Some(id) if id == target.source().as_str() => {
                    vec![MatchHit::new(element, FoundType::ById, 0, frame)]
                }
                _ => Vec::new(),
            }
        }
    }

    fn registry() -> MatcherRegistry {
        MatcherRegistry { setable: vec![Box::new(IdEcho)], ..MatcherRegistry::default() }
    }

    #[test]
    fn missing_target_is_an_error_for_every_category() {
        let page = PageBuilder::new().open("input").close().finish();
        let finder = ControlFinder::new(&page, registry());
        assert_eq!(
            finder.find_clickables(&wpath(&[])).unwrap_err(),
            FindError::MissingTarget
        );
        assert_eq!(
            finder.find(ControlCategory::Setable, &WPath::default()).unwrap_err(),
            FindError::MissingTarget
        );
    }

    #[test]
    fn empty_path_returns_the_first_visible_setable() {
        let page = PageBuilder::new()
            .open("input").attr("type", "hidden").close()
            .open("input").attr("id", "first").close()
            .open("input").attr("id", "second").close()
            .finish();
        let finder = ControlFinder::new(&page, registry());
        let list = finder.find_setables(&wpath(&[])).unwrap();
        let entries = list.entries_sorted();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].found_type, FoundType::ByText);
        assert_eq!(entries[0].deviation, 0);
        assert_eq!(entries[0].distance, 0);
        let first = page.children(page.root())[1];
        assert_eq!(entries[0].control.id, first);
    }

    #[test]
    fn unmatched_path_context_returns_an_empty_list() {
        let page = PageBuilder::new().open("input").attr("id", "a").close().finish();
        let finder = ControlFinder::new(&page, registry());
        let list = finder.find_setables(&wpath(&["NoSuchSection", "a"])).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn categories_filter_the_candidates() {
        let page = PageBuilder::new()
            .open("input").attr("id", "x").close()
            .open("a").attr("id", "x").text("link").close()
            .finish();
        let finder = ControlFinder::new(&page, registry());
        // the registry only wires the setable category, and the anchor is
        // not setable
        let list = finder.find_setables(&wpath(&["x"])).unwrap();
        let entries = list.entries_sorted();
        assert_eq!(entries.len(), 1);
        let input = page.children(page.root())[0];
        assert_eq!(entries[0].control.id, input);
    }

    #[test]
    fn element_refs_compare_by_node_identity() {
        let page = PageBuilder::new().open("input").close().finish();
        let input = page.children(page.root())[0];
        let a = ElementRef { snapshot: &page, id: input };
        let b = ElementRef { snapshot: &page, id: input };
        let root = ElementRef { snapshot: &page, id: page.root() };
        assert!(a.has_same_backend_control(&b));
        assert!(!a.has_same_backend_control(&root));
    }
}
