use std::collections::HashMap;

use tracing::{debug, info_span};

use dowser_path::{FindSpot, SearchPattern};

use crate::element::ControlKind;
use crate::snapshot::{DomSnapshot, NodeData, NodeId};

/// Canonical text of one page plus the position of every visible element in
/// it.
///
/// The canonical text is what a user reads off the screen: inline content
/// glues together, block elements and form controls force word boundaries,
/// whitespace runs collapse to a single space, non-breaking spaces count as
/// whitespace. Rendered attribute text joins in where the screen shows it:
/// the value of text inputs and buttons, the alt text of images. Hidden
/// subtrees, hidden inputs and head-only tags contribute nothing and get no
/// position.
///
/// Element spans are half-open character ranges. The span starts at the
/// element's first visible character, before any separator space, so the
/// text before an element never ends in a separator. Elements without own
/// text get an empty span at the position they occupy.
pub struct PageTextIndex<'a> {
    snapshot: &'a DomSnapshot,
    text: String,
    chars: Vec<char>,
    spots: HashMap<NodeId, FindSpot>,
    order: Vec<NodeId>,
    indexes: HashMap<NodeId, usize>,
}

struct OpenSpan {
    id: NodeId,
    start: Option<usize>,
}

struct IndexBuilder<'a> {
    snapshot: &'a DomSnapshot,
    out: Vec<char>,
    pending_space: bool,
    open: Vec<OpenSpan>,
    spots: HashMap<NodeId, FindSpot>,
    order: Vec<NodeId>,
    indexes: HashMap<NodeId, usize>,
}

impl<'a> IndexBuilder<'a> {
    fn new(snapshot: &'a DomSnapshot) -> Self {
        Self {
            snapshot,
            out: Vec::new(),
            pending_space: false,
            open: Vec::new(),
            spots: HashMap::new(),
            order: Vec::new(),
            indexes: HashMap::new(),
        }
    }

    fn push_visible_text(&mut self, raw: &str) {
        for ch in raw.chars() {
            let ch = if ch == '\u{a0}' { ' ' } else { ch };
            if ch.is_whitespace() {
                if !self.out.is_empty() {
                    self.pending_space = true;
                }
                continue;
            }
            // span starts pin before the separator, so text_before never
            // carries a trailing space
            let pin = self.out.len();
            for open in self.open.iter_mut() {
                if open.start.is_none() {
                    open.start = Some(pin);
                }
            }
            if self.pending_space && !self.out.is_empty() {
                self.out.push(' ');
            }
            self.pending_space = false;
            self.out.push(ch);
        }
    }

    fn walk(&mut self, id: NodeId) {
        let snapshot = self.snapshot;
        match &snapshot.node(id).data {
            NodeData::Text(text) => self.push_visible_text(text),
            NodeData::Element(el) => {
                if !el.visible
                    || el.tag.never_rendered()
                    || el.kind == Some(ControlKind::HiddenInput)
                {
                    return;
                }
                self.order.push(id);
                self.indexes.insert(id, self.order.len() - 1);
                self.open.push(OpenSpan { id, start: None });
                let boundary = el.tag.is_word_boundary() || el.kind.is_some();
                if boundary {
                    self.pending_space = true;
                }
                let rendered_attr = match el.kind {
                    Some(ControlKind::TextInput)
                    | Some(ControlKind::SubmitInput)
                    | Some(ControlKind::ResetInput)
                    | Some(ControlKind::ButtonInput) => el.attr("value"),
                    Some(ControlKind::Image) | Some(ControlKind::ImageInput) => el.attr("alt"),
                    _ => None,
                };
                if let Some(text) = rendered_attr {
                    self.push_visible_text(text);
                }
                for &child in snapshot.children(id) {
                    self.walk(child);
                }
                if let Some(entry) = self.open.pop() {
                    let spot = match entry.start {
                        Some(start) => FindSpot::new(start, self.out.len()),
                        None => FindSpot::new(self.out.len(), self.out.len()),
                    };
                    self.spots.insert(entry.id, spot);
                }
                if boundary {
                    self.pending_space = true;
                }
            }
        }
    }
}

impl<'a> PageTextIndex<'a> {
    pub fn build(snapshot: &'a DomSnapshot) -> Self {
        let span = info_span!("page_index_build");
        let _enter = span.enter();
        let mut builder = IndexBuilder::new(snapshot);
        builder.walk(snapshot.root());
        debug!(
            elements = builder.order.len(),
            chars = builder.out.len(),
            "page text index built"
        );
        Self {
            snapshot,
            text: builder.out.iter().collect(),
            chars: builder.out,
            spots: builder.spots,
            order: builder.order,
            indexes: builder.indexes,
        }
    }

    /// The canonical page text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Visible elements in document order.
    pub fn all_visible_elements(&self) -> &[NodeId] {
        &self.order
    }

    /// Position of the element in the visible document order.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.indexes.get(&id).copied()
    }

    /// Character span of the element, `None` for invisible elements.
    pub fn position(&self, id: NodeId) -> Option<FindSpot> {
        self.spots.get(&id).copied()
    }

    /// Canonical text strictly before the element. Never ends in a
    /// separator space.
    pub fn text_before(&self, id: NodeId) -> Option<String> {
        let pos = self.position(id)?;
        Some(self.chars[..pos.start].iter().collect())
    }

    /// The element's own rendered text, trimmed.
    pub fn text_of(&self, id: NodeId) -> Option<String> {
        let pos = self.position(id)?;
        let slice: String = self.chars[pos.start..pos.end].iter().collect();
        Some(slice.trim().to_string())
    }

    /// The element's text with one nested subtree cut out, whitespace
    /// normalized. Used for wrapping labels that contain the control they
    /// label.
    pub fn text_without(&self, id: NodeId, excluded: NodeId) -> Option<String> {
        let outer = self.position(id)?;
        let Some(inner) = self.position(excluded) else {
            return self.text_of(id);
        };
        if inner.start < outer.start || inner.end > outer.end {
            return self.text_of(id);
        }
        let head: String = self.chars[outer.start..inner.start].iter().collect();
        let tail: String = self.chars[inner.end..outer.end].iter().collect();
        let joined = format!("{head} {tail}");
        Some(joined.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Leftmost-longest occurrence of the pattern in the canonical text.
    pub fn first_occurrence(&self, pattern: &SearchPattern) -> Option<FindSpot> {
        pattern.first_occurrence_in(&self.text)
    }

    /// Text that labels the element from the left: everything between the
    /// end of the previous form control (or the enclosing cell's start) and
    /// the element.
    pub fn labeling_text_before(&self, id: NodeId) -> Option<String> {
        let pos = self.position(id)?;
        let my_index = self.index_of(id)?;
        let mut lower = 0;
        if let Some(cell) = self.snapshot.parent(id).and_then(|p| self.snapshot.nearest_cell(p)) {
            if let Some(cp) = self.position(cell) {
                lower = cp.start;
            }
        }
        for (other_index, &other) in self.order.iter().enumerate() {
            if other == id || self.snapshot.kind(other).is_none() {
                continue;
            }
            if self.snapshot.is_strict_ancestor(other, id) {
                continue;
            }
            let Some(op) = self.position(other) else { continue };
            if op.end <= pos.start && other_index < my_index && op.end > lower {
                lower = op.end;
            }
        }
        let slice: String = self.chars[lower..pos.start].iter().collect();
        Some(slice.trim().to_string())
    }

    /// Text that labels the element from the right, bounded by the next form
    /// control and the enclosing cell's end.
    pub fn labeling_text_after(&self, id: NodeId) -> Option<String> {
        let pos = self.position(id)?;
        let my_index = self.index_of(id)?;
        let mut upper = self.chars.len();
        if let Some(cell) = self.snapshot.parent(id).and_then(|p| self.snapshot.nearest_cell(p)) {
            if let Some(cp) = self.position(cell) {
                upper = cp.end;
            }
        }
        for (other_index, &other) in self.order.iter().enumerate() {
            if other == id || self.snapshot.kind(other).is_none() {
                continue;
            }
            if self.snapshot.is_strict_ancestor(other, id) {
                continue;
            }
            let Some(op) = self.position(other) else { continue };
            if op.start >= pos.end && other_index > my_index && op.start < upper {
                upper = op.start;
            }
        }
        let slice: String = self.chars[pos.end..upper].iter().collect();
        Some(slice.trim().to_string())
    }
}
