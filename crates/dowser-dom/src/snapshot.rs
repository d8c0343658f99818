use tracing::warn;

use crate::element::{ControlKind, Tag};

/// Index into the snapshot arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug)]
pub struct Element {
    pub tag: Tag,
    attrs: Vec<(String, String)>,
    pub visible: bool,
    pub kind: Option<ControlKind>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).map(str::trim).filter(|v| !v.is_empty())
    }
}

#[derive(Debug)]
pub enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// Immutable arena of one rendered page. The root is an implicit `body`.
#[derive(Debug)]
pub struct DomSnapshot {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DomSnapshot {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id).data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&Tag> {
        self.element(id).map(|el| &el.tag)
    }

    pub fn kind(&self, id: NodeId) -> Option<ControlKind> {
        self.element(id).and_then(|el| el.kind)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn non_empty_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.non_empty_attr(name))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn is_strict_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        let mut cur = self.parent(of);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// The element itself if it is a cell, otherwise the nearest enclosing
    /// `td`/`th`.
    pub fn nearest_cell(&self, from: NodeId) -> Option<NodeId> {
        let mut cur = Some(from);
        while let Some(id) = cur {
            if self.tag(id).is_some_and(Tag::is_cell) {
                return Some(id);
            }
            cur = self.parent(id);
        }
        None
    }

    pub fn enclosing_table(&self, of: NodeId) -> Option<NodeId> {
        let mut cur = self.parent(of);
        while let Some(id) = cur {
            if self.tag(id).is_some_and(Tag::is_table) {
                return Some(id);
            }
            cur = self.parent(id);
        }
        None
    }

    pub fn enclosing_select(&self, of: NodeId) -> Option<NodeId> {
        let mut cur = self.parent(of);
        while let Some(id) = cur {
            if self.kind(id) == Some(ControlKind::Select) {
                return Some(id);
            }
            cur = self.parent(id);
        }
        None
    }

    /// Element descendants in document order, excluding `id` itself.
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(cur) = stack.pop() {
            if self.element(cur).is_some() {
                out.push(cur);
            }
            stack.extend(self.children(cur).iter().rev().copied());
        }
        out
    }

    /// Subtree text with collapsed whitespace, for descriptions. Invisible
    /// and never-rendered parts contribute nothing.
    pub fn raw_text(&self, id: NodeId) -> String {
        let mut parts: Vec<String> = Vec::new();
        self.collect_raw_text(id, &mut parts);
        let joined = parts.join(" ");
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_raw_text(&self, id: NodeId, out: &mut Vec<String>) {
        match &self.node(id).data {
            NodeData::Text(text) => out.push(text.clone()),
            NodeData::Element(el) => {
                if !el.visible || el.tag.never_rendered() {
                    return;
                }
                for &child in self.children(id) {
                    self.collect_raw_text(child, out);
                }
            }
        }
    }

    /// Human description of a control: kind name, caption, id and name
    /// attributes, and for options the select they belong to.
    pub fn describing_text(&self, id: NodeId) -> String {
        let Some(el) = self.element(id) else {
            return String::new();
        };
        let mut out = String::from(describing_name(el));
        if let Some(caption) = self.caption(id, el) {
            let caption = caption.trim().to_string();
            if !caption.is_empty() {
                out.push_str(&format!(" '{caption}'"));
            }
        }
        if let Some(idv) = el.non_empty_attr("id") {
            out.push_str(&format!(" (id='{idv}')"));
        }
        if let Some(name) = el.non_empty_attr("name") {
            out.push_str(&format!(" (name='{name}')"));
        }
        if matches!(el.kind, Some(ControlKind::SelectOption) | Some(ControlKind::OptionGroup)) {
            if let Some(select) = self.enclosing_select(id) {
                out.push_str(&format!(" part of [{}]", self.describing_text(select)));
            }
        }
        out
    }

    fn caption(&self, id: NodeId, el: &Element) -> Option<String> {
        match el.kind {
            Some(ControlKind::SubmitInput)
            | Some(ControlKind::ResetInput)
            | Some(ControlKind::ButtonInput) => el.attr("value").map(str::to_string),
            Some(ControlKind::Image) | Some(ControlKind::ImageInput) => {
                el.attr("alt").map(str::to_string)
            }
            Some(ControlKind::Anchor)
            | Some(ControlKind::Button)
            | Some(ControlKind::SelectOption) => Some(self.raw_text(id)),
            Some(ControlKind::OptionGroup) => el.attr("label").map(str::to_string),
            _ if el.tag == Tag::Label => Some(self.raw_text(id)),
            _ => None,
        }
    }
}

fn describing_name(el: &Element) -> String {
    if let Some(kind) = el.kind {
        return kind.describing_name().to_string();
    }
    match el.tag {
        Tag::Td => "HtmlTableCell".to_string(),
        Tag::Th => "HtmlTableHeader".to_string(),
        Tag::Tr => "HtmlTableRow".to_string(),
        ref tag => {
            let name = tag.as_str();
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => format!("Html{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "Html".to_string(),
            }
        }
    }
}

/// Builds a snapshot element by element. `open` pushes an element under the
/// innermost open one, `attr`, `text` and `hidden` apply to it, `close` pops
/// it. The root `body` is created up front and needs no close.
#[derive(Debug)]
pub struct PageBuilder {
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(Element {
                tag: Tag::Body,
                attrs: Vec::new(),
                visible: true,
                kind: None,
            }),
        };
        Self { nodes: vec![root], stack: vec![NodeId(0)] }
    }

    fn top(&self) -> NodeId {
        // the stack always keeps the root
        self.stack.last().copied().unwrap_or(NodeId(0))
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.top();
        self.nodes.push(Node { parent: Some(parent), children: Vec::new(), data });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn open(mut self, tag: &str) -> Self {
        let el = Element {
            tag: Tag::parse(tag),
            attrs: Vec::new(),
            visible: true,
            kind: None,
        };
        let id = self.push_node(NodeData::Element(el));
        self.stack.push(id);
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        let top = self.top();
        match &mut self.nodes[top.0].data {
            NodeData::Element(el) => el.attrs.push((name.to_string(), value.to_string())),
            NodeData::Text(_) => {}
        }
        self
    }

    /// Marks the innermost open element as not rendered.
    pub fn hidden(mut self) -> Self {
        let top = self.top();
        if let NodeData::Element(el) = &mut self.nodes[top.0].data {
            el.visible = false;
        }
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.push_node(NodeData::Text(text.to_string()));
        self
    }

    pub fn close(mut self) -> Self {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            warn!("close without a matching open, ignored");
        }
        self
    }

    pub fn finish(mut self) -> DomSnapshot {
        if self.stack.len() > 1 {
            warn!(open = self.stack.len() - 1, "unclosed elements at finish");
        }
        // control kinds need the final attributes, so they are derived here
        for node in &mut self.nodes {
            if let NodeData::Element(el) = &mut node.data {
                let ty = el.attr("type").map(str::to_string);
                el.kind = ControlKind::derive(&el.tag, ty.as_deref());
            }
        }
        DomSnapshot { nodes: self.nodes, root: NodeId(0) }
    }
}
