use crate::error::NavError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index into the document's node arena.
pub type NodeId = usize;

/// A single element in the in-memory document tree.
///
/// Carries just enough layout information for offset arithmetic:
/// `local_top` is the vertical offset within the parent, `height` the
/// vertical extent of the element itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub style: Vec<(String, String)>,
    pub local_top: f64,
    pub height: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn elem(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.style.push((property.to_string(), value.to_string()));
        self
    }

    pub fn with_top(mut self, local_top: f64) -> Self {
        self.local_top = local_top;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

/// Tiny CSS-like selector: a tag name, `#id`, `.class`, or a compound of
/// those (`h2.chapter`, `section#intro`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, NavError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(NavError::BadSelector {
                input: input.to_string(),
            });
        }

        let mut selector = Selector::default();
        let mut rest = input;

        // Leading bare word is a tag name
        if !rest.starts_with(['#', '.']) {
            let end = rest.find(['#', '.']).unwrap_or(rest.len());
            selector.tag = Some(rest[..end].to_string());
            rest = &rest[end..];
        }

        while !rest.is_empty() {
            let marker = rest
                .chars()
                .next()
                .filter(|c| *c == '#' || *c == '.')
                .ok_or_else(|| NavError::BadSelector {
                    input: input.to_string(),
                })?;
            rest = &rest[1..];
            let end = rest.find(['#', '.']).unwrap_or(rest.len());
            let name = &rest[..end];
            if name.is_empty() {
                return Err(NavError::BadSelector {
                    input: input.to_string(),
                });
            }
            match marker {
                '#' => selector.id = Some(name.to_string()),
                _ => selector.classes.push(name.to_string()),
            }
            rest = &rest[end..];
        }

        Ok(selector)
    }

    pub fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if !node.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|c| node.classes.iter().any(|nc| nc == c))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// An in-memory document tree rooted at a `body` node.
///
/// Stands in for the real DOM so the heading index and scroll tracker can
/// be exercised without a browser.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::elem("body")],
        }
    }

    pub fn body(&self) -> NodeId {
        0
    }

    pub fn add(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            parent: Some(parent),
            ..node
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// All descendants of `scope` matching `selector`, in document order.
    /// The scope node itself is not a candidate.
    pub fn query(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut matches = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[scope].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if selector.matches(&self.nodes[id]) {
                matches.push(id);
            }
            stack.extend(self.nodes[id].children.iter().rev());
        }
        matches
    }

    pub fn query_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.nodes[scope].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if selector.matches(&self.nodes[id]) {
                return Some(id);
            }
            stack.extend(self.nodes[id].children.iter().rev());
        }
        None
    }

    /// Vertical offset of the node from the top of the document: walk back
    /// up the tree summing local offsets until we reach the top.
    pub fn offset(&self, id: NodeId) -> f64 {
        let mut offset = 0.0;
        let mut current = Some(id);
        while let Some(node) = current {
            offset += self.nodes[node].local_top;
            current = self.nodes[node].parent;
        }
        offset
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id].classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.nodes[id].classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.nodes[id].classes.retain(|c| c != class);
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id]
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        &self.nodes[id].attributes
    }

    /// Reparent all children of `target` under a freshly inserted `wrapper`
    /// node, which becomes the sole child of `target`. Returns the wrapper.
    pub fn wrap_children(&mut self, target: NodeId, wrapper: Node) -> NodeId {
        let id = self.nodes.len();
        let children = std::mem::take(&mut self.nodes[target].children);
        self.nodes.push(Node {
            parent: Some(target),
            children: children.clone(),
            ..wrapper
        });
        for child in children {
            self.nodes[child].parent = Some(id);
        }
        self.nodes[target].children.push(id);
        id
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat, serializable description of a demo page: a lead banner followed
/// by a nav block and one content section per entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSpec {
    pub lead_height: f64,
    pub sections: Vec<SectionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionSpec {
    pub id: String,
    pub title: String,
    pub height: f64,
}

impl DocumentSpec {
    pub fn sample() -> Self {
        let sections = [
            ("introduction", "Introduction", 14.0),
            ("installation", "Installation", 10.0),
            ("usage", "Usage", 18.0),
            ("configuration", "Configuration", 16.0),
            ("api-reference", "API reference", 22.0),
            ("faq", "FAQ", 12.0),
        ];
        Self {
            lead_height: 6.0,
            sections: sections
                .iter()
                .map(|(id, title, height)| SectionSpec {
                    id: id.to_string(),
                    title: title.to_string(),
                    height: *height,
                })
                .collect(),
        }
    }

    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn total_height(&self) -> f64 {
        self.lead_height
            + self.nav_height()
            + self.sections.iter().map(|s| s.height).sum::<f64>()
    }

    fn nav_height(&self) -> f64 {
        self.sections.len() as f64 + 2.0
    }

    /// Document offset where the content sections begin.
    pub fn content_top(&self) -> f64 {
        self.lead_height + self.nav_height()
    }

    /// Materialize the spec as a document tree. Returns the document and
    /// the nav host node (the one carrying `data-component="in-page-nav"`).
    pub fn build(&self) -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();

        doc.add(
            body,
            Node::elem("header").with_top(0.0).with_height(self.lead_height),
        );

        let nav = doc.add(
            body,
            Node::elem("nav")
                .with_attr(crate::nav::COMPONENT_ATTR, crate::nav::COMPONENT_NAME)
                .with_top(self.lead_height)
                .with_height(self.nav_height()),
        );
        let list = doc.add(nav, Node::elem("ul").with_top(1.0));
        for (i, section) in self.sections.iter().enumerate() {
            doc.add(
                list,
                Node::elem("li")
                    .with_class(&format!("in-page-nav__item--{}", section.id))
                    .with_top(i as f64)
                    .with_height(1.0),
            );
        }

        let content = doc.add(
            body,
            Node::elem("main").with_top(self.lead_height + self.nav_height()),
        );
        let mut top = 0.0;
        for section in &self.sections {
            let el = doc.add(
                content,
                Node::elem("section")
                    .with_top(top)
                    .with_height(section.height),
            );
            doc.add(
                el,
                Node::elem("h2").with_id(&section.id).with_height(1.0),
            );
            doc.add(
                el,
                Node::elem("p")
                    .with_top(1.0)
                    .with_height(section.height - 1.0),
            );
            top += section.height;
        }

        (doc, nav)
    }
}
