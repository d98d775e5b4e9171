//! In-memory element tree
//!
//! Arena of elements rooted at a `body` node. Detached elements stay in the
//! arena so they can be re-attached later (the loading spinners rely on this).
//! Subtrees removed with [`Dom::remove_children`] free their slots, and later
//! elements reuse them.

use std::collections::HashMap;
use std::fmt::Write;

use super::{Dom, NodeId};

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn matches(&self, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Id(id) => self.attribute("id") == Some(*id),
            Selector::Class(class) => self.has_class(class),
            Selector::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
        }
    }
}

enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let s = s.trim();
        if let Some(id) = s.strip_prefix('#') {
            (!id.is_empty()).then_some(Selector::Id(id))
        } else if let Some(class) = s.strip_prefix('.') {
            (!class.is_empty()).then_some(Selector::Class(class))
        } else if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(Selector::Tag(s))
        } else {
            None
        }
    }
}

/// Arena-backed [`Dom`] implementation
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    free: Vec<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only its `body` root
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            free: Vec::new(),
        }
    }

    /// Number of live elements, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// True if only the root remains
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// Slots allocated by the arena, live or free
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// The root element
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    /// Free `node` and all of its descendants
    fn release(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if id == self.body() {
                continue;
            }
            if let Some(e) = self.nodes.get_mut(id.0).and_then(Option::take) {
                stack.extend(e.children);
                self.free.push(id.0);
            }
        }
    }

    /// True if `node` is reachable from the root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body() {
                return true;
            }
            current = self.get(id).and_then(|e| e.parent);
        }
        false
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|e| e.parent);
        }
        false
    }

    fn detach(&mut self, node: NodeId) {
        let parent = match self.get(node).and_then(|e| e.parent) {
            Some(p) => p,
            None => return,
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(e) = self.get_mut(node) {
            e.parent = None;
        }
    }

    /// Concatenated text of `node` and its descendants, in document order
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(e) = self.get(node) {
            if let Some(text) = &e.text {
                out.push_str(text);
            }
            for child in &e.children {
                self.collect_text(*child, out);
            }
        }
    }

    /// Serialize the tree to HTML
    ///
    /// Every element carries a `data-node` attribute so a browser event can be
    /// mapped back to its [`NodeId`]. `raw` injects pre-rendered markup (for
    /// example an SVG chart) as the trusted content of the given elements.
    pub fn to_html(&self, raw: &HashMap<NodeId, String>) -> String {
        let mut out = String::new();
        self.write_node(self.body(), raw, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, raw: &HashMap<NodeId, String>, out: &mut String) {
        let Some(e) = self.get(node) else {
            return;
        };

        let _ = write!(out, "<{} data-node=\"{}\"", e.tag, node);
        for (name, value) in &e.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
        }
        out.push('>');

        if let Some(text) = &e.text {
            out.push_str(&escape_html(text));
        }
        for child in &e.children {
            self.write_node(*child, raw, out);
        }
        if let Some(markup) = raw.get(&node) {
            out.push_str(markup);
        }

        let _ = write!(out, "</{}>", e.tag);
    }
}

impl Dom for Document {
    fn create_element(&mut self, tag: &str) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(Element::new(tag));
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(Element::new(tag)));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || child == self.body() {
            return;
        }
        // Refuse to create a cycle
        if self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(e) = self.get_mut(child) {
            e.parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.get(child).and_then(|e| e.parent) != Some(parent) {
            return false;
        }
        self.detach(child);
        true
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = match self.get_mut(node) {
            Some(e) => std::mem::take(&mut e.children),
            None => return,
        };
        for child in children {
            if let Some(e) = self.get_mut(child) {
                e.parent = None;
            }
        }
    }

    fn remove_children(&mut self, node: NodeId) {
        let children = match self.get_mut(node) {
            Some(e) => std::mem::take(&mut e.children),
            None => return,
        };
        for child in children {
            self.release(child);
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.get_mut(node) {
            match e.attributes.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => e.attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|e| e.attribute(name))
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(e) = self.get_mut(node) {
            e.text = Some(text.to_string());
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).and_then(|e| e.text.as_deref())
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|e| e.tag.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|e| e.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;

        // Depth-first, pre-order walk from the root
        let mut stack = vec![self.body()];
        while let Some(id) = stack.pop() {
            let e = self.get(id)?;
            if e.matches(&selector) {
                return Some(id);
            }
            stack.extend(e.children.iter().rev().copied());
        }
        None
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
