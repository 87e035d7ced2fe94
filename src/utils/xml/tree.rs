//! Owned HTML node tree built from the quick-xml event stream.
//!
//! The parser is permissive: void elements never take children, end tags
//! close the nearest open element with the same name (implicitly closing
//! anything opened after it), and unmatched end tags are kept verbatim.
//! Start tags keep their original bytes, so untouched markup serializes
//! back exactly as it was read.

use anyhow::{Context, Result};
use quick_xml::{
    escape::resolve_predefined_entity,
    events::{BytesEnd, BytesStart, Event},
};
use std::io::Cursor;

use super::common::{XmlWriter, create_xml_reader, is_void_element, with_attr};

/// Position of a node: child indices from the document root downwards.
pub type NodePath = Vec<usize>;

/// How an element was terminated in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    /// `<p>...</p>`
    Explicit,
    /// Closed by an enclosing end tag or end of input.
    Implicit,
    /// `<img ...>`
    Void,
    /// `<img ... />`
    SelfClosing,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub start: BytesStart<'static>,
    pub closing: Closing,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    /// Text, comments, doctype, references and stray end tags.
    Other(Event<'static>),
}

/// A single mutation of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEdit {
    SetAttr {
        path: NodePath,
        key: String,
        value: String,
    },
    Rename {
        path: NodePath,
        tag: String,
    },
    Remove {
        path: NodePath,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Element {
    fn open(start: BytesStart<'static>, closing: Closing) -> Self {
        Self {
            start,
            closing,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.start.name().as_ref().eq_ignore_ascii_case(tag.as_bytes())
    }

    /// Concatenated text of all descendants, entities resolved where known.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(elem) => collect_text(&elem.children, out),
            Node::Other(Event::Text(text)) => out.push_str(&String::from_utf8_lossy(text)),
            Node::Other(Event::CData(cdata)) => out.push_str(&String::from_utf8_lossy(cdata)),
            Node::Other(Event::GeneralRef(reference)) => match reference.resolve_char_ref() {
                Ok(Some(ch)) => out.push(ch),
                _ => {
                    let name = String::from_utf8_lossy(reference);
                    match resolve_predefined_entity(&name) {
                        Some(resolved) => out.push_str(resolved),
                        None if name == "nbsp" => out.push('\u{a0}'),
                        None => {
                            out.push('&');
                            out.push_str(&name);
                            out.push(';');
                        }
                    }
                }
            },
            Node::Other(_) => {}
        }
    }
}

impl Document {
    /// Parse HTML bytes into an owned tree.
    pub fn parse(content: &[u8]) -> Result<Self> {
        let mut reader = create_xml_reader(content);
        let mut roots: Vec<Node> = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            let event = reader
                .read_event()
                .with_context(|| format!("malformed markup near byte {}", reader.buffer_position()))?;
            match event {
                Event::Start(start) => {
                    let start = start.into_owned();
                    if is_void_element(start.name().as_ref()) {
                        let elem = Element::open(start, Closing::Void);
                        push(&mut stack, &mut roots, Node::Element(elem));
                    } else {
                        stack.push(Element::open(start, Closing::Implicit));
                    }
                }
                Event::Empty(start) => {
                    let elem = Element::open(start.into_owned(), Closing::SelfClosing);
                    push(&mut stack, &mut roots, Node::Element(elem));
                }
                Event::End(end) => {
                    let name = end.name();
                    let open = stack.iter().rposition(|elem| {
                        elem.start.name().as_ref().eq_ignore_ascii_case(name.as_ref())
                    });
                    match open {
                        Some(pos) => {
                            while stack.len() > pos + 1 {
                                close_top(&mut stack, &mut roots, Closing::Implicit);
                            }
                            close_top(&mut stack, &mut roots, Closing::Explicit);
                        }
                        None => {
                            let stray = Node::Other(Event::End(end.into_owned()));
                            push(&mut stack, &mut roots, stray);
                        }
                    }
                }
                Event::Eof => break,
                other => push(&mut stack, &mut roots, Node::Other(other.into_owned())),
            }
        }

        while !stack.is_empty() {
            close_top(&mut stack, &mut roots, Closing::Implicit);
        }

        Ok(Self { nodes: roots })
    }

    /// Serialize the tree back to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = XmlWriter::new(Cursor::new(Vec::new()));
        write_nodes(&self.nodes, &mut writer)?;
        Ok(writer.into_inner().into_inner())
    }

    pub fn get(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get(*first)?;
        for index in rest {
            match node {
                Node::Element(elem) => node = elem.children.get(*index)?,
                Node::Other(_) => return None,
            }
        }
        Some(node)
    }

    pub fn element(&self, path: &[usize]) -> Option<&Element> {
        match self.get(path)? {
            Node::Element(elem) => Some(elem),
            Node::Other(_) => None,
        }
    }

    fn element_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get_mut(*first)?;
        for index in rest {
            match node {
                Node::Element(elem) => node = elem.children.get_mut(*index)?,
                Node::Other(_) => return None,
            }
        }
        match node {
            Node::Element(elem) => Some(elem),
            Node::Other(_) => None,
        }
    }

    /// Visit every element depth-first in document order.
    ///
    /// Returning `false` from the visitor skips that element's subtree.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&NodePath, &Element) -> bool,
    {
        let mut path = Vec::new();
        walk_nodes(&self.nodes, &mut path, &mut visit);
    }

    /// Paths of all elements matching `pred`, outermost match only.
    pub fn find_all<F>(&self, mut pred: F) -> Vec<NodePath>
    where
        F: FnMut(&Element) -> bool,
    {
        let mut found = Vec::new();
        self.walk(|path, elem| {
            if pred(elem) {
                found.push(path.clone());
                false
            } else {
                true
            }
        });
        found
    }

    /// Apply edits, returning how many took effect.
    ///
    /// Attribute and rename edits run first, then removals deepest-last-first
    /// so earlier paths stay valid. Edits pointing below a removed node or at
    /// a missing node are dropped.
    pub fn apply(&mut self, edits: Vec<TreeEdit>) -> usize {
        let mut applied = 0;
        let mut removals = Vec::new();

        for edit in edits {
            match edit {
                TreeEdit::SetAttr { path, key, value } => {
                    if let Some(elem) = self.element_mut(&path) {
                        elem.start = with_attr(&elem.start, &key, &value);
                        applied += 1;
                    }
                }
                TreeEdit::Rename { path, tag } => {
                    if let Some(elem) = self.element_mut(&path) {
                        elem.start.set_name(tag.as_bytes());
                        applied += 1;
                    }
                }
                TreeEdit::Remove { path } => removals.push(path),
            }
        }

        removals.sort();
        removals.dedup();
        removals.reverse();
        let mut removed: Vec<NodePath> = Vec::new();
        for path in removals {
            if removed.iter().any(|done| path.starts_with(done)) {
                continue;
            }
            if self.remove(&path) {
                applied += 1;
                removed.push(path);
            }
        }
        applied
    }

    fn remove(&mut self, path: &[usize]) -> bool {
        let Some((last, parent)) = path.split_last() else {
            return false;
        };
        let siblings = if parent.is_empty() {
            &mut self.nodes
        } else {
            match self.element_mut(parent) {
                Some(elem) => &mut elem.children,
                None => return false,
            }
        };
        if *last < siblings.len() {
            siblings.remove(*last);
            true
        } else {
            false
        }
    }
}

fn push(stack: &mut [Element], roots: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn close_top(stack: &mut Vec<Element>, roots: &mut Vec<Node>, closing: Closing) {
    if let Some(mut elem) = stack.pop() {
        elem.closing = closing;
        push(stack, roots, Node::Element(elem));
    }
}

fn walk_nodes<F>(nodes: &[Node], path: &mut NodePath, visit: &mut F)
where
    F: FnMut(&NodePath, &Element) -> bool,
{
    for (index, node) in nodes.iter().enumerate() {
        if let Node::Element(elem) = node {
            path.push(index);
            if visit(path, elem) {
                walk_nodes(&elem.children, path, visit);
            }
            path.pop();
        }
    }
}

fn write_nodes(nodes: &[Node], writer: &mut XmlWriter) -> Result<()> {
    for node in nodes {
        match node {
            Node::Element(elem) => {
                match elem.closing {
                    Closing::SelfClosing => writer.write_event(Event::Empty(elem.start.borrow()))?,
                    _ => writer.write_event(Event::Start(elem.start.borrow()))?,
                }
                write_nodes(&elem.children, writer)?;
                if elem.closing == Closing::Explicit {
                    let name = String::from_utf8_lossy(elem.start.name().as_ref()).into_owned();
                    writer.write_event(Event::End(BytesEnd::new(name)))?;
                }
            }
            Node::Other(event) => writer.write_event(event.borrow())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(html: &str) -> String {
        let doc = Document::parse(html.as_bytes()).unwrap();
        String::from_utf8(doc.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_roundtrip_preserves_markup() {
        let html = r#"<html><body><p class="x">Hello <b>there</b></p><img src="a.png"><br/></body></html>"#;
        assert_eq!(roundtrip(html), html);
    }

    #[test]
    fn test_void_elements_take_no_children() {
        let doc = Document::parse(br#"<p><img src="a.png">text</p>"#).unwrap();
        let p = doc.element(&[0]).unwrap();
        assert_eq!(p.children.len(), 2);
        let img = doc.element(&[0, 0]).unwrap();
        assert_eq!(img.closing, Closing::Void);
        assert!(img.children.is_empty());
    }

    #[test]
    fn test_unclosed_elements_close_implicitly() {
        let html = "<ul><li>one<li>two</ul>";
        let doc = Document::parse(html.as_bytes()).unwrap();
        let ul = doc.element(&[0]).unwrap();
        assert_eq!(ul.closing, Closing::Explicit);
        assert_eq!(roundtrip(html), html);
    }

    #[test]
    fn test_stray_end_tag_kept() {
        let html = "<div>a</span></div>";
        assert_eq!(roundtrip(html), html);
    }

    #[test]
    fn test_text_content() {
        let doc = Document::parse(b"<h2 id=\"topics\"> <em>Top</em>ics &amp; more</h2>").unwrap();
        assert_eq!(doc.element(&[0]).unwrap().text(), " Topics & more");
    }

    #[test]
    fn test_find_all_outermost_only() {
        let html = r#"<div><span class="c"><span class="c">x</span></span><span class="c">y</span></div>"#;
        let doc = Document::parse(html.as_bytes()).unwrap();
        let found = doc.find_all(|e| e.is("span"));
        assert_eq!(found, vec![vec![0, 0], vec![0, 1]]);
    }

    #[test]
    fn test_apply_edits() {
        let html = r#"<div><h3 id="a">A</h3><p>x</p><a href="old.html">l</a></div>"#;
        let mut doc = Document::parse(html.as_bytes()).unwrap();
        let applied = doc.apply(vec![
            TreeEdit::Rename {
                path: vec![0, 0],
                tag: "h2".into(),
            },
            TreeEdit::Remove { path: vec![0, 1] },
            TreeEdit::SetAttr {
                path: vec![0, 2],
                key: "href".into(),
                value: "new.html".into(),
            },
        ]);
        assert_eq!(applied, 3);
        let out = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert_eq!(out, r#"<div><h2 id="a">A</h2><a href="new.html">l</a></div>"#);
    }

    #[test]
    fn test_apply_skips_nested_removal() {
        let mut doc = Document::parse(b"<div><span><span>x</span></span></div>").unwrap();
        let applied = doc.apply(vec![
            TreeEdit::Remove { path: vec![0, 0] },
            TreeEdit::Remove {
                path: vec![0, 0, 0],
            },
        ]);
        assert_eq!(applied, 1);
        assert_eq!(String::from_utf8(doc.to_bytes().unwrap()).unwrap(), "<div></div>");
    }
}
