//! Lossless markup tree for risk-scenario documents.
//!
//! The tree keeps every node the reader sees (declaration, comments,
//! whitespace, attributes as written) so that an unmodified document
//! serialises back to the same markup. Text is stored escaped, exactly as it
//! appeared, and unescaped only when read through [`Element::text`].
//!
//! Element lookup is by qualified tag name. A missing element is an ordinary
//! `None`, never an error.

use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::SpanError;

/// A node of the markup tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Element with its children
    Element(Element),
    /// Character data, escaped as written
    Text(String),
    /// `<![CDATA[...]]>` content
    CData(String),
    /// `<!--...-->` content
    Comment(String),
    /// `<?xml ...?>` declaration content
    Decl(String),
    /// `<?...?>` processing-instruction content
    ProcessingInstruction(String),
    /// `<!DOCTYPE ...>` content
    DocType(String),
}

/// An element and its subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    start: String,
    children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    fn from_start(start: &BytesStart<'_>, self_closing: bool) -> Result<Self, SpanError> {
        Ok(Self {
            name: utf8(start.name().as_ref())?.to_string(),
            start: utf8(start)?.to_string(),
            children: Vec::new(),
            self_closing,
        })
    }

    /// Qualified tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct children, in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First descendant (excluding `self`) with the given tag name, in
    /// document order.
    pub fn first_descendant(&self, name: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.first_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants (excluding `self`) with the given tag name, in
    /// document order.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Concatenated, unescaped text of the whole subtree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(raw) => out.push_str(&unescape_lossy(raw)),
                Node::CData(raw) => out.push_str(raw),
                Node::Element(e) => e.collect_text(out),
                _ => {}
            }
        }
    }

    /// Trimmed text of the first descendant named `name`.
    pub fn descendant_text(&self, name: &str) -> Option<String> {
        self.first_descendant(name)
            .map(|e| e.text().trim().to_string())
    }

    /// Copy of this element with its content replaced by a single text node.
    pub(crate) fn with_text(&self, text: &str) -> Element {
        Element {
            name: self.name.clone(),
            start: self.start.clone(),
            children: vec![Node::Text(quick_xml::escape::escape(text).into_owned())],
            self_closing: false,
        }
    }

    /// Copy of this element with the given children.
    pub(crate) fn with_children(&self, children: Vec<Node>) -> Element {
        Element {
            name: self.name.clone(),
            start: self.start.clone(),
            children,
            self_closing: self.self_closing,
        }
    }
}

/// A parsed risk-scenario document.
///
/// # Examples
///
/// ```
/// use adapter_span::SpanDocument;
///
/// let xml = r#"<spanFile><fut><pe>20250130</pe></fut></spanFile>"#;
/// let doc = SpanDocument::parse(xml).unwrap();
/// assert_eq!(doc.root().name(), "spanFile");
/// assert_eq!(doc.to_xml().unwrap(), xml);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SpanDocument {
    nodes: Vec<Node>,
    root: usize,
}

impl SpanDocument {
    /// Parse markup text into a document tree.
    ///
    /// # Errors
    ///
    /// [`SpanError::MalformedDocument`] when the text is not well-formed:
    /// reader errors, mismatched or unclosed tags, no root element, more than
    /// one root element, or text outside the root.
    pub fn parse(xml: &str) -> Result<Self, SpanError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut top: Vec<Node> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                SpanError::malformed(format!("at byte {}: {}", reader.buffer_position(), e))
            })?;
            let node = match event {
                Event::Start(e) => {
                    stack.push(Element::from_start(&e, false)?);
                    continue;
                }
                Event::End(e) => {
                    let end = utf8(e.name().as_ref())?.to_string();
                    let element = stack.pop().ok_or_else(|| {
                        SpanError::malformed(format!("unexpected closing tag </{}>", end))
                    })?;
                    if element.name != end {
                        return Err(SpanError::malformed(format!(
                            "closing tag </{}> does not match <{}>",
                            end, element.name
                        )));
                    }
                    Node::Element(element)
                }
                Event::Empty(e) => Node::Element(Element::from_start(&e, true)?),
                Event::Text(e) => Node::Text(utf8(&e)?.to_string()),
                Event::CData(e) => Node::CData(utf8(&e)?.to_string()),
                Event::Comment(e) => Node::Comment(utf8(&e)?.to_string()),
                Event::Decl(e) => Node::Decl(utf8(&e)?.to_string()),
                Event::PI(e) => Node::ProcessingInstruction(utf8(&e)?.to_string()),
                Event::DocType(e) => Node::DocType(utf8(&e)?.trim().to_string()),
                Event::Eof => break,
            };
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => top.push(node),
            }
        }

        if let Some(open) = stack.last() {
            return Err(SpanError::malformed(format!(
                "unclosed element <{}>",
                open.name
            )));
        }

        let mut roots = top
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n, Node::Element(_)))
            .map(|(i, _)| i);
        let root = roots
            .next()
            .ok_or_else(|| SpanError::malformed("no root element"))?;
        if roots.next().is_some() {
            return Err(SpanError::malformed("more than one root element"));
        }
        let stray_text = top.iter().any(|n| match n {
            Node::Text(raw) => !raw.trim().is_empty(),
            Node::CData(_) => true,
            _ => false,
        });
        if stray_text {
            return Err(SpanError::malformed("text outside the root element"));
        }

        Ok(Self { nodes: top, root })
    }

    pub(crate) fn from_parts(nodes: Vec<Node>, root: usize) -> Self {
        Self { nodes, root }
    }

    /// Top-level nodes: prolog, root element, trailing misc.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn root_index(&self) -> usize {
        self.root
    }

    /// The document element.
    pub fn root(&self) -> &Element {
        match &self.nodes[self.root] {
            Node::Element(e) => e,
            _ => unreachable!("root index always points at an element"),
        }
    }

    /// All elements with the given tag name, the root included, in document
    /// order.
    pub fn elements_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let root = self.root();
        let mut found = Vec::new();
        if root.name == name {
            found.push(root);
        }
        root.collect_descendants(name, &mut found);
        found
    }

    /// Serialise back to markup.
    pub fn to_xml(&self) -> Result<String, SpanError> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            write_node(&mut writer, node)?;
        }
        String::from_utf8(writer.into_inner()).map_err(|e| SpanError::Write(e.to_string()))
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), SpanError> {
    let event = match node {
        Node::Element(e) => return write_element(writer, e),
        Node::Text(raw) => Event::Text(BytesText::from_escaped(raw.as_str())),
        Node::CData(raw) => Event::CData(BytesCData::new(raw.as_str())),
        Node::Comment(raw) => Event::Comment(BytesText::from_escaped(raw.as_str())),
        Node::Decl(raw) => Event::Decl(BytesDecl::from_start(BytesStart::from_content(
            raw.as_str(),
            3,
        ))),
        Node::DocType(raw) => Event::DocType(BytesText::from_escaped(raw.as_str())),
        Node::ProcessingInstruction(raw) => {
            let out = writer.get_mut();
            out.extend_from_slice(b"<?");
            out.extend_from_slice(raw.as_bytes());
            out.extend_from_slice(b"?>");
            return Ok(());
        }
    };
    writer
        .write_event(event)
        .map_err(|e| SpanError::Write(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), SpanError> {
    let start = BytesStart::from_content(element.start.as_str(), element.name.len());
    if element.self_closing && element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| SpanError::Write(e.to_string()));
    }
    writer
        .write_event(Event::Start(start))
        .map_err(|e| SpanError::Write(e.to_string()))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| SpanError::Write(e.to_string()))
}

fn utf8(bytes: &[u8]) -> Result<&str, SpanError> {
    std::str::from_utf8(bytes).map_err(|e| SpanError::malformed(format!("invalid UTF-8: {}", e)))
}

fn unescape_lossy(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- exchange file -->
<spanFile version="4.00">
  <pointInTime>
    <fut><cId>101</cId><pe>20250130</pe><ra><r>1</r><a>1.5</a><a/></ra></fut>
    <note>A &amp; B</note>
  </pointInTime>
</spanFile>
"#;

    #[test]
    fn test_roundtrip_is_lossless() {
        let doc = SpanDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.to_xml().unwrap(), SAMPLE);
    }

    #[test]
    fn test_root_and_lookup() {
        let doc = SpanDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.root().name(), "spanFile");

        let futs = doc.elements_named("fut");
        assert_eq!(futs.len(), 1);
        assert_eq!(futs[0].descendant_text("pe").as_deref(), Some("20250130"));
        assert_eq!(futs[0].descendant_text("k"), None);
    }

    #[test]
    fn test_text_is_unescaped() {
        let doc = SpanDocument::parse(SAMPLE).unwrap();
        let note = doc.root().first_descendant("note").unwrap();
        assert_eq!(note.text(), "A & B");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = SpanDocument::parse("<r><a>1</a><b><a>2</a></b><a>3</a></r>").unwrap();
        let texts: Vec<String> = doc.root().descendants("a").iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_mismatched_tags_are_malformed() {
        let err = SpanDocument::parse("<a><b></a></b>").unwrap_err();
        assert!(matches!(err, SpanError::MalformedDocument(_)));
    }

    #[test]
    fn test_unclosed_element_is_malformed() {
        let err = SpanDocument::parse("<a><b></b>").unwrap_err();
        assert!(matches!(err, SpanError::MalformedDocument(_)));
    }

    #[test]
    fn test_plain_text_is_malformed() {
        assert!(SpanDocument::parse("this is not markup").is_err());
        assert!(SpanDocument::parse("").is_err());
    }

    #[test]
    fn test_two_roots_are_malformed() {
        assert!(SpanDocument::parse("<a/><b/>").is_err());
    }

    #[test]
    fn test_with_text_escapes() {
        let doc = SpanDocument::parse("<a>1</a>").unwrap();
        let replaced = doc.root().with_text("<2>");
        assert_eq!(replaced.text(), "<2>");
    }
}
