//! XML document loading
//!
//! The text is tokenized with `roxmltree` and copied into an owned element
//! tree. Every section extractor works only with [`Element`]'s small query
//! surface (children by local name, first child by local name, attribute
//! lookup), so nothing downstream depends on the XML library.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName};
use crate::XML_NAMESPACE;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name, with its namespace URI resolved
    pub qname: QName,
    /// Element attributes in source order, `xmlns` declarations excluded
    pub attributes: IndexMap<QName, String>,
    /// Text before the first child element
    pub text: Option<String>,
    /// Text between the end of this element and the next sibling element
    pub tail: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Get an attribute value by name.
    ///
    /// Unqualified attributes win; a namespaced attribute with the same local
    /// name is used otherwise.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.attributes.get(&QName::local(name)) {
            return Some(value);
        }
        self.attributes
            .iter()
            .find(|(qname, _)| qname.local_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get an attribute value, treating an empty value as absent
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.get_attribute(name).filter(|value| !value.is_empty())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    /// Find child elements by local name
    pub fn find_children<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children
            .iter()
            .filter(move |e| e.local_name() == local_name)
    }

    /// Find the first child element with the given local name
    pub fn find_child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.local_name() == local_name)
    }

    /// Text of the element and all its descendants, in document order
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        self.push_text_content(&mut content);
        content
    }

    fn push_text_content(&self, content: &mut String) {
        if let Some(text) = &self.text {
            content.push_str(text);
        }
        for child in &self.children {
            child.push_text_content(content);
            if let Some(tail) = &child.tail {
                content.push_str(tail);
            }
        }
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
    /// Namespaces declared on the root element
    pub namespaces: NamespaceContext,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml, &Limits::default())
    }

    /// Parse an XML document from a string.
    ///
    /// Malformed XML is an [`Error::Xml`] carrying the tokenizer diagnostic.
    /// A document without any element yields `root: None`.
    pub fn parse(xml: &str, limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let parsed = match roxmltree::Document::parse_with_options(xml, limits.parsing_options())
        {
            Ok(parsed) => parsed,
            Err(roxmltree::Error::NoRootNode) => {
                log::debug!("document has no root element");
                return Ok(Self::new());
            }
            Err(roxmltree::Error::NodesLimitReached) => {
                return Err(Error::LimitExceeded(format!(
                    "XML node count exceeds maximum {}",
                    limits.max_nodes
                )))
            }
            Err(e) => return Err(Error::Xml(e.to_string())),
        };

        let root_node = parsed.root_element();
        let root = build_element(root_node, 1, limits)?;
        let namespaces = NamespaceContext::from_declarations(declared_namespaces(root_node));
        log::trace!(
            "loaded <{}> with {} namespace declarations",
            root.local_name(),
            namespaces.len()
        );

        Ok(Self {
            root: Some(root),
            namespaces,
        })
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}

/// Copy a roxmltree element and its subtree into an owned [`Element`].
///
/// Each text node is stored once, on the element it belongs to: as `text`
/// before the first child element, as the `tail` of the preceding child
/// element otherwise.
fn build_element(node: roxmltree::Node<'_, '_>, depth: usize, limits: &Limits) -> Result<Element> {
    limits.check_xml_depth(depth)?;

    let tag = node.tag_name();
    let mut element = Element::new(QName::new(tag.namespace(), tag.name()));

    for attr in node.attributes() {
        element
            .attributes
            .insert(QName::new(attr.namespace(), attr.name()), attr.value().to_string());
    }

    for child in node.children() {
        if child.is_element() {
            element.add_child(build_element(child, depth + 1, limits)?);
        } else if child.is_text() {
            let segment = child.text().unwrap_or("");
            let slot = match element.children.last_mut() {
                Some(previous) => &mut previous.tail,
                None => &mut element.text,
            };
            slot.get_or_insert_with(String::new).push_str(segment);
        }
    }

    Ok(element)
}

/// Namespaces in scope on the root element, as `(prefix, uri)` pairs; the
/// default namespace uses the empty prefix
fn declared_namespaces(root: roxmltree::Node<'_, '_>) -> Vec<(String, String)> {
    root.namespaces()
        .filter(|ns| !(ns.name() == Some("xml") && ns.uri() == XML_NAMESPACE))
        .map(|ns| (ns.name().unwrap_or("").to_string(), ns.uri().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.root.is_none());
        assert!(doc.namespaces.is_empty());
    }

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<root><child>text</child></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.local_name(), "root");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].local_name(), "child");
        assert_eq!(root.children[0].text.as_deref(), Some("text"));
    }

    #[test]
    fn test_parse_with_attributes() {
        let xml = r#"<root attr1="value1" attr2="value2"><child/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.get_attribute("attr1"), Some("value1"));
        assert_eq!(root.get_attribute("attr2"), Some("value2"));
        assert_eq!(root.get_attribute("missing"), None);
    }

    #[test]
    fn test_parse_with_namespaces() {
        let xml = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
                         xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/">
                         <soap:address location="x"/>
                     </definitions>"#;
        let doc = Document::from_string(xml).unwrap();

        assert_eq!(
            doc.namespaces.get_default_namespace(),
            Some("http://schemas.xmlsoap.org/wsdl/")
        );
        assert_eq!(
            doc.namespaces.get_namespace("soap"),
            Some("http://schemas.xmlsoap.org/wsdl/soap/")
        );
        assert_eq!(doc.namespaces.get_namespace("xml"), None);

        let root = doc.root.unwrap();
        assert_eq!(root.namespace(), Some("http://schemas.xmlsoap.org/wsdl/"));
        assert_eq!(
            root.children[0].namespace(),
            Some("http://schemas.xmlsoap.org/wsdl/soap/")
        );
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<root><child1/><child2/><child1/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.find_children("child1").count(), 2);
        assert_eq!(root.find_child("child2").map(|e| e.local_name()), Some("child2"));
        assert!(root.find_child("child3").is_none());
    }

    #[test]
    fn test_text_content_includes_descendants() {
        let xml = r#"<documentation>Adds <b>two</b> numbers</documentation>"#;
        let doc = Document::from_string(xml).unwrap();
        assert_eq!(doc.root.unwrap().text_content(), "Adds two numbers");
    }

    #[test]
    fn test_text_content_keeps_whitespace_between_children() {
        let xml = r#"<documentation>Hello <b>big</b> <i>world</i></documentation>"#;
        let root = Document::from_string(xml).unwrap().root.unwrap();

        assert_eq!(root.text.as_deref(), Some("Hello "));
        assert_eq!(root.children[0].tail.as_deref(), Some(" "));
        assert_eq!(root.children[1].tail, None);
        assert_eq!(root.text_content(), "Hello big world");
    }

    #[test]
    fn test_nested_text_is_stored_once() {
        let depth = 200;
        let body = "x".repeat(64 * 1024);
        let xml = format!("{}{}{}", "<a>".repeat(depth), body, "</a>".repeat(depth));
        let root = Document::from_string(&xml).unwrap().root.unwrap();

        let mut element = &root;
        let mut stored = 0;
        loop {
            stored += element.text.as_ref().map_or(0, String::len);
            stored += element.tail.as_ref().map_or(0, String::len);
            match element.children.first() {
                Some(child) => element = child,
                None => break,
            }
        }
        assert_eq!(stored, body.len());
        assert_eq!(root.text_content().len(), body.len());
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let result = Document::from_string("<root><child></root>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn test_depth_limit() {
        let mut limits = Limits::default();
        limits.max_xml_depth = 2;
        let result = Document::parse("<a><b><c/></b></a>", &limits);
        assert!(matches!(result, Err(Error::LimitExceeded(_))));
    }

    #[test]
    fn test_element_creation() {
        let mut elem = Element::new(QName::local("test"));
        elem.set_text("content".to_string());

        assert_eq!(elem.local_name(), "test");
        assert_eq!(elem.text.as_deref(), Some("content"));
    }
}
