//! Parse pipeline and result assembly

use super::model::{ParseResult, WsdlDocument, WsdlImport};
use super::wsdl_attrs as attrs;
use super::wsdl_elements as elems;

use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::NamespaceContext;

/// WSDL parser.
///
/// The parser itself only carries configuration. Everything a parse
/// accumulates lives in a context created for that call, so one parser can
/// be reused for any number of documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct WsdlParser {
    limits: Limits,
}

impl WsdlParser {
    /// Create a parser with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits applied while loading the XML text
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse WSDL text into a [`ParseResult`].
    ///
    /// Never panics and never fails: malformed XML, a missing or unknown
    /// root element and every internal error end up as a single error
    /// sentence in [`ParseResult::Failure`].
    pub fn parse(&self, xml: &str) -> ParseResult {
        match self.parse_document(xml) {
            Ok((document, warnings)) => {
                log::debug!(
                    "parsed WSDL: {} services, {} port types, {} bindings, {} messages, {} types",
                    document.services.len(),
                    document.port_types.len(),
                    document.bindings.len(),
                    document.messages.len(),
                    document.types.len()
                );
                ParseResult::Success {
                    document: Box::new(document),
                    warnings,
                }
            }
            Err(err) => {
                let message = err.to_parse_message();
                log::debug!("WSDL parse failed: {}", message);
                ParseResult::failure(message)
            }
        }
    }

    fn parse_document(&self, xml: &str) -> Result<(WsdlDocument, Vec<String>)> {
        let doc = Document::parse(xml, &self.limits)?;
        let root = doc.root().ok_or(Error::NoRootElement)?;
        validate_root(root)?;

        let mut ctx = ParseContext::new(doc.namespaces.clone());
        let document = ctx.extract_document(root, xml);
        Ok((document, ctx.warnings))
    }
}

/// Parse WSDL text with a fresh default parser
pub fn parse_wsdl(xml: &str) -> ParseResult {
    WsdlParser::new().parse(xml)
}

fn validate_root(root: &Element) -> Result<()> {
    match root.local_name() {
        elems::DEFINITIONS | elems::DESCRIPTION => Ok(()),
        other => Err(Error::InvalidRoot {
            found: other.to_string(),
        }),
    }
}

/// State of a single parse: the root's namespace table and the warnings
/// collected so far.
pub(crate) struct ParseContext {
    pub(crate) namespaces: NamespaceContext,
    pub(crate) warnings: Vec<String>,
}

impl ParseContext {
    pub(crate) fn new(namespaces: NamespaceContext) -> Self {
        Self {
            namespaces,
            warnings: Vec::new(),
        }
    }

    /// Local name of a qualified name token, via the namespace table
    pub(crate) fn local_name(&self, token: &str) -> String {
        self.namespaces.resolve_qname(token).local_name
    }

    /// Local name of a QName-valued attribute, empty when absent
    pub(crate) fn attribute_local_name(&self, element: &Element, name: &str) -> String {
        self.local_name(element.get_attribute(name).unwrap_or(""))
    }

    /// Record a recoverable anomaly
    pub(crate) fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    fn extract_document(&mut self, root: &Element, raw_xml: &str) -> WsdlDocument {
        WsdlDocument {
            target_namespace: root
                .get_attribute(attrs::TARGET_NAMESPACE)
                .unwrap_or("")
                .to_string(),
            services: self.parse_services(root),
            port_types: self.parse_port_types(root),
            bindings: self.parse_bindings(root),
            messages: self.parse_messages(root),
            types: self.parse_types(root),
            imports: parse_imports(root),
            documentation: documentation(root),
            raw_xml: raw_xml.to_string(),
        }
    }
}

/// `name` attribute, or `default` when missing or empty
pub(crate) fn name_or(element: &Element, default: &str) -> String {
    element
        .non_empty_attribute(attrs::NAME)
        .unwrap_or(default)
        .to_string()
}

/// Documentation text of an element.
///
/// WSDL puts `documentation` directly under the documented element, XML
/// Schema wraps it in `annotation`; both are accepted.
pub(crate) fn documentation(element: &Element) -> String {
    element
        .find_child(elems::DOCUMENTATION)
        .or_else(|| {
            element
                .find_child(elems::ANNOTATION)
                .and_then(|annotation| annotation.find_child(elems::DOCUMENTATION))
        })
        .map(|doc| doc.text_content().trim().to_string())
        .unwrap_or_default()
}

fn parse_imports(root: &Element) -> Vec<WsdlImport> {
    root.find_children(elems::IMPORT)
        .map(|import| WsdlImport {
            namespace: import
                .get_attribute(attrs::NAMESPACE)
                .unwrap_or("")
                .to_string(),
            location: import
                .non_empty_attribute(attrs::LOCATION)
                .or_else(|| import.non_empty_attribute(attrs::SCHEMA_LOCATION))
                .unwrap_or("")
                .to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0"?>
<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                  targetNamespace="urn:minimal">
    <wsdl:documentation>  A minimal service description.  </wsdl:documentation>
    <wsdl:import namespace="urn:common" location="common.wsdl"/>
    <wsdl:import namespace="urn:types" schemaLocation="types.xsd"/>
    <wsdl:import namespace="urn:nowhere"/>
</wsdl:definitions>"#;

    #[test]
    fn test_parse_minimal_document() {
        let result = parse_wsdl(MINIMAL);
        assert!(result.is_success());
        assert!(result.errors().is_empty());

        let document = result.document().unwrap();
        assert_eq!(document.target_namespace, "urn:minimal");
        assert_eq!(document.documentation, "A minimal service description.");
        assert_eq!(document.raw_xml, MINIMAL);
        assert!(document.services.is_empty());
        assert!(document.types.is_empty());
    }

    #[test]
    fn test_imports_fall_back_to_schema_location() {
        let result = parse_wsdl(MINIMAL);
        let imports = &result.document().unwrap().imports;

        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].namespace, "urn:common");
        assert_eq!(imports[0].location, "common.wsdl");
        assert_eq!(imports[1].location, "types.xsd");
        assert_eq!(imports[2].location, "");
    }

    #[test]
    fn test_wsdl_2_0_root_is_accepted() {
        let result = parse_wsdl(r#"<description xmlns="http://www.w3.org/ns/wsdl"/>"#);
        assert!(result.is_success());
        assert_eq!(result.document().unwrap().target_namespace, "");
    }

    #[test]
    fn test_unknown_root_is_rejected() {
        let result = parse_wsdl(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#);
        assert!(!result.is_success());
        assert!(result.document().is_none());
        assert_eq!(
            result.errors(),
            [
                "Invalid WSDL document: root element is \"schema\", expected \"definitions\" or \"description\""
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_malformed_xml_is_reported() {
        let result = parse_wsdl("<definitions><service></definitions>");
        assert!(!result.is_success());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].starts_with("XML Parse Error: "));
    }

    #[test]
    fn test_empty_input_fails() {
        let result = parse_wsdl("");
        assert!(!result.is_success());
        assert!(!result.errors().is_empty());
    }

    #[test]
    fn test_limits_violation_is_unexpected_error() {
        let parser = WsdlParser::new().with_limits(Limits {
            max_xml_size: 10,
            ..Limits::default()
        });
        let result = parser.parse(MINIMAL);
        assert!(result.errors()[0].starts_with("Unexpected error: "));
    }

    #[test]
    fn test_parser_reuse_does_not_leak_state() {
        let parser = WsdlParser::new();
        let bad = r#"<definitions xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <types><xs:schema><xs:complexType name="T"><xs:sequence>
                <xs:element name="a" type="xs:string" minOccurs="lots"/>
            </xs:sequence></xs:complexType></xs:schema></types>
        </definitions>"#;

        let first = parser.parse(bad);
        assert_eq!(first.warnings().len(), 1);

        let second = parser.parse(MINIMAL);
        assert!(second.warnings().is_empty());
        assert!(second.errors().is_empty());
    }

    #[test]
    fn test_documentation_inside_annotation() {
        let doc = Document::from_string(
            r#"<complexType><annotation><documentation> Wrapped </documentation></annotation></complexType>"#,
        )
        .unwrap();
        assert_eq!(documentation(doc.root().unwrap()), "Wrapped");
    }

    #[test]
    fn test_doctype_is_accepted_by_default() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE definitions [ <!ENTITY ns "urn:typed"> ]>
<definitions targetNamespace="&ns;"/>"#;
        let result = parse_wsdl(xml);
        assert!(result.is_success(), "{:?}", result.errors());
        assert_eq!(result.document().unwrap().target_namespace, "urn:typed");

        let strict = WsdlParser::new().with_limits(Limits::strict()).parse(xml);
        assert!(strict.errors()[0].starts_with("XML Parse Error: "));
    }

    #[test]
    fn test_documentation_keeps_spaces_between_inline_markup() {
        let result = parse_wsdl(
            r#"<definitions><documentation>
                Hello <b>big</b> <i>world</i>
            </documentation></definitions>"#,
        );
        assert_eq!(result.document().unwrap().documentation, "Hello big world");
    }
}
