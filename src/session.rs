//! Stateful holder around the parser
//!
//! A [`WsdlSession`] keeps the outcome of the most recent parse together
//! with its source text, and exposes the read-only views an interactive
//! client needs: flattened operations, lookups by name and reverse
//! references. The source of the last successful parse can be persisted to
//! a file and restored in a later session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use url::Url;

use crate::loaders::{Loader, Location};
use crate::wsdl::{
    self, MessageReverseRef, OperationRecord, ParseResult, TypeReverseRef, WsdlDocument,
    WsdlMessage, WsdlParser, WsdlService, WsdlType,
};

/// The last parsed WSDL document and its source
#[derive(Debug, Clone, Default)]
pub struct WsdlSession {
    parser: WsdlParser,
    loader: Loader,
    storage: Option<PathBuf>,
    result: Option<ParseResult>,
    raw_xml: String,
}

impl WsdlSession {
    /// Create an empty session with default parser and loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific parser
    pub fn with_parser(mut self, parser: WsdlParser) -> Self {
        self.parser = parser;
        self
    }

    /// Use a specific loader for files and URLs
    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = loader;
        self
    }

    /// Persist the source of every successful parse to `path`
    pub fn with_storage(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage = Some(path.into());
        self
    }

    /// Parse `xml` and make it the current document.
    ///
    /// A failed parse replaces the current document too: afterwards
    /// [`has_document`](Self::has_document) is false and the errors are
    /// available.
    pub fn parse_text(&mut self, xml: &str) -> &ParseResult {
        let result = self.parser.parse(xml);
        if result.is_success() {
            self.save(xml);
        }
        self.raw_xml = xml.to_string();
        self.result.insert(result)
    }

    /// Read a file and parse it
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> &ParseResult {
        let location = Location::Path(path.as_ref().to_path_buf());
        match self.loader.load(&location) {
            Ok(xml) => {
                log::info!("loaded WSDL from {}", location);
                self.parse_text(&xml)
            }
            Err(e) => self.fail(format!("Error reading file: {}", e)),
        }
    }

    /// Fetch a URL and parse it.
    ///
    /// Only `file` URLs can be fetched; any other scheme fails without
    /// touching the parser.
    pub fn load_from_url(&mut self, url: &str) -> &ParseResult {
        let loaded = Url::parse(url)
            .map_err(crate::Error::from)
            .and_then(|url| self.loader.load(&Location::Url(url)));
        match loaded {
            Ok(xml) => {
                log::info!("loaded WSDL from {}", url);
                self.parse_text(&xml)
            }
            Err(e) => self.fail(format!("Failed to fetch WSDL: {}", e)),
        }
    }

    /// Parse the persisted source, if any. Returns whether a document was
    /// restored.
    pub fn restore(&mut self) -> bool {
        let Some(path) = self.storage.clone() else {
            return false;
        };
        match fs::read_to_string(&path) {
            Ok(xml) if !xml.is_empty() => self.parse_text(&xml).is_success(),
            Ok(_) => false,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("cannot read saved WSDL {}: {}", path.display(), e);
                }
                false
            }
        }
    }

    /// Forget the current document and the persisted source
    pub fn clear(&mut self) {
        if let Some(path) = &self.storage {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("cannot remove saved WSDL {}: {}", path.display(), e);
                }
            }
        }
        self.result = None;
        self.raw_xml.clear();
    }

    fn fail(&mut self, message: String) -> &ParseResult {
        log::warn!("{}", message);
        self.raw_xml.clear();
        self.result.insert(ParseResult::failure(message))
    }

    fn save(&self, xml: &str) {
        if let Some(path) = &self.storage {
            if let Err(e) = fs::write(path, xml) {
                log::warn!("cannot save WSDL to {}: {}", path.display(), e);
            }
        }
    }

    /// Outcome of the last parse
    pub fn result(&self) -> Option<&ParseResult> {
        self.result.as_ref()
    }

    /// Whether the last parse produced a document
    pub fn has_document(&self) -> bool {
        self.document().is_some()
    }

    /// The current document
    pub fn document(&self) -> Option<&WsdlDocument> {
        self.result.as_ref().and_then(ParseResult::document)
    }

    /// Errors of the last parse
    pub fn errors(&self) -> &[String] {
        self.result
            .as_ref()
            .map(ParseResult::errors)
            .unwrap_or_default()
    }

    /// Warnings of the last parse
    pub fn warnings(&self) -> &[String] {
        self.result
            .as_ref()
            .map(ParseResult::warnings)
            .unwrap_or_default()
    }

    /// Source text of the last parse
    pub fn raw_xml(&self) -> &str {
        &self.raw_xml
    }

    /// Target namespace of the current document, empty without one
    pub fn target_namespace(&self) -> &str {
        self.document().map_or("", |d| d.target_namespace.as_str())
    }

    /// Services of the current document
    pub fn services(&self) -> &[WsdlService] {
        self.document()
            .map(|d| d.services.as_slice())
            .unwrap_or_default()
    }

    /// Schema types of the current document
    pub fn types(&self) -> &[WsdlType] {
        self.document()
            .map(|d| d.types.as_slice())
            .unwrap_or_default()
    }

    /// Messages of the current document
    pub fn messages(&self) -> &[WsdlMessage] {
        self.document()
            .map(|d| d.messages.as_slice())
            .unwrap_or_default()
    }

    /// Flattened operations of the current document
    pub fn operations(&self) -> Vec<OperationRecord> {
        self.document()
            .map(wsdl::get_all_operations)
            .unwrap_or_default()
    }

    /// First message named `name`
    pub fn get_message_by_name(&self, name: &str) -> Option<&WsdlMessage> {
        self.document()
            .and_then(|d| wsdl::get_message_by_name(d, name))
    }

    /// First type named `name`
    pub fn get_type_by_name(&self, name: &str) -> Option<&WsdlType> {
        self.document().and_then(|d| wsdl::get_type_by_name(d, name))
    }

    /// Operations using each message
    pub fn message_reverse_refs(&self) -> IndexMap<String, Vec<MessageReverseRef>> {
        wsdl::message_reverse_refs(&self.operations())
    }

    /// Messages, operations and types using each type
    pub fn type_reverse_refs(&self) -> IndexMap<String, Vec<TypeReverseRef>> {
        match self.document() {
            Some(document) => wsdl::type_reverse_refs(document, &self.operations()),
            None => IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SERVICE: &str = r#"<definitions targetNamespace="urn:s">
        <message name="In"><part name="p" element="Req"/></message>
        <portType name="P"><operation name="Op"><input message="In"/></operation></portType>
    </definitions>"#;

    #[test]
    fn test_parse_text_updates_views() {
        let mut session = WsdlSession::new();
        assert!(!session.has_document());
        assert!(session.operations().is_empty());
        assert_eq!(session.target_namespace(), "");

        assert!(session.parse_text(SERVICE).is_success());
        assert!(session.has_document());
        assert_eq!(session.raw_xml(), SERVICE);
        assert_eq!(session.target_namespace(), "urn:s");
        assert_eq!(session.operations()[0].service_name, "Default");
        assert_eq!(session.messages().len(), 1);
        assert!(session.get_message_by_name("In").is_some());
        assert_eq!(session.message_reverse_refs()["In"][0].operation_name, "Op");
        assert_eq!(session.type_reverse_refs()["Req"].len(), 2);
    }

    #[test]
    fn test_failed_parse_replaces_document() {
        let mut session = WsdlSession::new();
        session.parse_text(SERVICE);

        let result = session.parse_text("<oops");
        assert!(!result.is_success());
        assert!(!session.has_document());
        assert_eq!(session.errors().len(), 1);
        assert!(session.services().is_empty());
        assert!(session.type_reverse_refs().is_empty());
    }

    #[test]
    fn test_load_from_missing_file() {
        let mut session = WsdlSession::new();
        let result = session.load_from_file("/definitely/not/here.wsdl");
        assert!(result.errors()[0].starts_with("Error reading file: "));
        assert_eq!(session.raw_xml(), "");
    }

    #[test]
    fn test_load_from_file_and_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service.wsdl");
        fs::write(&path, SERVICE).unwrap();

        let mut session = WsdlSession::new();
        assert!(session.load_from_file(&path).is_success());

        let url = Url::from_file_path(&path).unwrap();
        assert!(session.load_from_url(url.as_str()).is_success());
    }

    #[test]
    fn test_load_from_url_failures() {
        let mut session = WsdlSession::new();

        let result = session.load_from_url("http://example.com/service?wsdl");
        assert!(result.errors()[0].starts_with("Failed to fetch WSDL: "));

        let result = session.load_from_url("not a url");
        assert!(result.errors()[0].starts_with("Failed to fetch WSDL: "));
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = dir.path().join("saved.wsdl");

        let mut session = WsdlSession::new().with_storage(&storage);
        assert!(!session.restore());
        session.parse_text(SERVICE);
        // failed parses are not persisted
        session.parse_text("<oops");

        let mut restored = WsdlSession::new().with_storage(&storage);
        assert!(restored.restore());
        assert_eq!(restored.raw_xml(), SERVICE);

        restored.clear();
        assert!(!restored.has_document());
        assert!(!storage.exists());
        assert!(!restored.restore());
    }
}
