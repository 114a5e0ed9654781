//! # wsdl
//!
//! A tolerant parser for WSDL (Web Services Description Language) documents.
//!
//! The parser turns WSDL 1.1 `definitions` (and the syntactically overlapping
//! part of WSDL 2.0 `description`) documents into a strongly-typed model of
//! services, ports, port types, bindings, messages and the XML Schema types
//! embedded in `<types>`. Malformed input never panics: every failure is
//! reported through [`ParseResult`].
//!
//! ## Example
//!
//! ```rust
//! use wsdl::{parse_wsdl, get_all_operations};
//!
//! let xml = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" name="Quotes">
//!     <portType name="QuotePort">
//!         <operation name="GetQuote"/>
//!     </portType>
//! </definitions>"#;
//!
//! let result = parse_wsdl(xml);
//! let document = result.document().expect("valid WSDL");
//! let operations = get_all_operations(document);
//! assert_eq!(operations[0].service_name, "Default");
//! assert_eq!(operations[0].operation_name, "GetQuote");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// XML utilities
pub mod namespaces;
pub mod documents;

// Resource loading
pub mod loaders;

// WSDL model and parser
pub mod wsdl;

// Stateful holder around the parser
pub mod session;

// Re-exports for convenience
pub use error::{Error, Result};
pub use wsdl::{
    get_all_operations, get_message_by_name, get_type_by_name, parse_wsdl, OperationRecord,
    ParseResult, WsdlDocument, WsdlParser,
};

/// Version of the wsdl library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WSDL 1.1 namespace
pub const WSDL_1_1_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";

/// WSDL 2.0 namespace
pub const WSDL_2_0_NAMESPACE: &str = "http://www.w3.org/ns/wsdl";

/// SOAP 1.1 binding namespace
pub const SOAP_1_1_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap/";

/// SOAP 1.2 binding namespace
pub const SOAP_1_2_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";

/// HTTP binding namespace
pub const HTTP_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/http/";

/// XSD namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
