//! WSDL document model
//!
//! Every value here is an immutable snapshot produced by a single parse.
//! Entities never point at each other: a port names its binding, a binding
//! names its port type, a message part names a schema type, and callers
//! resolve those names with the lookup helpers in
//! [`operations`](super::operations).

use std::fmt;

use serde::{Serialize, Serializer};

/// A parsed WSDL document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlDocument {
    /// `targetNamespace` of the root element, empty when absent
    pub target_namespace: String,
    /// Services in document order
    pub services: Vec<WsdlService>,
    /// Port types (WSDL 1.1) followed by interfaces (WSDL 2.0)
    pub port_types: Vec<WsdlPortType>,
    /// Bindings in document order
    pub bindings: Vec<WsdlBinding>,
    /// Messages in document order
    pub messages: Vec<WsdlMessage>,
    /// Schema types declared under `<types>`
    pub types: Vec<WsdlType>,
    /// Imports declared on the root element
    pub imports: Vec<WsdlImport>,
    /// Top-level documentation text
    pub documentation: String,
    /// The source text the document was parsed from
    pub raw_xml: String,
}

/// A `service` element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlService {
    /// Service name
    pub name: String,
    /// Documentation text
    pub documentation: String,
    /// Ports in document order
    pub ports: Vec<WsdlPort>,
}

/// A `port` element inside a service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlPort {
    /// Port name
    pub name: String,
    /// Local name of the binding this port exposes
    pub binding: String,
    /// Endpoint URL from the `address` extension element
    pub address: String,
    /// Protocol inferred from the address element's namespace
    pub protocol: Protocol,
}

/// Wire protocol of a port or binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Protocol {
    /// Unknown SOAP flavour
    #[default]
    Soap,
    /// SOAP 1.1
    Soap11,
    /// SOAP 1.2
    Soap12,
    /// Plain HTTP binding
    Http,
}

impl Protocol {
    /// Infer the protocol from the namespace URI of an extension element.
    ///
    /// Matching is by substring and in this order: `soap12`, `soap`, `http`.
    pub fn from_namespace(namespace: Option<&str>) -> Self {
        match namespace {
            Some(ns) if ns.contains("soap12") => Protocol::Soap12,
            Some(ns) if ns.contains("soap") => Protocol::Soap11,
            Some(ns) if ns.contains("http") => Protocol::Http,
            _ => Protocol::Soap,
        }
    }

    /// Display tag of the protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Soap => "SOAP",
            Protocol::Soap11 => "SOAP 1.1",
            Protocol::Soap12 => "SOAP 1.2",
            Protocol::Http => "HTTP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Protocol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A `portType` (WSDL 1.1) or `interface` (WSDL 2.0) element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlPortType {
    /// Port type name
    pub name: String,
    /// Documentation text
    pub documentation: String,
    /// Operations in document order
    pub operations: Vec<WsdlOperation>,
}

/// An abstract operation of a port type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlOperation {
    /// Operation name
    pub name: String,
    /// Documentation text
    pub documentation: String,
    /// Input message reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<WsdlOperationMessage>,
    /// Output message reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<WsdlOperationMessage>,
    /// Fault message references
    pub faults: Vec<WsdlOperationMessage>,
    /// SOAP action taken from the matching binding operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soap_action: Option<String>,
    /// Style taken from the matching binding operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// An `input`, `output` or `fault` reference inside an operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlOperationMessage {
    /// Name of the reference, or its role when unnamed
    pub name: String,
    /// Local name of the referenced message
    pub message: String,
    /// Always empty: look the message up by name for its parts
    pub parts: Vec<WsdlMessagePart>,
}

/// A `binding` element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlBinding {
    /// Binding name
    pub name: String,
    /// Local name of the port type this binding implements
    #[serde(rename = "type")]
    pub port_type: String,
    /// Protocol inferred from the binding extension element
    pub protocol: Protocol,
    /// `document` or `rpc`
    pub style: String,
    /// Transport URI
    pub transport: String,
    /// Binding operations in document order
    pub operations: Vec<WsdlBindingOperation>,
}

/// An `operation` element inside a binding
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlBindingOperation {
    /// Operation name
    pub name: String,
    /// SOAP action, empty when not declared
    pub soap_action: String,
    /// Operation style, empty when not declared
    pub style: String,
    /// Input encoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<WsdlBindingMessage>,
    /// Output encoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<WsdlBindingMessage>,
}

/// Encoding of the input or output of a binding operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlBindingMessage {
    /// The `body` extension element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<WsdlBindingBody>,
    /// `header` extension elements
    pub headers: Vec<WsdlBindingHeader>,
}

/// A SOAP `body` extension element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlBindingBody {
    /// `literal` or `encoded`
    #[serde(rename = "use")]
    pub use_: String,
    /// Namespace of the body, used by rpc style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// A SOAP `header` extension element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlBindingHeader {
    /// Local name of the message carrying the header
    pub message: String,
    /// Part of that message
    pub part: String,
    /// `literal` or `encoded`
    #[serde(rename = "use")]
    pub use_: String,
}

/// A `message` element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlMessage {
    /// Message name
    pub name: String,
    /// Documentation text
    pub documentation: String,
    /// Parts in document order
    pub parts: Vec<WsdlMessagePart>,
}

/// A `part` element inside a message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlMessagePart {
    /// Part name
    pub name: String,
    /// Local name of the `type` attribute
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Local name of the `element` attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

/// Kind of schema definition a [`WsdlType`] was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    /// `complexType`
    ComplexType,
    /// `simpleType`
    SimpleType,
    /// Top-level `element`
    Element,
}

impl TypeKind {
    /// Schema element name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::ComplexType => "complexType",
            TypeKind::SimpleType => "simpleType",
            TypeKind::Element => "element",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema type definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlType {
    /// Type name
    pub name: String,
    /// Definition kind
    pub kind: TypeKind,
    /// Documentation text
    pub documentation: String,
    /// `targetNamespace` of the enclosing schema
    pub namespace: String,
    /// Base type local name, or a `union(..)` / `list(..)` descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Elements and attributes in document order
    pub fields: Vec<WsdlTypeField>,
    /// Facets of a restricted simple type
    #[serde(rename = "restrictions", skip_serializing_if = "Option::is_none")]
    pub restriction: Option<WsdlRestriction>,
}

/// Upper occurrence bound of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// A fixed bound
    Bounded(u32),
    /// `unbounded`
    Unbounded,
}

impl MaxOccurs {
    /// Whether more than one occurrence is allowed
    pub fn is_repeated(&self) -> bool {
        match self {
            MaxOccurs::Bounded(n) => *n > 1,
            MaxOccurs::Unbounded => true,
        }
    }
}

impl Default for MaxOccurs {
    fn default() -> Self {
        MaxOccurs::Bounded(1)
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(n) => write!(f, "{}", n),
            MaxOccurs::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl Serialize for MaxOccurs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MaxOccurs::Bounded(n) => serializer.serialize_u32(*n),
            MaxOccurs::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

/// An element, wildcard or attribute of a schema type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlTypeField {
    /// Field name
    pub name: String,
    /// Type local name, `any`, or `inline-<name>` for anonymous types
    #[serde(rename = "type")]
    pub type_: String,
    /// Lower occurrence bound
    pub min_occurs: u32,
    /// Upper occurrence bound
    pub max_occurs: MaxOccurs,
    /// Documentation text
    pub documentation: String,
    /// Whether the field comes from an `attribute` declaration
    pub is_attribute: bool,
    /// Whether the field may be omitted
    pub is_optional: bool,
}

/// Facets of a `restriction`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlRestriction {
    /// Restricted base type
    pub base: String,
    /// Enumerated values in document order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<String>>,
    /// `minLength` facet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// `maxLength` facet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// `pattern` facet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// `minInclusive` facet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_inclusive: Option<String>,
    /// `maxInclusive` facet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_inclusive: Option<String>,
    /// `minExclusive` facet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_exclusive: Option<String>,
    /// `maxExclusive` facet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_exclusive: Option<String>,
}

/// An `import` element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsdlImport {
    /// Imported namespace
    pub namespace: String,
    /// `location`, or `schemaLocation` when `location` is absent
    pub location: String,
}

/// Outcome of parsing a WSDL document
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// A document was produced
    Success {
        /// The parsed document
        document: Box<WsdlDocument>,
        /// Recoverable anomalies met while parsing
        warnings: Vec<String>,
    },
    /// Parsing failed; no document is exposed
    Failure {
        /// At least one error sentence
        errors: Vec<String>,
        /// Warnings collected before the failure
        warnings: Vec<String>,
    },
}

impl ParseResult {
    /// Build a failure from a single error message
    pub fn failure(error: impl Into<String>) -> Self {
        ParseResult::Failure {
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }

    /// Whether a document was produced
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    /// The parsed document, if any
    pub fn document(&self) -> Option<&WsdlDocument> {
        match self {
            ParseResult::Success { document, .. } => Some(document.as_ref()),
            ParseResult::Failure { .. } => None,
        }
    }

    /// Errors; always empty on success
    pub fn errors(&self) -> &[String] {
        match self {
            ParseResult::Success { .. } => &[],
            ParseResult::Failure { errors, .. } => errors.as_slice(),
        }
    }

    /// Warnings
    pub fn warnings(&self) -> &[String] {
        match self {
            ParseResult::Success { warnings, .. } | ParseResult::Failure { warnings, .. } => {
                warnings.as_slice()
            }
        }
    }
}

impl Serialize for ParseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            success: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            document: Option<&'a WsdlDocument>,
            errors: &'a [String],
            warnings: &'a [String],
        }

        Repr {
            success: self.is_success(),
            document: self.document(),
            errors: self.errors(),
            warnings: self.warnings(),
        }
        .serialize(serializer)
    }
}
