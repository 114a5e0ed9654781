//! WSDL parsing
//!
//! [`WsdlParser`] drives the pipeline: the XML text is loaded into an
//! element tree, the root is validated, the root's namespace declarations
//! are captured, and each section of the document is extracted by its own
//! module. Sections are matched by local name only, so WSDL 1.1, WSDL 2.0,
//! SOAP and HTTP extension elements are recognized whatever prefix or
//! namespace they use.

mod bindings;
mod messages;
pub mod model;
pub mod operations;
mod parser;
mod port_types;
pub mod references;
mod schema;
mod services;

pub use model::{
    MaxOccurs, ParseResult, Protocol, TypeKind, WsdlBinding, WsdlBindingBody, WsdlBindingHeader,
    WsdlBindingMessage, WsdlBindingOperation, WsdlDocument, WsdlImport, WsdlMessage,
    WsdlMessagePart, WsdlOperation, WsdlOperationMessage, WsdlPort, WsdlPortType,
    WsdlRestriction, WsdlService, WsdlType, WsdlTypeField,
};
pub use operations::{
    find_binding_info, get_all_operations, get_message_by_name, get_type_by_name, BindingInfo,
    OperationRecord,
};
pub use parser::{parse_wsdl, WsdlParser};
pub use references::{
    message_reverse_refs, type_reverse_refs, MessageReverseRef, MessageRole, ReferenceKind,
    TypeReverseRef,
};

/// WSDL and XSD element local names
pub(crate) mod wsdl_elements {
    pub const DEFINITIONS: &str = "definitions";
    pub const DESCRIPTION: &str = "description";
    pub const DOCUMENTATION: &str = "documentation";
    pub const ANNOTATION: &str = "annotation";
    pub const IMPORT: &str = "import";
    pub const SERVICE: &str = "service";
    pub const PORT: &str = "port";
    pub const ADDRESS: &str = "address";
    pub const PORT_TYPE: &str = "portType";
    pub const INTERFACE: &str = "interface";
    pub const OPERATION: &str = "operation";
    pub const INPUT: &str = "input";
    pub const OUTPUT: &str = "output";
    pub const FAULT: &str = "fault";
    pub const BINDING: &str = "binding";
    pub const BODY: &str = "body";
    pub const HEADER: &str = "header";
    pub const MESSAGE: &str = "message";
    pub const PART: &str = "part";
    pub const TYPES: &str = "types";
    // Schema
    pub const SCHEMA: &str = "schema";
    pub const ELEMENT: &str = "element";
    pub const COMPLEX_TYPE: &str = "complexType";
    pub const SIMPLE_TYPE: &str = "simpleType";
    pub const ATTRIBUTE: &str = "attribute";
    pub const SEQUENCE: &str = "sequence";
    pub const CHOICE: &str = "choice";
    pub const ALL: &str = "all";
    pub const ANY: &str = "any";
    pub const COMPLEX_CONTENT: &str = "complexContent";
    pub const SIMPLE_CONTENT: &str = "simpleContent";
    pub const EXTENSION: &str = "extension";
    pub const RESTRICTION: &str = "restriction";
    pub const UNION: &str = "union";
    pub const LIST: &str = "list";
    // Facets
    pub const ENUMERATION: &str = "enumeration";
    pub const MIN_LENGTH: &str = "minLength";
    pub const MAX_LENGTH: &str = "maxLength";
    pub const PATTERN: &str = "pattern";
    pub const MIN_INCLUSIVE: &str = "minInclusive";
    pub const MAX_INCLUSIVE: &str = "maxInclusive";
    pub const MIN_EXCLUSIVE: &str = "minExclusive";
    pub const MAX_EXCLUSIVE: &str = "maxExclusive";
}

/// WSDL and XSD attribute names
pub(crate) mod wsdl_attrs {
    pub const NAME: &str = "name";
    pub const TARGET_NAMESPACE: &str = "targetNamespace";
    pub const NAMESPACE: &str = "namespace";
    pub const LOCATION: &str = "location";
    pub const SCHEMA_LOCATION: &str = "schemaLocation";
    pub const BINDING: &str = "binding";
    pub const TYPE: &str = "type";
    pub const MESSAGE: &str = "message";
    pub const ELEMENT: &str = "element";
    pub const SOAP_ACTION: &str = "soapAction";
    pub const STYLE: &str = "style";
    pub const TRANSPORT: &str = "transport";
    pub const USE: &str = "use";
    pub const PART: &str = "part";
    pub const REF: &str = "ref";
    pub const BASE: &str = "base";
    pub const VALUE: &str = "value";
    pub const MIN_OCCURS: &str = "minOccurs";
    pub const MAX_OCCURS: &str = "maxOccurs";
    pub const MEMBER_TYPES: &str = "memberTypes";
    pub const ITEM_TYPE: &str = "itemType";
}
