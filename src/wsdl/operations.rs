//! Cross-reference helpers over a parsed document
//!
//! Entities in [`WsdlDocument`] refer to each other by local name only. The
//! functions here follow those names: binding operations back to port type
//! operations, ports to bindings to port types, and names to messages and
//! types.

use serde::Serialize;

use super::model::{WsdlDocument, WsdlMessage, WsdlOperationMessage, WsdlType};
use super::wsdl_attrs as attrs;
use super::wsdl_elements as elems;

use crate::documents::Element;
use crate::namespaces::NamespaceContext;

/// Service name used for operations of documents that declare no usable service
pub const DEFAULT_SERVICE_NAME: &str = "Default";

/// SOAP details of a port type operation, read from its binding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingInfo {
    /// `soapAction` of the binding operation marker
    pub soap_action: Option<String>,
    /// `style` of the binding operation marker
    pub style: Option<String>,
}

/// Look up the binding details of `operation_name` in port type `port_type_name`.
///
/// Bindings are scanned in document order. The first binding whose `type`
/// resolves to the port type and that holds an `operation` named
/// `operation_name` with an `operation` marker child (`soap:operation`,
/// `soap12:operation`, ...) supplies the result. Empty attributes count as
/// absent.
pub fn find_binding_info(
    root: &Element,
    namespaces: &NamespaceContext,
    port_type_name: &str,
    operation_name: &str,
) -> BindingInfo {
    let marker = root
        .find_children(elems::BINDING)
        .filter(|binding| {
            let type_ref = binding.get_attribute(attrs::TYPE).unwrap_or("");
            namespaces.resolve_qname(type_ref).local_name == port_type_name
        })
        .flat_map(|binding| binding.find_children(elems::OPERATION))
        .filter(|operation| operation.get_attribute(attrs::NAME) == Some(operation_name))
        .find_map(|operation| operation.find_child(elems::OPERATION));

    match marker {
        Some(marker) => BindingInfo {
            soap_action: marker
                .non_empty_attribute(attrs::SOAP_ACTION)
                .map(str::to_string),
            style: marker.non_empty_attribute(attrs::STYLE).map(str::to_string),
        },
        None => BindingInfo::default(),
    }
}

/// An operation as exposed by a concrete endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    /// Service exposing the operation, or `Default`
    pub service_name: String,
    /// Port exposing the operation, or the port type name for `Default`
    pub port_name: String,
    /// Operation name
    pub operation_name: String,
    /// SOAP action from the binding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soap_action: Option<String>,
    /// Input message reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<WsdlOperationMessage>,
    /// Output message reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<WsdlOperationMessage>,
    /// Documentation of the port type operation
    pub documentation: String,
}

/// Flatten the document into one record per (operation, service, port).
///
/// A port matches a port type when its binding (the first binding with the
/// port's binding name) implements that port type. When no port matches
/// anything but port types exist, every operation is reported once under the
/// [`DEFAULT_SERVICE_NAME`] service with the port type name as port.
pub fn get_all_operations(document: &WsdlDocument) -> Vec<OperationRecord> {
    let mut records = Vec::new();

    for port_type in &document.port_types {
        for operation in &port_type.operations {
            for service in &document.services {
                for port in &service.ports {
                    let implements_port_type = document
                        .bindings
                        .iter()
                        .find(|binding| binding.name == port.binding)
                        .is_some_and(|binding| binding.port_type == port_type.name);

                    if implements_port_type {
                        records.push(OperationRecord {
                            service_name: service.name.clone(),
                            port_name: port.name.clone(),
                            operation_name: operation.name.clone(),
                            soap_action: operation.soap_action.clone(),
                            input: operation.input.clone(),
                            output: operation.output.clone(),
                            documentation: operation.documentation.clone(),
                        });
                    }
                }
            }
        }
    }

    if records.is_empty() && !document.port_types.is_empty() {
        log::debug!("no service exposes a port type, falling back to abstract operations");
        for port_type in &document.port_types {
            for operation in &port_type.operations {
                records.push(OperationRecord {
                    service_name: DEFAULT_SERVICE_NAME.to_string(),
                    port_name: port_type.name.clone(),
                    operation_name: operation.name.clone(),
                    soap_action: operation.soap_action.clone(),
                    input: operation.input.clone(),
                    output: operation.output.clone(),
                    documentation: operation.documentation.clone(),
                });
            }
        }
    }

    records
}

/// First message named `name`
pub fn get_message_by_name<'a>(document: &'a WsdlDocument, name: &str) -> Option<&'a WsdlMessage> {
    document.messages.iter().find(|message| message.name == name)
}

/// First type named `name`
pub fn get_type_by_name<'a>(document: &'a WsdlDocument, name: &str) -> Option<&'a WsdlType> {
    document.types.iter().find(|t| t.name == name)
}
