//! `binding` extraction

use super::model::{
    Protocol, WsdlBinding, WsdlBindingBody, WsdlBindingHeader, WsdlBindingMessage,
    WsdlBindingOperation,
};
use super::parser::{name_or, ParseContext};
use super::wsdl_attrs as attrs;
use super::wsdl_elements as elems;

use crate::documents::Element;

const DEFAULT_STYLE: &str = "document";
const DEFAULT_USE: &str = "literal";

impl ParseContext {
    pub(crate) fn parse_bindings(&self, root: &Element) -> Vec<WsdlBinding> {
        root.find_children(elems::BINDING)
            .map(|binding| {
                // soap:binding / soap12:binding / http:binding marker
                let marker = binding.find_child(elems::BINDING);

                WsdlBinding {
                    name: name_or(binding, "Unknown"),
                    port_type: self.attribute_local_name(binding, attrs::TYPE),
                    protocol: marker
                        .map(|m| Protocol::from_namespace(m.namespace()))
                        .unwrap_or_default(),
                    style: marker
                        .and_then(|m| m.non_empty_attribute(attrs::STYLE))
                        .unwrap_or(DEFAULT_STYLE)
                        .to_string(),
                    transport: marker
                        .and_then(|m| m.get_attribute(attrs::TRANSPORT))
                        .unwrap_or("")
                        .to_string(),
                    operations: self.parse_binding_operations(binding),
                }
            })
            .collect()
    }

    fn parse_binding_operations(&self, binding: &Element) -> Vec<WsdlBindingOperation> {
        binding
            .find_children(elems::OPERATION)
            .map(|operation| {
                let marker = operation.find_child(elems::OPERATION);
                let marker_attr = |name: &str| {
                    marker
                        .and_then(|m| m.get_attribute(name))
                        .unwrap_or("")
                        .to_string()
                };

                WsdlBindingOperation {
                    name: name_or(operation, "Unknown"),
                    soap_action: marker_attr(attrs::SOAP_ACTION),
                    style: marker_attr(attrs::STYLE),
                    input: self.parse_binding_message(operation, elems::INPUT),
                    output: self.parse_binding_message(operation, elems::OUTPUT),
                }
            })
            .collect()
    }

    fn parse_binding_message(&self, operation: &Element, role: &str) -> Option<WsdlBindingMessage> {
        let message = operation.find_child(role)?;

        let body = message.find_child(elems::BODY).map(|body| WsdlBindingBody {
            use_: body
                .non_empty_attribute(attrs::USE)
                .unwrap_or(DEFAULT_USE)
                .to_string(),
            namespace: body.non_empty_attribute(attrs::NAMESPACE).map(str::to_string),
        });

        let headers = message
            .find_children(elems::HEADER)
            .map(|header| WsdlBindingHeader {
                message: self.attribute_local_name(header, attrs::MESSAGE),
                part: header.get_attribute(attrs::PART).unwrap_or("").to_string(),
                use_: header
                    .non_empty_attribute(attrs::USE)
                    .unwrap_or(DEFAULT_USE)
                    .to_string(),
            })
            .collect();

        Some(WsdlBindingMessage { body, headers })
    }
}
