//! `portType` / `interface` and abstract operation extraction

use super::model::{WsdlOperation, WsdlOperationMessage, WsdlPortType};
use super::operations::find_binding_info;
use super::parser::{documentation, name_or, ParseContext};
use super::wsdl_attrs as attrs;
use super::wsdl_elements as elems;

use crate::documents::Element;

impl ParseContext {
    /// WSDL 1.1 `portType`s first, then WSDL 2.0 `interface`s
    pub(crate) fn parse_port_types(&self, root: &Element) -> Vec<WsdlPortType> {
        root.find_children(elems::PORT_TYPE)
            .chain(root.find_children(elems::INTERFACE))
            .map(|port_type| WsdlPortType {
                name: name_or(port_type, "Unknown"),
                documentation: documentation(port_type),
                operations: self.parse_operations(root, port_type),
            })
            .collect()
    }

    fn parse_operations(&self, root: &Element, port_type: &Element) -> Vec<WsdlOperation> {
        // Bindings reference the declared name, so an unnamed port type matches nothing useful
        let port_type_name = port_type.get_attribute(attrs::NAME).unwrap_or("");

        port_type
            .find_children(elems::OPERATION)
            .map(|operation| {
                let name = name_or(operation, "Unknown");
                let binding_info =
                    find_binding_info(root, &self.namespaces, port_type_name, &name);

                WsdlOperation {
                    documentation: documentation(operation),
                    input: self.parse_operation_message(operation, elems::INPUT),
                    output: self.parse_operation_message(operation, elems::OUTPUT),
                    faults: self.parse_operation_faults(operation),
                    soap_action: binding_info.soap_action,
                    style: binding_info.style,
                    name,
                }
            })
            .collect()
    }

    fn parse_operation_message(
        &self,
        operation: &Element,
        role: &str,
    ) -> Option<WsdlOperationMessage> {
        operation
            .find_child(role)
            .map(|message| self.operation_message(message, role))
    }

    fn parse_operation_faults(&self, operation: &Element) -> Vec<WsdlOperationMessage> {
        operation
            .find_children(elems::FAULT)
            .map(|fault| self.operation_message(fault, elems::FAULT))
            .collect()
    }

    fn operation_message(&self, element: &Element, default_name: &str) -> WsdlOperationMessage {
        WsdlOperationMessage {
            name: name_or(element, default_name),
            message: self.attribute_local_name(element, attrs::MESSAGE),
            parts: Vec::new(),
        }
    }
}
