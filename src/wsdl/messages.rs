//! `message` and `part` extraction

use super::model::{WsdlMessage, WsdlMessagePart};
use super::parser::{documentation, name_or, ParseContext};
use super::wsdl_attrs as attrs;
use super::wsdl_elements as elems;

use crate::documents::Element;

impl ParseContext {
    pub(crate) fn parse_messages(&self, root: &Element) -> Vec<WsdlMessage> {
        root.find_children(elems::MESSAGE)
            .map(|message| WsdlMessage {
                name: name_or(message, "Unknown"),
                documentation: documentation(message),
                parts: self.parse_message_parts(message),
            })
            .collect()
    }

    fn parse_message_parts(&self, message: &Element) -> Vec<WsdlMessagePart> {
        message
            .find_children(elems::PART)
            .map(|part| WsdlMessagePart {
                name: name_or(part, "Unknown"),
                type_: part
                    .non_empty_attribute(attrs::TYPE)
                    .map(|token| self.local_name(token)),
                element: part
                    .non_empty_attribute(attrs::ELEMENT)
                    .map(|token| self.local_name(token)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::wsdl::parse_wsdl;

    #[test]
    fn test_messages_in_order_with_stripped_prefixes() {
        let xml = r#"<definitions xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                                  xmlns:tns="urn:orders">
            <message name="PlaceOrderRequest">
                <documentation>Order placement</documentation>
                <part name="order" element="tns:Order"/>
            </message>
            <message name="PlaceOrderResponse">
                <part name="id" type="xsd:int"/>
                <part name="note" type="xsd:string" element="tns:Note"/>
                <part name="raw"/>
            </message>
            <message/>
        </definitions>"#;

        let result = parse_wsdl(xml);
        let messages = &result.document().unwrap().messages;
        assert_eq!(messages.len(), 3);

        assert_eq!(messages[0].name, "PlaceOrderRequest");
        assert_eq!(messages[0].documentation, "Order placement");
        assert_eq!(messages[0].parts[0].element.as_deref(), Some("Order"));
        assert_eq!(messages[0].parts[0].type_, None);

        let parts = &messages[1].parts;
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].type_.as_deref(), Some("int"));
        assert_eq!(parts[1].type_.as_deref(), Some("string"));
        assert_eq!(parts[1].element.as_deref(), Some("Note"));
        assert_eq!(parts[2].name, "raw");
        assert_eq!(parts[2].type_, None);
        assert_eq!(parts[2].element, None);

        assert_eq!(messages[2].name, "Unknown");
        assert!(messages[2].parts.is_empty());
    }
}
