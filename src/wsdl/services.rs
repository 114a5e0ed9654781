//! `service` and `port` extraction

use super::model::{Protocol, WsdlPort, WsdlService};
use super::parser::{documentation, name_or, ParseContext};
use super::wsdl_attrs as attrs;
use super::wsdl_elements as elems;

use crate::documents::Element;

impl ParseContext {
    pub(crate) fn parse_services(&self, root: &Element) -> Vec<WsdlService> {
        root.find_children(elems::SERVICE)
            .map(|service| WsdlService {
                name: name_or(service, "Unknown"),
                documentation: documentation(service),
                ports: self.parse_ports(service),
            })
            .collect()
    }

    fn parse_ports(&self, service: &Element) -> Vec<WsdlPort> {
        service
            .find_children(elems::PORT)
            .map(|port| {
                // soap:address, soap12:address and http:address all share the local name
                let address = port.find_child(elems::ADDRESS);
                let parsed = WsdlPort {
                    name: name_or(port, "Unknown"),
                    binding: self.attribute_local_name(port, attrs::BINDING),
                    address: address
                        .and_then(|a| a.get_attribute(attrs::LOCATION))
                        .unwrap_or("")
                        .to_string(),
                    protocol: address
                        .map(|a| Protocol::from_namespace(a.namespace()))
                        .unwrap_or_default(),
                };
                log::trace!(
                    "port {} -> binding {} ({})",
                    parsed.name,
                    parsed.binding,
                    parsed.protocol
                );
                parsed
            })
            .collect()
    }
}
