//! Extraction of the XML Schema types embedded in `<types>`
//!
//! Only the first `types` element is read. For each `schema` in it, complex
//! types come first, then simple types, then top-level elements, each group
//! in document order. Nested model groups are flattened into a single field
//! list; anonymous nested types are not expanded but referenced through an
//! `inline-<field>` sentinel type name.

use super::model::{MaxOccurs, TypeKind, WsdlRestriction, WsdlType, WsdlTypeField};
use super::parser::{documentation, name_or, ParseContext};
use super::wsdl_attrs as attrs;
use super::wsdl_elements as elems;

use crate::documents::Element;

/// Type reference used for wildcards and untyped elements
const ANY_TYPE: &str = "any";

/// Type of an attribute declared without `type`
const DEFAULT_ATTRIBUTE_TYPE: &str = "string";

/// First model group of `parent`: `sequence`, else `all`, else `choice`.
fn field_container(parent: &Element) -> Option<&Element> {
    parent
        .find_child(elems::SEQUENCE)
        .or_else(|| parent.find_child(elems::ALL))
        .or_else(|| parent.find_child(elems::CHOICE))
}

/// `extension`, else `restriction`, of a content model
fn derivation(content: &Element) -> Option<&Element> {
    content
        .find_child(elems::EXTENSION)
        .or_else(|| content.find_child(elems::RESTRICTION))
}

impl ParseContext {
    pub(crate) fn parse_types(&mut self, root: &Element) -> Vec<WsdlType> {
        let mut types = Vec::new();
        let Some(types_element) = root.find_child(elems::TYPES) else {
            return types;
        };

        for schema in types_element.find_children(elems::SCHEMA) {
            let namespace = schema.get_attribute(attrs::TARGET_NAMESPACE).unwrap_or("");

            for complex_type in schema.find_children(elems::COMPLEX_TYPE) {
                types.push(self.parse_complex_type(complex_type, namespace));
            }
            for simple_type in schema.find_children(elems::SIMPLE_TYPE) {
                types.push(self.parse_simple_type(simple_type, namespace));
            }
            for element in schema.find_children(elems::ELEMENT) {
                if let Some(parsed) = self.parse_element(element, namespace) {
                    types.push(parsed);
                }
            }
        }

        log::debug!("extracted {} schema types", types.len());
        types
    }

    fn parse_complex_type(&mut self, complex_type: &Element, namespace: &str) -> WsdlType {
        let mut fields = Vec::new();
        let mut base = None;

        if let Some(container) = field_container(complex_type) {
            fields.extend(self.parse_type_fields(container));
        }

        if let Some(content) = complex_type
            .find_child(elems::COMPLEX_CONTENT)
            .and_then(derivation)
        {
            if let Some(token) = content.non_empty_attribute(attrs::BASE) {
                base = Some(self.local_name(token));
            }
            if let Some(container) = field_container(content) {
                fields.extend(self.parse_type_fields(container));
            }
            fields.extend(self.parse_attributes(content));
        }

        if let Some(content) = complex_type
            .find_child(elems::SIMPLE_CONTENT)
            .and_then(derivation)
        {
            if let Some(token) = content.non_empty_attribute(attrs::BASE) {
                base = Some(self.local_name(token));
            }
            fields.extend(self.parse_attributes(content));
        }

        fields.extend(self.parse_attributes(complex_type));

        WsdlType {
            name: name_or(complex_type, "Anonymous"),
            kind: TypeKind::ComplexType,
            documentation: documentation(complex_type),
            namespace: namespace.to_string(),
            base,
            fields,
            restriction: None,
        }
    }

    /// Fields of a `sequence`/`all`/`choice`, nested groups flattened
    fn parse_type_fields(&mut self, container: &Element) -> Vec<WsdlTypeField> {
        let mut fields = Vec::new();

        for child in &container.children {
            match child.local_name() {
                elems::ELEMENT => {
                    if let Some(field) = self.parse_field_element(child) {
                        fields.push(field);
                    }
                }
                elems::SEQUENCE | elems::CHOICE | elems::ALL => {
                    fields.extend(self.parse_type_fields(child));
                }
                elems::ANY => {
                    let min_occurs = self.min_occurs(child, ANY_TYPE);
                    fields.push(WsdlTypeField {
                        name: ANY_TYPE.to_string(),
                        type_: ANY_TYPE.to_string(),
                        min_occurs,
                        max_occurs: self.max_occurs(child, ANY_TYPE),
                        documentation: String::new(),
                        is_attribute: false,
                        is_optional: min_occurs == 0,
                    });
                }
                _ => {}
            }
        }

        fields
    }

    fn parse_field_element(&mut self, element: &Element) -> Option<WsdlTypeField> {
        let token = element
            .non_empty_attribute(attrs::NAME)
            .or_else(|| element.non_empty_attribute(attrs::REF))?;
        let name = self.local_name(token);

        let type_ = match element.non_empty_attribute(attrs::TYPE) {
            Some(token) => self.local_name(token),
            None if element.find_child(elems::COMPLEX_TYPE).is_some()
                || element.find_child(elems::SIMPLE_TYPE).is_some() =>
            {
                format!("inline-{}", name)
            }
            None => ANY_TYPE.to_string(),
        };

        let min_occurs = self.min_occurs(element, &name);
        let max_occurs = self.max_occurs(element, &name);
        log::trace!("field {}: {} [{}..{}]", name, type_, min_occurs, max_occurs);

        Some(WsdlTypeField {
            documentation: documentation(element),
            is_attribute: false,
            is_optional: min_occurs == 0,
            name,
            type_,
            min_occurs,
            max_occurs,
        })
    }

    /// `attribute` children of `parent` as attribute fields
    fn parse_attributes(&self, parent: &Element) -> Vec<WsdlTypeField> {
        parent
            .find_children(elems::ATTRIBUTE)
            .filter_map(|attribute| {
                let token = attribute
                    .non_empty_attribute(attrs::NAME)
                    .or_else(|| attribute.non_empty_attribute(attrs::REF))?;
                let required = attribute.get_attribute(attrs::USE) == Some("required");

                Some(WsdlTypeField {
                    name: self.local_name(token),
                    type_: attribute
                        .non_empty_attribute(attrs::TYPE)
                        .map(|t| self.local_name(t))
                        .unwrap_or_else(|| DEFAULT_ATTRIBUTE_TYPE.to_string()),
                    min_occurs: u32::from(required),
                    max_occurs: MaxOccurs::Bounded(1),
                    documentation: documentation(attribute),
                    is_attribute: true,
                    is_optional: !required,
                })
            })
            .collect()
    }

    fn parse_simple_type(&mut self, simple_type: &Element, namespace: &str) -> WsdlType {
        let name = name_or(simple_type, "Anonymous");
        let mut base = None;
        let mut restriction = None;

        if let Some(restriction_element) = simple_type.find_child(elems::RESTRICTION) {
            base = restriction_element
                .non_empty_attribute(attrs::BASE)
                .map(|token| self.local_name(token));
            let restriction_base = base.as_deref().unwrap_or(DEFAULT_ATTRIBUTE_TYPE).to_string();
            restriction = Some(self.parse_restriction(restriction_element, restriction_base, &name));
        }

        if let Some(member_types) = simple_type
            .find_child(elems::UNION)
            .and_then(|union| union.non_empty_attribute(attrs::MEMBER_TYPES))
        {
            let members: Vec<String> = member_types
                .split_whitespace()
                .map(|token| self.local_name(token))
                .collect();
            base = Some(format!("union({})", members.join(", ")));
        }

        if let Some(item_type) = simple_type
            .find_child(elems::LIST)
            .and_then(|list| list.non_empty_attribute(attrs::ITEM_TYPE))
        {
            base = Some(format!("list({})", self.local_name(item_type)));
        }

        WsdlType {
            documentation: documentation(simple_type),
            name,
            kind: TypeKind::SimpleType,
            namespace: namespace.to_string(),
            base,
            fields: Vec::new(),
            restriction,
        }
    }

    fn parse_restriction(
        &mut self,
        restriction: &Element,
        base: String,
        type_name: &str,
    ) -> WsdlRestriction {
        let mut result = WsdlRestriction {
            base,
            ..WsdlRestriction::default()
        };

        for facet in &restriction.children {
            let value = facet.non_empty_attribute(attrs::VALUE);
            match facet.local_name() {
                elems::ENUMERATION => {
                    let values = result.enumeration.get_or_insert_with(Vec::new);
                    if let Some(value) = value {
                        values.push(value.to_string());
                    }
                }
                elems::MIN_LENGTH => {
                    if let Some(value) = value {
                        result.min_length = self.parse_length(value, elems::MIN_LENGTH, type_name);
                    }
                }
                elems::MAX_LENGTH => {
                    if let Some(value) = value {
                        result.max_length = self.parse_length(value, elems::MAX_LENGTH, type_name);
                    }
                }
                elems::PATTERN => {
                    if let Some(value) = value {
                        result.pattern = Some(value.to_string());
                    }
                }
                elems::MIN_INCLUSIVE => result.min_inclusive = value.map(str::to_string),
                elems::MAX_INCLUSIVE => result.max_inclusive = value.map(str::to_string),
                elems::MIN_EXCLUSIVE => result.min_exclusive = value.map(str::to_string),
                elems::MAX_EXCLUSIVE => result.max_exclusive = value.map(str::to_string),
                _ => {}
            }
        }

        result
    }

    /// A top-level `element`; `None` when it neither defines nor references a type
    fn parse_element(&mut self, element: &Element, namespace: &str) -> Option<WsdlType> {
        let name = element.non_empty_attribute(attrs::NAME)?.to_string();

        let inline = if let Some(complex_type) = element.find_child(elems::COMPLEX_TYPE) {
            Some(self.parse_complex_type(complex_type, namespace))
        } else {
            element
                .find_child(elems::SIMPLE_TYPE)
                .map(|simple_type| self.parse_simple_type(simple_type, namespace))
        };

        if let Some(mut parsed) = inline {
            parsed.name = name;
            parsed.kind = TypeKind::Element;
            if parsed.documentation.is_empty() {
                parsed.documentation = documentation(element);
            }
            return Some(parsed);
        }

        let type_ref = element.non_empty_attribute(attrs::TYPE)?;
        Some(WsdlType {
            name,
            kind: TypeKind::Element,
            documentation: documentation(element),
            namespace: namespace.to_string(),
            base: Some(self.local_name(type_ref)),
            fields: Vec::new(),
            restriction: None,
        })
    }

    fn min_occurs(&mut self, element: &Element, field: &str) -> u32 {
        match element.non_empty_attribute(attrs::MIN_OCCURS) {
            None => 1,
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                self.warn(format!(
                    "Invalid minOccurs \"{}\" on \"{}\", using 1",
                    value, field
                ));
                1
            }),
        }
    }

    fn max_occurs(&mut self, element: &Element, field: &str) -> MaxOccurs {
        match element.non_empty_attribute(attrs::MAX_OCCURS).map(str::trim) {
            None => MaxOccurs::Bounded(1),
            Some("unbounded") => MaxOccurs::Unbounded,
            Some(value) => match value.parse() {
                Ok(n) => MaxOccurs::Bounded(n),
                Err(_) => {
                    self.warn(format!(
                        "Invalid maxOccurs \"{}\" on \"{}\", using 1",
                        value, field
                    ));
                    MaxOccurs::Bounded(1)
                }
            },
        }
    }

    fn parse_length(&mut self, value: &str, facet: &str, type_name: &str) -> Option<u64> {
        match value.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                self.warn(format!(
                    "Invalid {} \"{}\" on \"{}\", facet ignored",
                    facet, value, type_name
                ));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::wsdl::{parse_wsdl, MaxOccurs, TypeKind, WsdlType, WsdlTypeField};

    fn types_of(schema_body: &str) -> Vec<WsdlType> {
        let xml = format!(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
                    xmlns:xs="http://www.w3.org/2001/XMLSchema"
                    xmlns:tns="urn:shop">
                <types>
                    <xs:schema targetNamespace="urn:shop">{}</xs:schema>
                </types>
            </definitions>"#,
            schema_body
        );
        parse_wsdl(&xml).document().unwrap().types.clone()
    }

    fn field(name: &str, type_: &str, min_occurs: u32, max_occurs: MaxOccurs) -> WsdlTypeField {
        WsdlTypeField {
            name: name.to_string(),
            type_: type_.to_string(),
            min_occurs,
            max_occurs,
            documentation: String::new(),
            is_attribute: false,
            is_optional: min_occurs == 0,
        }
    }

    #[test]
    fn test_optional_sequence_field() {
        let types = types_of(
            r#"<xs:complexType name="T">
                <xs:sequence><xs:element name="a" type="xs:string" minOccurs="0"/></xs:sequence>
            </xs:complexType>"#,
        );

        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "T");
        assert_eq!(types[0].kind, TypeKind::ComplexType);
        assert_eq!(types[0].namespace, "urn:shop");
        assert_eq!(types[0].fields, vec![field("a", "string", 0, MaxOccurs::Bounded(1))]);
        assert!(types[0].fields[0].is_optional);
    }

    #[test]
    fn test_nested_groups_are_flattened() {
        let types = types_of(
            r#"<xs:complexType name="Item">
                <xs:annotation><xs:documentation>A cart item</xs:documentation></xs:annotation>
                <xs:sequence>
                    <xs:element name="sku" type="xs:string"/>
                    <xs:choice>
                        <xs:element name="qty" type="xs:int" maxOccurs="5"/>
                        <xs:sequence>
                            <xs:element ref="tns:weight"/>
                        </xs:sequence>
                    </xs:choice>
                    <xs:element name="options" maxOccurs="unbounded">
                        <xs:complexType><xs:sequence/></xs:complexType>
                    </xs:element>
                    <xs:any minOccurs="0" maxOccurs="unbounded"/>
                    <xs:element type="xs:string"/>
                </xs:sequence>
            </xs:complexType>"#,
        );

        let item = &types[0];
        assert_eq!(item.documentation, "A cart item");
        assert_eq!(
            item.fields,
            vec![
                field("sku", "string", 1, MaxOccurs::Bounded(1)),
                field("qty", "int", 1, MaxOccurs::Bounded(5)),
                field("weight", "any", 1, MaxOccurs::Bounded(1)),
                field("options", "inline-options", 1, MaxOccurs::Unbounded),
                field("any", "any", 0, MaxOccurs::Unbounded),
            ]
        );
    }

    #[test]
    fn test_container_precedence() {
        let types = types_of(
            r#"<xs:complexType name="Odd">
                <xs:choice><xs:element name="fromChoice" type="xs:string"/></xs:choice>
                <xs:all><xs:element name="fromAll" type="xs:string"/></xs:all>
                <xs:sequence><xs:element name="fromSequence" type="xs:string"/></xs:sequence>
            </xs:complexType>"#,
        );
        let names: Vec<_> = types[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["fromSequence"]);
    }

    #[test]
    fn test_complex_content_extension() {
        let types = types_of(
            r#"<xs:complexType name="Book">
                <xs:complexContent>
                    <xs:extension base="tns:Product">
                        <xs:sequence><xs:element name="isbn" type="xs:string"/></xs:sequence>
                        <xs:attribute name="edition" type="xs:int"/>
                    </xs:extension>
                </xs:complexContent>
                <xs:attribute name="id" type="xs:ID" use="required"/>
            </xs:complexType>"#,
        );

        let book = &types[0];
        assert_eq!(book.base.as_deref(), Some("Product"));
        assert_eq!(book.fields.len(), 3);
        assert_eq!(book.fields[0].name, "isbn");

        let edition = &book.fields[1];
        assert!(edition.is_attribute);
        assert!(edition.is_optional);
        assert_eq!(edition.min_occurs, 0);
        assert_eq!(edition.type_, "int");

        let id = &book.fields[2];
        assert!(id.is_attribute);
        assert!(!id.is_optional);
        assert_eq!(id.min_occurs, 1);
        assert_eq!(id.max_occurs, MaxOccurs::Bounded(1));
    }

    #[test]
    fn test_simple_content_extension() {
        let types = types_of(
            r#"<xs:complexType name="Price">
                <xs:simpleContent>
                    <xs:extension base="xs:decimal">
                        <xs:attribute name="currency"/>
                    </xs:extension>
                </xs:simpleContent>
            </xs:complexType>"#,
        );

        let price = &types[0];
        assert_eq!(price.base.as_deref(), Some("decimal"));
        assert_eq!(price.fields.len(), 1);
        assert_eq!(price.fields[0].name, "currency");
        assert_eq!(price.fields[0].type_, "string");
        assert!(price.fields[0].is_attribute);
    }

    #[test]
    fn test_enumeration_restriction() {
        let types = types_of(
            r#"<xs:simpleType name="Color">
                <xs:restriction base="xs:string">
                    <xs:enumeration value="X"/>
                    <xs:enumeration value="Y"/>
                </xs:restriction>
            </xs:simpleType>"#,
        );

        let color = &types[0];
        assert_eq!(color.kind, TypeKind::SimpleType);
        assert_eq!(color.base.as_deref(), Some("string"));
        let restriction = color.restriction.as_ref().unwrap();
        assert_eq!(restriction.base, "string");
        assert_eq!(
            restriction.enumeration,
            Some(vec!["X".to_string(), "Y".to_string()])
        );
        assert!(color.fields.is_empty());
    }

    #[test]
    fn test_length_and_range_facets() {
        let types = types_of(
            r#"<xs:simpleType name="Code">
                <xs:restriction base="xs:string">
                    <xs:minLength value="2"/>
                    <xs:maxLength value="8"/>
                    <xs:pattern value="[A-Z]+"/>
                </xs:restriction>
            </xs:simpleType>
            <xs:simpleType name="Percent">
                <xs:restriction base="xs:decimal">
                    <xs:minInclusive value="0"/>
                    <xs:maxExclusive value="100.5"/>
                </xs:restriction>
            </xs:simpleType>"#,
        );

        let code = types[0].restriction.as_ref().unwrap();
        assert_eq!(code.min_length, Some(2));
        assert_eq!(code.max_length, Some(8));
        assert_eq!(code.pattern.as_deref(), Some("[A-Z]+"));
        assert_eq!(code.enumeration, None);

        let percent = types[1].restriction.as_ref().unwrap();
        assert_eq!(percent.base, "decimal");
        assert_eq!(percent.min_inclusive.as_deref(), Some("0"));
        assert_eq!(percent.max_exclusive.as_deref(), Some("100.5"));
        assert_eq!(percent.max_inclusive, None);
    }

    #[test]
    fn test_restriction_without_base() {
        let types = types_of(
            r#"<xs:simpleType name="Loose"><xs:restriction/></xs:simpleType>"#,
        );
        assert_eq!(types[0].base, None);
        assert_eq!(types[0].restriction.as_ref().unwrap().base, "string");
    }

    #[test]
    fn test_union_and_list() {
        let types = types_of(
            r#"<xs:simpleType name="IdOrName">
                <xs:union memberTypes="xs:int tns:Name"/>
            </xs:simpleType>
            <xs:simpleType name="Sizes">
                <xs:list itemType="xs:int"/>
            </xs:simpleType>"#,
        );
        assert_eq!(types[0].base.as_deref(), Some("union(int, Name)"));
        assert_eq!(types[0].restriction, None);
        assert_eq!(types[1].base.as_deref(), Some("list(int)"));
    }

    #[test]
    fn test_top_level_elements() {
        let types = types_of(
            r#"<xs:element name="Order">
                <xs:annotation><xs:documentation>An order</xs:documentation></xs:annotation>
                <xs:complexType>
                    <xs:sequence><xs:element name="id" type="xs:long"/></xs:sequence>
                </xs:complexType>
            </xs:element>
            <xs:element name="Status">
                <xs:simpleType><xs:restriction base="xs:string"/></xs:simpleType>
            </xs:element>
            <xs:element name="Customer" type="tns:CustomerType"/>
            <xs:element name="Nothing"/>"#,
        );

        assert_eq!(types.len(), 3);

        let order = &types[0];
        assert_eq!(order.name, "Order");
        assert_eq!(order.kind, TypeKind::Element);
        assert_eq!(order.documentation, "An order");
        assert_eq!(order.fields[0].type_, "long");

        let status = &types[1];
        assert_eq!(status.kind, TypeKind::Element);
        assert_eq!(status.base.as_deref(), Some("string"));
        assert!(status.restriction.is_some());

        let customer = &types[2];
        assert_eq!(customer.kind, TypeKind::Element);
        assert_eq!(customer.base.as_deref(), Some("CustomerType"));
        assert!(customer.fields.is_empty());
    }

    #[test]
    fn test_types_grouped_by_kind_per_schema() {
        let types = types_of(
            r#"<xs:element name="E" type="xs:string"/>
            <xs:simpleType name="S"><xs:restriction base="xs:string"/></xs:simpleType>
            <xs:complexType name="C"/>"#,
        );
        let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["C", "S", "E"]);
    }

    #[test]
    fn test_invalid_occurs_produce_warnings() {
        let xml = r#"<definitions xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <types><xs:schema>
                <xs:complexType name="T"><xs:sequence>
                    <xs:element name="a" type="xs:string" minOccurs="-1" maxOccurs="many"/>
                </xs:sequence></xs:complexType>
            </xs:schema></types>
        </definitions>"#;

        let result = parse_wsdl(xml);
        assert!(result.is_success());
        assert_eq!(result.warnings().len(), 2);

        let field = &result.document().unwrap().types[0].fields[0];
        assert_eq!(field.min_occurs, 1);
        assert_eq!(field.max_occurs, MaxOccurs::Bounded(1));
    }

    #[test]
    fn test_no_types_section() {
        let result = parse_wsdl("<definitions/>");
        assert!(result.document().unwrap().types.is_empty());
    }
}
