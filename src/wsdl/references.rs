//! Reverse references: which operations use a message, and which messages,
//! operations and types use a type.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::model::WsdlDocument;
use super::operations::{get_message_by_name, OperationRecord};

/// Role of a message in an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Request message
    Input,
    /// Response message
    Output,
}

impl MessageRole {
    /// Lowercase name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::Input => "input",
            MessageRole::Output => "output",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation using a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReverseRef {
    /// Name of the operation
    pub operation_name: String,
    /// How the operation uses the message
    pub role: MessageRole,
}

/// Kind of entity referencing a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// A message part
    Message,
    /// An operation, through one of its messages
    Operation,
    /// Another type, as base or field type
    Type,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceKind::Message => "message",
            ReferenceKind::Operation => "operation",
            ReferenceKind::Type => "type",
        })
    }
}

/// An entity referencing a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReverseRef {
    /// Kind of the referencing entity
    pub kind: ReferenceKind,
    /// Name of the referencing entity
    pub name: String,
    /// `part: <name>`, `input`, `output`, `extends` or `field: <name>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Whether the reference goes through a message
    pub indirect: bool,
}

/// Map each message name to the operations using it, input before output
/// for every record.
pub fn message_reverse_refs(operations: &[OperationRecord]) -> IndexMap<String, Vec<MessageReverseRef>> {
    let mut refs: IndexMap<String, Vec<MessageReverseRef>> = IndexMap::new();

    for record in operations {
        let roles = [
            (record.input.as_ref(), MessageRole::Input),
            (record.output.as_ref(), MessageRole::Output),
        ];
        for (message, role) in roles {
            let Some(message) = message.filter(|m| !m.message.is_empty()) else {
                continue;
            };
            refs.entry(message.message.clone())
                .or_default()
                .push(MessageReverseRef {
                    operation_name: record.operation_name.clone(),
                    role,
                });
        }
    }

    refs
}

/// Collects references, skipping exact repeats
#[derive(Default)]
struct TypeRefCollector {
    refs: IndexMap<String, Vec<TypeReverseRef>>,
    seen: HashSet<(String, ReferenceKind, String, Option<String>)>,
}

impl TypeRefCollector {
    fn add(&mut self, target: &str, reference: TypeReverseRef) {
        if target.is_empty() {
            return;
        }
        let key = (
            target.to_string(),
            reference.kind,
            reference.name.clone(),
            reference.detail.clone(),
        );
        if self.seen.insert(key) {
            self.refs.entry(target.to_string()).or_default().push(reference);
        }
    }

    fn finish(mut self) -> IndexMap<String, Vec<TypeReverseRef>> {
        for list in self.refs.values_mut() {
            // stable: keeps discovery order within each group
            list.sort_by_key(|reference| reference.indirect);
        }
        self.refs
    }
}

/// Map each type name to the messages, operations and types referencing it.
///
/// Sources, in discovery order: message parts (both `element` and `type`),
/// operation input and output messages (one indirect reference per part,
/// `element` preferred over `type`), type bases and non-`any` field types.
/// Within each list direct references come before indirect ones.
pub fn type_reverse_refs(
    document: &WsdlDocument,
    operations: &[OperationRecord],
) -> IndexMap<String, Vec<TypeReverseRef>> {
    let mut collector = TypeRefCollector::default();

    for message in &document.messages {
        for part in &message.parts {
            let detail = format!("part: {}", part.name);
            for target in [&part.element, &part.type_].into_iter().flatten() {
                collector.add(
                    target,
                    TypeReverseRef {
                        kind: ReferenceKind::Message,
                        name: message.name.clone(),
                        detail: Some(detail.clone()),
                        indirect: false,
                    },
                );
            }
        }
    }

    for record in operations {
        let roles = [
            (record.input.as_ref(), MessageRole::Input),
            (record.output.as_ref(), MessageRole::Output),
        ];
        for (operation_message, role) in roles {
            let Some(message) =
                operation_message.and_then(|m| get_message_by_name(document, &m.message))
            else {
                continue;
            };
            for part in &message.parts {
                if let Some(target) = part.element.as_ref().or(part.type_.as_ref()) {
                    collector.add(
                        target,
                        TypeReverseRef {
                            kind: ReferenceKind::Operation,
                            name: record.operation_name.clone(),
                            detail: Some(role.as_str().to_string()),
                            indirect: true,
                        },
                    );
                }
            }
        }
    }

    for wsdl_type in &document.types {
        if let Some(base) = &wsdl_type.base {
            collector.add(
                base,
                TypeReverseRef {
                    kind: ReferenceKind::Type,
                    name: wsdl_type.name.clone(),
                    detail: Some("extends".to_string()),
                    indirect: false,
                },
            );
        }
        for field in wsdl_type.fields.iter().filter(|f| f.type_ != "any") {
            collector.add(
                &field.type_,
                TypeReverseRef {
                    kind: ReferenceKind::Type,
                    name: wsdl_type.name.clone(),
                    detail: Some(format!("field: {}", field.name)),
                    indirect: false,
                },
            );
        }
    }

    collector.finish()
}
