//! XML namespace handling
//!
//! WSDL documents reference schema types, messages, bindings and port types
//! through qualified names such as `tns:GetQuoteRequest`. Everything in this
//! crate identifies those entities by their local name; the namespace URI is
//! kept only as extra information. Resolution is deliberately lenient: a
//! prefix that was never declared resolves to no namespace instead of an
//! error.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QName {
    /// Namespace URI (None for no namespace or an undeclared prefix)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for QName {
    /// Clark notation: `{uri}local`, or just `local` without a namespace
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// Split a qualified name token on its first colon.
pub fn split_qname(token: &str) -> (Option<&str>, &str) {
    match token.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, token),
    }
}

/// Prefix table captured from the root element of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI; the default namespace is stored
    /// under the empty prefix
    prefixes: HashMap<Prefix, NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from `(prefix, uri)` declarations of a root element
    pub fn from_declarations(declarations: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut ctx = Self::new();
        for (prefix, uri) in declarations {
            ctx.add_prefix(prefix, uri);
        }
        ctx
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.add_prefix("", namespace);
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.get_namespace("")
    }

    /// Number of registered prefixes, including the default namespace
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether no prefix has been registered
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Resolve a qualified name token.
    ///
    /// A token without a colon resolves to itself with no namespace; the
    /// default namespace is not applied. Otherwise the part before the first
    /// colon is looked up and the rest becomes the local name.
    pub fn resolve_qname(&self, token: &str) -> QName {
        match split_qname(token) {
            (Some(prefix), local) => QName {
                namespace: self.get_namespace(prefix).map(str::to_string),
                local_name: local.to_string(),
            },
            (None, local) => QName::local(local),
        }
    }
}
