//! Limits applied while loading WSDL documents
//!
//! WSDL files are frequently fetched from third parties, so the loader and
//! the element tree builder refuse inputs that are unreasonably large or
//! deep instead of exhausting memory or the stack.

use crate::error::{Error, Result};

/// Resource limits for loading and parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth of XML elements
    pub max_xml_depth: usize,

    /// Maximum document size in bytes
    pub max_xml_size: usize,

    /// Maximum number of XML nodes the tokenizer may produce
    pub max_nodes: u32,

    /// Whether a DOCTYPE declaration is accepted. Entity expansion stays
    /// bounded by the tokenizer either way.
    pub allow_dtd: bool,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 256,
            max_xml_size: 64 * 1024 * 1024, // 64 MB
            max_nodes: 4_000_000,
            allow_dtd: true,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 64,
            max_xml_size: 10 * 1024 * 1024, // 10 MB
            max_nodes: 500_000,
            allow_dtd: false,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_xml_depth: 2048,
            max_xml_size: 1024 * 1024 * 1024, // 1 GB
            max_nodes: u32::MAX,
            allow_dtd: true,
        }
    }

    /// Check if XML depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if XML size is within limits
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        if size > self.max_xml_size {
            Err(Error::LimitExceeded(format!(
                "XML size {} bytes exceeds maximum {} bytes",
                size, self.max_xml_size
            )))
        } else {
            Ok(())
        }
    }

    /// Tokenizer options derived from these limits
    pub(crate) fn parsing_options(&self) -> roxmltree::ParsingOptions {
        let mut options = roxmltree::ParsingOptions::default();
        options.allow_dtd = self.allow_dtd;
        options.nodes_limit = self.max_nodes;
        options
    }
}
