//! Error types for wsdl
//!
//! Internal stages of the parser return [`Result`]; the public
//! [`WsdlParser::parse`](crate::wsdl::WsdlParser::parse) entry point turns any
//! of these into the error list of a failed
//! [`ParseResult`](crate::wsdl::ParseResult).

use thiserror::Error;

/// Result type alias using the wsdl Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wsdl operations
#[derive(Error, Debug)]
pub enum Error {
    /// The text is not well-formed XML
    #[error("{0}")]
    Xml(String),

    /// The document contains no root element
    #[error("No root element found in document")]
    NoRootElement,

    /// The root element is neither a WSDL 1.1 nor a WSDL 2.0 root
    #[error(
        "Invalid WSDL document: root element is \"{found}\", expected \"definitions\" or \"description\""
    )]
    InvalidRoot {
        /// Local name of the root element that was found
        found: String,
    },

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Human-readable sentence reported in a failed parse result.
    pub fn to_parse_message(&self) -> String {
        match self {
            Error::Xml(diagnostic) => format!("XML Parse Error: {}", diagnostic),
            Error::NoRootElement | Error::InvalidRoot { .. } => self.to_string(),
            other => format!("Unexpected error: {}", other),
        }
    }
}
