//! Resource loading utilities
//!
//! WSDL text reaches the parser from a file, a URL or memory. [`Location`]
//! names the source and [`Loader`] turns it into text, applying the size
//! limit before anything is parsed.

use crate::error::{Error, Result};
use crate::limits::Limits;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Where a WSDL document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (`file`, `http`, `https`, ...)
    Url(Url),
    /// In-memory document text
    String(String),
}

impl Location {
    /// Classify a user supplied string.
    ///
    /// Anything starting with `<` is document text, anything with a URL
    /// scheme is a URL, everything else a path.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim_start();
        if trimmed.starts_with('<') {
            return Ok(Location::String(s.to_string()));
        }

        match Url::parse(trimmed) {
            // single-letter schemes are Windows drive letters
            Ok(url) if url.scheme().len() > 1 => Ok(Location::Url(url)),
            _ => Ok(Location::Path(PathBuf::from(trimmed))),
        }
    }

    /// Whether loading needs the network
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(url) if url.scheme() != "file")
    }

    /// Whether this is a local file
    pub fn is_file(&self) -> bool {
        match self {
            Location::Path(_) => true,
            Location::Url(url) => url.scheme() == "file",
            Location::String(_) => false,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(p) => write!(f, "{}", p.display()),
            Location::Url(u) => write!(f, "{}", u),
            Location::String(_) => f.write_str("<inline document>"),
        }
    }
}

/// Resource loader for WSDL documents.
///
/// Reads local files, `file` URLs and inline text. Every other URL scheme
/// is rejected with [`Error::Resource`]: there is no network client.
#[derive(Debug, Clone)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Load a resource as a string
    pub fn load(&self, location: &Location) -> Result<String> {
        log::debug!("loading {}", location);
        let content = match location {
            Location::Path(path) => fs::read_to_string(path).map_err(|e| {
                Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
            })?,
            Location::Url(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| Error::Resource(format!("Invalid file URL: {}", url)))?;
                return self.load(&Location::Path(path));
            }
            Location::Url(url) => {
                return Err(Error::Resource(format!(
                    "Unsupported URL scheme \"{}\": {}",
                    url.scheme(),
                    url
                )))
            }
            Location::String(s) => s.clone(),
        };

        self.limits.check_xml_size(content.len())?;
        Ok(content)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
