//! Where XMI documents come from.

use std::path::{Path, PathBuf};

use crate::error::InvalidXmlError;
use crate::xml::XmlTree;

/// Supplier of a parsed XML tree.
pub trait XmlSource {
    /// Read and parse the whole document.
    fn read_tree(&self) -> Result<XmlTree, InvalidXmlError>;

    /// Backing file, for file-based sources.
    fn path(&self) -> Option<&Path> {
        None
    }
}

/// Document stored on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl XmlSource for FileSource {
    fn read_tree(&self) -> Result<XmlTree, InvalidXmlError> {
        let bytes = std::fs::read(&self.path).map_err(|source| InvalidXmlError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(XmlTree::parse(&bytes)?)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Document held in memory.
#[derive(Clone, Debug)]
pub struct StringSource {
    text: String,
}

impl StringSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl XmlSource for StringSource {
    fn read_tree(&self) -> Result<XmlTree, InvalidXmlError> {
        Ok(XmlTree::parse_str(&self.text)?)
    }
}
