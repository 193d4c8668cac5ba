//! JSON documents read and written as whole files.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::io::{self, WriteOutcome};
use crate::{Error, Result};

/// Indentation unit of a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent(String);

impl Indent {
    pub fn tab() -> Self {
        Self("\t".to_string())
    }

    pub fn spaces(count: usize) -> Self {
        Self(" ".repeat(count))
    }

    /// Detects the indentation of a pretty-printed JSON text from the first
    /// indented line. Falls back to two spaces.
    pub fn detect(content: &str) -> Self {
        content
            .lines()
            .skip(1)
            .map(|line| {
                let trimmed = line.trim_start_matches([' ', '\t']);
                &line[..line.len() - trimmed.len()]
            })
            .find(|ws| !ws.is_empty())
            .map(|ws| {
                if ws.starts_with('\t') {
                    Self::tab()
                } else {
                    Self::spaces(ws.len())
                }
            })
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::spaces(2)
    }
}

/// A JSON file on disk together with the indentation it was written with.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
    indent: Indent,
    text: Option<String>,
}

impl JsonDocument {
    /// Opens `path`, remembering its content and indentation. A missing file
    /// is not an error; it simply has no content yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = io::read_text_if_exists(&path)?;
        let indent = text.as_deref().map(Indent::detect).unwrap_or_default();
        Ok(Self { path, indent, text })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the document into `T`.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let text = self.text.as_deref().ok_or_else(|| {
            Error::io(
                &self.path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            )
        })?;
        serde_json::from_str(text).map_err(|e| Error::JsonParse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Parses the document as an untyped value, keeping key order.
    pub fn load_value(&self) -> Result<Value> {
        self.load()
    }

    /// Renders `value` with this document's indentation and a trailing
    /// newline.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        render(value, &self.indent).map_err(|e| Error::JsonSerialize {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Renders and writes `value` unless the file already holds exactly
    /// that text.
    pub fn save_if_changed<T: Serialize>(&self, value: &T) -> Result<WriteOutcome> {
        let text = self.render(value)?;
        io::write_if_changed(&self.path, &text)
    }

    /// Renders and writes `value` unconditionally.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = self.render(value)?;
        io::write_atomic(&self.path, text.as_bytes())
    }
}

/// Pretty-prints `value` using `indent` and appends a trailing newline.
pub fn render<T: Serialize>(value: &T, indent: &Indent) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_str().as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
