//! Display surfaces that receive rendered HTML documents.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{FederError, Result};

/// MIME type announced to notebook front ends.
pub const HTML_MIME: &str = "text/html";

/// Accepts an HTML document and shows or stores it.
pub trait DisplaySurface: Send {
    fn render(&self, html: &str) -> Result<()>;
}

/// Writes evcxr rich-output blocks.
///
/// See <https://github.com/evcxr/evcxr/blob/main/evcxr_jupyter/README.md#custom-output>.
pub struct EvcxrDisplay {
    out: Mutex<Box<dyn Write + Send>>,
}

impl EvcxrDisplay {
    /// Writes to process stdout, which evcxr captures.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for EvcxrDisplay {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for EvcxrDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvcxrDisplay").finish_non_exhaustive()
    }
}

impl DisplaySurface for EvcxrDisplay {
    fn render(&self, html: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| FederError::Display("evcxr writer poisoned".into()))?;
        write_evcxr(&mut *out, html)?;
        out.flush()?;
        Ok(())
    }
}

/// Writes `html` wrapped in the evcxr content markers.
pub fn write_evcxr(out: &mut dyn Write, html: &str) -> io::Result<()> {
    writeln!(out, "EVCXR_BEGIN_CONTENT {}", HTML_MIME)?;
    writeln!(out, "{}", html.trim_end())?;
    writeln!(out, "EVCXR_END_CONTENT")
}

/// Writes each document to a file, replacing earlier contents.
#[derive(Debug, Clone)]
pub struct HtmlFileDisplay {
    path: PathBuf,
}

impl HtmlFileDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplaySurface for HtmlFileDisplay {
    fn render(&self, html: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, html)?;
        tracing::debug!(path = %self.path.display(), bytes = html.len(), "wrote html document");
        Ok(())
    }
}

/// Keeps rendered documents in memory.
///
/// Clones share the same buffer, so a clone handed to a builder can be
/// inspected through any other clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    documents: Arc<Mutex<Vec<String>>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every document rendered so far, oldest first.
    pub fn documents(&self) -> Vec<String> {
        match self.documents.lock() {
            Ok(docs) => docs.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns the most recent document.
    pub fn last(&self) -> Option<String> {
        self.documents().pop()
    }
}

impl DisplaySurface for MemoryDisplay {
    fn render(&self, html: &str) -> Result<()> {
        self.documents
            .lock()
            .map_err(|_| FederError::Display("memory display poisoned".into()))?
            .push(html.to_string());
        Ok(())
    }
}
