//! Status text source: a file that is re-read every cycle, or fixed text.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::EncodeError;

/// Where the status text comes from. The file wins when it exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusSource {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub text: Option<String>,
}

impl StatusSource {
    pub fn is_configured(&self) -> bool {
        self.file.is_some() || self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Resolve the current status text.
///
/// A configured file that does not exist falls through to the literal text.
/// File contents are trimmed; literal text is used verbatim.
pub fn encode_status(source: &StatusSource) -> Result<String, EncodeError> {
    if let Some(path) = source.file.as_ref().filter(|p| p.exists()) {
        let text = fs::read_to_string(path)?;
        return Ok(text.trim().to_string());
    }
    match source.text.as_deref() {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(EncodeError::NotConfigured),
    }
}
