//! Document model and tokenizer adapter boundary.
//!
//! A document enters the pipeline either as a positioned token stream
//! (pdf.js-style dumps, positions available) or as raw PDF bytes, where
//! only embedded text can be recovered. In the second case the token
//! list stays empty and label-anchored resolution is skipped downstream.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// A positioned text token produced by document-to-text extraction.
///
/// Coordinates are page-relative; token order out of the adapter is not
/// guaranteed to be reading order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub page: u32,
}

/// One input document, reduced to tokens plus concatenated text.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source file name, used as the duplicate-detection key.
    pub pdf_name: String,
    /// Positioned tokens; empty when only plain text was available.
    pub tokens: Vec<Token>,
    /// Full text, tokens joined with spaces and pages with newlines.
    pub text: String,
}

impl Document {
    /// Build a document from a positioned token stream.
    pub fn from_tokens(pdf_name: impl Into<String>, tokens: Vec<Token>) -> Self {
        let mut text = String::new();
        let mut last_page = None;
        for token in &tokens {
            match last_page {
                None => {}
                Some(page) if page == token.page => text.push(' '),
                Some(_) => text.push('\n'),
            }
            text.push_str(&token.text);
            last_page = Some(token.page);
        }
        Self {
            pdf_name: pdf_name.into(),
            tokens,
            text,
        }
    }

    /// Parse a JSON token dump: an array of `{text, x, y, page}` objects.
    pub fn from_token_dump(
        pdf_name: impl Into<String>,
        data: &[u8],
    ) -> Result<Self, DocumentError> {
        let tokens: Vec<Token> =
            serde_json::from_slice(data).map_err(|e| DocumentError::TokenDump(e.to_string()))?;
        Ok(Self::from_tokens(pdf_name, tokens))
    }

    /// Extract the embedded text of a PDF.
    ///
    /// No positions are available on this path, so model and origin
    /// resolution degrade to the pure pattern pass.
    pub fn from_pdf_bytes(pdf_name: impl Into<String>, data: &[u8]) -> Result<Self, DocumentError> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(Self {
            pdf_name: pdf_name.into(),
            tokens: Vec::new(),
            text,
        })
    }

    /// Load a document from disk, picking the source by extension
    /// (`.pdf` for embedded text, `.json` for a token dump).
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string();
        let data = std::fs::read(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Ok(Self::from_pdf_bytes(name, &data)?),
            "json" => Ok(Self::from_token_dump(name, &data)?),
            other => Err(DocumentError::UnsupportedFormat(other.to_string()).into()),
        }
    }

    /// Whether positional resolution is possible for this document.
    pub fn has_positions(&self) -> bool {
        !self.tokens.is_empty()
    }
}
