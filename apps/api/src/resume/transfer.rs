//! JSON backup export/import.
//!
//! The backup file has exactly the persisted shape, pretty-printed. Import
//! accepts any subset of fields and never applies anything on failure.

use serde::Serialize;
use thiserror::Error;

use crate::models::resume::ResumeDocument;
use crate::resume::merge::merge_over_default;
use crate::resume::validation::{validate, ValidationPolicy, ValidationResult};

const FALLBACK_STEM: &str = "backup";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Could not read the JSON file; check that the format is correct ({0})")]
    Malformed(String),

    #[error("The selected file does not look like a valid resume backup")]
    NotAnObject,
}

/// What an import would produce, shown before the user confirms it.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPreview {
    pub document: ResumeDocument,
    pub validation: ValidationResult,
}

pub fn export_json(document: &ResumeDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// Parses a backup and merges it over the default document.
pub fn parse_import(text: &str) -> Result<ResumeDocument, ImportError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;
    merge_over_default(&value).ok_or(ImportError::NotAnObject)
}

pub fn preview_import(text: &str, policy: &ValidationPolicy) -> Result<ImportPreview, ImportError> {
    let document = parse_import(text)?;
    let validation = validate(&document, policy);
    Ok(ImportPreview {
        document,
        validation,
    })
}

/// `resume-<full_name>.<extension>` with whitespace runs as `_`, lowercased.
pub fn export_file_name(document: &ResumeDocument, extension: &str) -> String {
    format!("resume-{}.{extension}", file_stem(&document.full_name))
}

fn file_stem(full_name: &str) -> String {
    let mut stem = String::with_capacity(full_name.len());
    let mut in_space = false;
    for c in full_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        // Keep the name usable inside a Content-Disposition header and on disk.
        if c.is_control() || matches!(c, '"' | '/' | '\\') {
            continue;
        }
        stem.extend(c.to_lowercase());
    }

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}
