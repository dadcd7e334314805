//! Readable model parsing.
//!
//! A readable model dump is a header followed by a weights section. Two layouts
//! are recognised:
//!
//! ```text
//! :1                  :0
//! ...                 ...
//! current_pass 1      :0
//! 1234:0.25           1234:0.25
//! 5678:-0.5           5678:-0.5
//! ```
//!
//! Each weight line is `hash:weight[:...]`. Hashes are resolved through a
//! [`HashInversion`]; unresolved ones are skipped with a diagnostic.

use crate::diagnostics::{Diagnostic, SectionSource};
use crate::error::{FunnelError, read_to_string};
use crate::invert_hash::HashInversion;
use crate::section::payload_lines;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const RESUME_MARKER: &str = ":1";
const PLAIN_MARKER: &str = ":0";
const PASS_HEADER: &str = "current_pass 1";

/// Where the line scanner is inside a model dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Looking for a `:1` or `:0` line.
    SeekingMarker,
    /// Saw `:1`; looking for `current_pass 1`.
    SeekingPassHeader,
    /// Saw `:0`; looking for the closing `:0`.
    SeekingSectionEnd,
    /// Weight lines start at this byte offset.
    InPayload { start: usize },
}

/// Features recovered from one readable model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFeatures {
    pub path: PathBuf,
    /// Raw feature names in dump order.
    pub features: Vec<String>,
    /// Number of weight lines whose hash could not be resolved.
    pub unresolved: usize,
}

/// Read and parse one readable model file.
pub fn extract_features(
    path: &Path,
    inversion: &HashInversion,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ModelFeatures, FunnelError> {
    let text = read_to_string(path)?;
    parse_features(path, &text, inversion, diagnostics)
}

/// Parse readable model text that was read from `path`.
pub fn parse_features(
    path: &Path,
    text: &str,
    inversion: &HashInversion,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ModelFeatures, FunnelError> {
    let start = locate_payload(path, text)?;
    let mut result = ModelFeatures {
        path: path.to_path_buf(),
        features: Vec::new(),
        unresolved: 0,
    };

    let Some(lines) = payload_lines(&text[start..]) else {
        let diagnostic = Diagnostic::EmptyFeatureSection {
            path: path.to_path_buf(),
            source: SectionSource::ReadableModel,
        };
        warn!("{diagnostic}");
        diagnostics.push(diagnostic);
        return Ok(result);
    };

    for line in lines {
        let hash = line.split(':').next().unwrap_or_default();
        match inversion.get(hash) {
            Some(name) => result.features.push(name.to_string()),
            None => {
                let diagnostic = Diagnostic::MissingHashValue {
                    path: path.to_path_buf(),
                    hash: hash.to_string(),
                };
                warn!("{diagnostic}");
                diagnostics.push(diagnostic);
                result.unresolved += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        features = result.features.len(),
        unresolved = result.unresolved,
        "Extracted model features"
    );
    Ok(result)
}

/// Run the section scanner and return the byte offset of the first weight line.
fn locate_payload(path: &Path, text: &str) -> Result<usize, FunnelError> {
    let mut state = ParseState::SeekingMarker;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        offset += line.len();
        let line = line.trim();
        state = match state {
            ParseState::SeekingMarker if line == RESUME_MARKER => ParseState::SeekingPassHeader,
            ParseState::SeekingMarker if line == PLAIN_MARKER => ParseState::SeekingSectionEnd,
            ParseState::SeekingPassHeader if line == PASS_HEADER => {
                ParseState::InPayload { start: offset }
            }
            ParseState::SeekingSectionEnd if line == PLAIN_MARKER => {
                ParseState::InPayload { start: offset }
            }
            other => other,
        };
        if let ParseState::InPayload { start } = state {
            return Ok(start);
        }
    }

    let reason = match state {
        ParseState::SeekingMarker => "no ':1' or ':0' section marker".to_string(),
        ParseState::SeekingPassHeader => format!("':1' section without a '{PASS_HEADER}' line"),
        ParseState::SeekingSectionEnd => "':0' section without a closing ':0' line".to_string(),
        ParseState::InPayload { .. } => unreachable!("payload start returns early"),
    };
    Err(FunnelError::malformed_model(path, reason))
}
