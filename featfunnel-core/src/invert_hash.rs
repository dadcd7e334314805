//! Hash inversion: map opaque feature hashes back to readable feature names.
//!
//! Invert hash files carry a header, a `:0` marker line, and then one
//! `name:hash:weight` line per feature. Lines with any other shape are ignored.

use crate::diagnostics::{Diagnostic, SectionSource};
use crate::error::{FunnelError, read_to_string};
use crate::section::{offset_after_line, payload_lines};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SECTION_MARKER: &str = ":0";

/// Feature hash -> raw feature name. The first mapping seen for a hash wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashInversion {
    names: HashMap<String, String>,
}

impl HashInversion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one mapping from every listed file, in order.
    pub fn from_files(
        paths: &[PathBuf],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self, FunnelError> {
        let mut inversion = Self::new();
        for path in paths {
            let text = read_to_string(path)?;
            inversion.add_text(path, &text, diagnostics)?;
        }
        debug!(files = paths.len(), hashes = inversion.len(), "Loaded hash inversion");
        Ok(inversion)
    }

    /// Merge the contents of one invert hash file.
    pub fn add_text(
        &mut self,
        path: &Path,
        text: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), FunnelError> {
        let start = offset_after_line(text, 0, SECTION_MARKER)
            .ok_or_else(|| FunnelError::malformed_invert_hash(path))?;

        let Some(lines) = payload_lines(&text[start..]) else {
            let diagnostic = Diagnostic::EmptyFeatureSection {
                path: path.to_path_buf(),
                source: SectionSource::InvertHash,
            };
            warn!("{diagnostic}");
            diagnostics.push(diagnostic);
            return Ok(());
        };

        for line in lines {
            let fields: Vec<&str> = line.split(':').collect();
            if let [name, hash, _weight] = fields.as_slice() {
                self.insert_first(hash, name);
            }
        }
        Ok(())
    }

    /// Record `hash -> name` unless the hash is already mapped. Returns whether it was inserted.
    pub fn insert_first(&mut self, hash: &str, name: &str) -> bool {
        match self.names.entry(hash.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(name.to_string());
                true
            }
        }
    }

    pub fn get(&self, hash: &str) -> Option<&str> {
        self.names.get(hash).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
