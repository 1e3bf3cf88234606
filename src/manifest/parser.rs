use super::{LineKind, ReferenceEntry, ReferenceSet, classify};
use crate::store::FileStore;
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use tracing::{Level, debug, span, warn};

/// An existing manifest split around its owned section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    /// The manifest text exactly as read.
    pub original_text: String,
    /// `original_text` split on `\n`, carriage returns kept.
    pub original_lines: Vec<String>,
    /// Every line outside the owned section, prefix followed by suffix.
    pub retained_lines: Vec<String>,
    /// Position in `retained_lines` where the owned section belongs.
    pub section_index: usize,
    /// References declared inside the owned section, in file order.
    pub owned: ReferenceSet,
    /// References written by hand outside the owned section.
    pub user_references: HashSet<String>,
    /// Whether a start marker was found.
    pub has_section: bool,
}

impl ManifestDocument {
    /// Lines that precede the owned section.
    #[must_use]
    pub fn prefix(&self) -> &[String] {
        &self.retained_lines[..self.section_index]
    }

    /// Lines that follow the owned section.
    #[must_use]
    pub fn suffix(&self) -> &[String] {
        &self.retained_lines[self.section_index..]
    }

    /// Returns whether `path` is already declared, inside or outside the
    /// owned section.
    #[must_use]
    pub fn declares(&self, path: &str) -> bool {
        self.owned.contains(path) || self.user_references.contains(path)
    }
}

/// Scanner position relative to the owned section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeSection,
    InSection,
    AfterSection,
}

/// Reads and parses the manifest at `path`.
///
/// A missing manifest parses as an empty document whose section goes at
/// the start of the file.
///
/// # Errors
///
/// Returns an error if the manifest exists but cannot be read as UTF-8.
pub fn parse<S: FileStore + ?Sized>(store: &S, path: &Path) -> Result<ManifestDocument> {
    if !store.exists(path) {
        debug!(path = %path.display(), "Manifest does not exist yet");
        return Ok(ManifestDocument::default());
    }

    let text = store.read_to_string(path)?;
    Ok(parse_str(&text))
}

/// Parses manifest text.
///
/// Lines between the markers are dropped except for the directives they
/// declare. An end marker outside a section is an ordinary line. When the
/// file holds several sections their references are combined and the
/// regenerated section goes where the last one started. Without any start
/// marker the section goes after the last line.
#[must_use]
pub fn parse_str(text: &str) -> ManifestDocument {
    let span = span!(Level::DEBUG, "parse_manifest", bytes = text.len());
    let _guard = span.enter();

    let original_lines: Vec<String> = if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').map(str::to_string).collect()
    };

    let mut retained_lines = Vec::new();
    let mut owned = ReferenceSet::new();
    let mut user_references = HashSet::new();
    let mut section_index = None;
    let mut state = State::BeforeSection;

    for (number, raw) in original_lines.iter().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw.as_str());

        match (state, classify(line)) {
            (State::InSection, LineKind::EndMarker) => state = State::AfterSection,
            (State::InSection, LineKind::Directive(path)) => {
                owned.insert(ReferenceEntry {
                    path,
                    directive: line.to_string(),
                });
            }
            (State::InSection, LineKind::MalformedDirective) => {
                warn!(
                    line = number + 1,
                    text = line,
                    "Skipping malformed reference directive"
                );
            }
            (State::InSection, _) => {}
            (State::BeforeSection, LineKind::StartMarker) => {
                section_index = Some(retained_lines.len());
                state = State::InSection;
            }
            (State::AfterSection, LineKind::StartMarker) => {
                debug!(line = number + 1, "Moving owned section to a later start marker");
                section_index = Some(retained_lines.len());
                state = State::InSection;
            }
            (_, kind) => {
                if let LineKind::Directive(path) = kind {
                    user_references.insert(path);
                }
                retained_lines.push(line.to_string());
            }
        }
    }

    if state == State::InSection {
        warn!("Owned section has no end marker; it extends to the end of the manifest");
    }

    debug!(
        lines = original_lines.len(),
        owned = owned.len(),
        user = user_references.len(),
        "Parsed manifest"
    );

    ManifestDocument {
        original_text: text.to_string(),
        original_lines,
        section_index: section_index.unwrap_or(retained_lines.len()),
        has_section: section_index.is_some(),
        retained_lines,
        owned,
        user_references,
    }
}
