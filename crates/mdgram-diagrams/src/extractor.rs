//! Diagram extraction from block tokens.
//!
//! [`DiagramExtractor`] walks the tokens of one document and collects every
//! diagram-tagged code block whose source passes the keyword check. Each
//! accepted block becomes a [`DiagramRecord`] that remembers the ordinal of
//! the code block it came from, so the render pass can find it again.

use std::time::{SystemTime, UNIX_EPOCH};

use mdgram_renderer::Token;
use serde::Serialize;

use crate::consts::DIAGRAM_ID_PREFIX;
use crate::language::{DiagramType, is_diagram_alias};

/// Source of the uniqueness token embedded in diagram ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdSalt {
    /// Wall-clock milliseconds at the start of each extraction.
    #[default]
    Clock,
    /// Fixed value, for reproducible output.
    Fixed(u64),
}

impl IdSalt {
    fn resolve(self) -> u64 {
        match self {
            Self::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| {
                    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
                }),
            Self::Fixed(salt) => salt,
        }
    }
}

/// A validated, classified diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramRecord {
    /// Element id, `mermaid-diagram-{index}-{salt}`.
    pub id: String,
    /// Diagram source as written in the code block.
    pub code: String,
    pub diagram_type: DiagramType,
    /// Zero-based position among accepted diagrams.
    pub index: usize,
    /// Ordinal of the originating code block among all code blocks.
    pub block_index: usize,
}

/// Diagrams of one document in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramSet {
    records: Vec<DiagramRecord>,
}

impl DiagramSet {
    /// Look up the record extracted from the code block with the given ordinal.
    #[must_use]
    pub fn by_block(&self, block_index: usize) -> Option<&DiagramRecord> {
        self.records
            .binary_search_by_key(&block_index, |record| record.block_index)
            .ok()
            .map(|position| &self.records[position])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagramRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn records(&self) -> &[DiagramRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<DiagramRecord> {
        self.records
    }

    /// Drop all records so the set can be refilled for another document.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a DiagramSet {
    type Item = &'a DiagramRecord;
    type IntoIter = std::slice::Iter<'a, DiagramRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Extracts diagram records from block tokens.
///
/// Extraction never fails: blocks with empty source or without a recognized
/// leading keyword are skipped and only logged at debug level.
#[derive(Debug, Clone, Default)]
pub struct DiagramExtractor {
    salt: IdSalt,
}

impl DiagramExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id salt source.
    #[must_use]
    pub fn with_salt(mut self, salt: IdSalt) -> Self {
        self.salt = salt;
        self
    }

    /// Extract diagrams into a fresh set.
    #[must_use]
    pub fn extract(&self, tokens: &[Token]) -> DiagramSet {
        let mut set = DiagramSet::default();
        self.extract_into(tokens, &mut set);
        set
    }

    /// Extract diagrams into `set`, clearing whatever it held before.
    pub fn extract_into(&self, tokens: &[Token], set: &mut DiagramSet) {
        set.clear();
        let salt = self.salt.resolve();

        for code in tokens.iter().filter_map(Token::code) {
            let Some(language) = code.language.as_deref() else {
                continue;
            };
            if !is_diagram_alias(language) {
                continue;
            }

            let Some(diagram_type) = DiagramType::detect(&code.body) else {
                tracing::debug!(
                    block_index = code.index,
                    "Skipping diagram block without a recognized keyword"
                );
                continue;
            };

            let index = set.records.len();
            set.records.push(DiagramRecord {
                id: format!("{DIAGRAM_ID_PREFIX}-{index}-{salt}"),
                code: without_final_newline(&code.body).to_owned(),
                diagram_type,
                index,
                block_index: code.index,
            });
        }

        tracing::debug!(diagrams = set.len(), "Extracted diagrams");
    }
}

/// Drop the line ending that closes the last line of a fenced block body.
fn without_final_newline(body: &str) -> &str {
    body.strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(body)
}
