//! Configuration options for a migration run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::book::columns;

/// Options controlling a migration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationOptions {
    /// Columns excluded from whitespace normalization.
    ///
    /// Defaults to the identifier-like columns (`id`, `edition`, `volume`),
    /// whose values may be numeric or formatting-significant.
    pub protected_columns: BTreeSet<String>,

    /// Run every stage and the validator, but never commit the output.
    pub dry_run: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            protected_columns: columns::PROTECTED
                .iter()
                .map(|column| (*column).to_string())
                .collect(),
            dry_run: false,
        }
    }
}

impl MigrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, enable: bool) -> Self {
        self.dry_run = enable;
        self
    }

    pub fn with_protected_column(mut self, column: impl Into<String>) -> Self {
        self.protected_columns.insert(column.into());
        self
    }

    pub fn is_protected(&self, column: &str) -> bool {
        self.protected_columns.contains(column)
    }
}
