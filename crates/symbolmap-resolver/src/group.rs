//! Grouping of alias and previous symbols under their approved symbol.

use std::collections::HashMap;
use std::path::Path;

use symbolmap_common::{Result, SymbolMapError};
use tracing::debug;

use crate::tables::NomenclatureRecord;

/// An approved symbol and its alternates, all uppercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasGroup {
    pub approved: String,
    /// First-seen order, no duplicates.
    pub aliases: Vec<String>,
}

impl AliasGroup {
    fn new(approved: String) -> Self {
        Self { approved, aliases: Vec::new() }
    }

    /// Approved symbol first, then the aliases in recorded order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.approved.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Append unless already listed. Only the alias list is checked, so an
    /// alias equal to the approved symbol is still recorded.
    pub fn push_unique(&mut self, alias: String) -> bool {
        if self.aliases.contains(&alias) {
            return false;
        }
        self.aliases.push(alias);
        true
    }
}

/// Insertion-ordered map from approved symbol to its [`AliasGroup`].
#[derive(Debug, Clone, Default)]
pub struct AliasGroups {
    groups: Vec<AliasGroup>,
    index: HashMap<String, usize>,
}

impl AliasGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the cross-reference rows in file order.
    ///
    /// A group only comes into existence once a row supplies an alias or a
    /// previous symbol for it; rows with neither are ignored. `source` names
    /// the table in errors.
    pub fn from_records(records: &[NomenclatureRecord], source: &Path) -> Result<Self> {
        let mut groups = Self::new();
        let mut ignored = 0usize;

        for record in records {
            let mut alternates = record.alternates().map(str::to_uppercase).peekable();
            if alternates.peek().is_none() {
                ignored += 1;
                continue;
            }

            let approved = record.approved_symbol.as_deref().ok_or_else(|| {
                SymbolMapError::malformed(
                    source,
                    format!(
                        "line {}: empty `Approved symbol` on a row listing an alias or previous symbol",
                        record.line
                    ),
                )
            })?;

            let group = groups.get_or_create(&approved.to_uppercase());
            for alternate in alternates {
                group.push_unique(alternate);
            }
        }

        debug!(
            "Grouped {} rows into {} approved symbols ({} rows without alternates)",
            records.len(),
            groups.len(),
            ignored
        );
        Ok(groups)
    }

    /// Fetch the group for `approved`, appending an empty one if new.
    pub fn get_or_create(&mut self, approved: &str) -> &mut AliasGroup {
        let idx = match self.index.get(approved) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.groups.push(AliasGroup::new(approved.to_string()));
                self.index.insert(approved.to_string(), idx);
                idx
            }
        };
        &mut self.groups[idx]
    }

    pub fn get(&self, approved: &str) -> Option<&AliasGroup> {
        self.index.get(approved).map(|&idx| &self.groups[idx])
    }

    /// Groups in the order their approved symbol first appeared.
    pub fn iter(&self) -> impl Iterator<Item = &AliasGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }
}
