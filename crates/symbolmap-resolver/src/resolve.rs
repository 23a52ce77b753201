//! Reconciliation of alias groups against the exome list.
//!
//! For every group the first symbol (approved first, then aliases) present
//! in the exome list becomes the canonical symbol, and every other symbol of
//! the group maps to it. Groups with no member in the list are reported as
//! unresolved, symbol by symbol.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::group::{AliasGroup, AliasGroups};
use crate::tables::CanonicalExomeSet;

/// One `alias → canonical` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub alias: String,
    pub canonical: String,
}

/// A later group re-mapped an alias that an earlier group had already
/// mapped to a different canonical symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    pub alias: String,
    pub previous: String,
    pub replacement: String,
}

/// Insertion-ordered alias table.
///
/// Re-inserting a key replaces its value but keeps the position where the
/// key was first inserted.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    index: HashMap<String, usize>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the replaced canonical symbol, if any.
    pub fn insert(&mut self, alias: String, canonical: String) -> Option<String> {
        match self.index.get(&alias) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].canonical, canonical)),
            None => {
                self.index.insert(alias.clone(), self.entries.len());
                self.entries.push(AliasEntry { alias, canonical });
                None
            }
        }
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.index
            .get(alias)
            .map(|&idx| self.entries[idx].canonical.as_str())
    }

    pub fn contains_key(&self, alias: &str) -> bool {
        self.index.contains_key(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[derive(Debug, Clone, Default)]
pub struct ResolutionResult {
    pub alias_to_canonical: AliasTable,
    /// Symbols of unmatched groups, in group order then within-group order.
    /// Not deduplicated across groups.
    pub unresolved_symbols: Vec<String>,
    /// Every overwrite that changed an alias's canonical symbol.
    pub conflicts: Vec<AliasConflict>,
    pub groups_resolved: usize,
    pub groups_unresolved: usize,
}

impl ResolutionResult {
    pub fn groups_total(&self) -> usize {
        self.groups_resolved + self.groups_unresolved
    }
}

/// First symbol of the group present in the exome list. The approved
/// symbol is checked first, so it wins over any alias.
pub fn find_match<'a>(group: &'a AliasGroup, exome: &CanonicalExomeSet) -> Option<&'a str> {
    group.symbols().find(|s| exome.contains(s))
}

pub fn resolve(groups: &AliasGroups, exome: &CanonicalExomeSet) -> ResolutionResult {
    let mut result = ResolutionResult::default();

    for group in groups.iter() {
        match find_match(group, exome) {
            Some(canonical) => {
                result.groups_resolved += 1;
                for symbol in group.symbols().filter(|&s| s != canonical) {
                    let replaced = result
                        .alias_to_canonical
                        .insert(symbol.to_string(), canonical.to_string());

                    if let Some(previous) = replaced.filter(|p| p != canonical) {
                        warn!(
                            "Alias {} claimed by {} after {}; keeping {}",
                            symbol, group.approved, previous, canonical
                        );
                        result.conflicts.push(AliasConflict {
                            alias: symbol.to_string(),
                            previous,
                            replacement: canonical.to_string(),
                        });
                    }
                }
            }
            None => {
                result.groups_unresolved += 1;
                debug!("No exome symbol for group {}", group.approved);
                result
                    .unresolved_symbols
                    .extend(group.symbols().map(str::to_string));
            }
        }
    }

    info!(
        "Resolved {} of {} groups: {} aliases, {} unresolved symbols, {} conflicts",
        result.groups_resolved,
        result.groups_total(),
        result.alias_to_canonical.len(),
        result.unresolved_symbols.len(),
        result.conflicts.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::NomenclatureRecord;
    use std::path::Path;

    fn groups(records: &[NomenclatureRecord]) -> AliasGroups {
        AliasGroups::from_records(records, Path::new("xref.tsv")).unwrap()
    }

    fn pairs(table: &AliasTable) -> Vec<(&str, &str)> {
        table.iter().map(|e| (e.alias.as_str(), e.canonical.as_str())).collect()
    }

    #[test]
    fn test_brca1_aliases_map_to_approved() {
        let exome = CanonicalExomeSet::from_symbols(["BRCA1"]);
        let result = resolve(
            &groups(&[
                NomenclatureRecord::new("BRCA1", Some("BRCC1"), None),
                NomenclatureRecord::new("BRCA1", Some("PSCP"), None),
            ]),
            &exome,
        );
        assert_eq!(pairs(&result.alias_to_canonical), vec![("BRCC1", "BRCA1"), ("PSCP", "BRCA1")]);
        assert!(result.unresolved_symbols.is_empty());
    }

    #[test]
    fn test_empty_exome_leaves_everything_unresolved() {
        let exome = CanonicalExomeSet::default();
        let result = resolve(&groups(&[NomenclatureRecord::new("FOO", Some("BAR"), None)]), &exome);
        assert!(result.alias_to_canonical.is_empty());
        assert_eq!(result.unresolved_symbols, vec!["FOO", "BAR"]);
        assert_eq!(result.groups_unresolved, 1);
    }

    #[test]
    fn test_alias_in_exome_becomes_canonical() {
        // exome lists the old name; the approved symbol maps onto it
        let exome = CanonicalExomeSet::from_symbols(["KIAA1524"]);
        let result = resolve(
            &groups(&[NomenclatureRecord::new("CIP2A", Some("P90"), Some("KIAA1524"))]),
            &exome,
        );
        assert_eq!(
            pairs(&result.alias_to_canonical),
            vec![("CIP2A", "KIAA1524"), ("P90", "KIAA1524")]
        );
    }

    #[test]
    fn test_approved_wins_over_alias() {
        let exome = CanonicalExomeSet::from_symbols(["ERBB", "EGFR"]);
        let result = resolve(&groups(&[NomenclatureRecord::new("EGFR", Some("ERBB"), None)]), &exome);
        assert_eq!(pairs(&result.alias_to_canonical), vec![("ERBB", "EGFR")]);
    }

    #[test]
    fn test_self_alias_never_maps_to_itself() {
        let exome = CanonicalExomeSet::from_symbols(["ABC1"]);
        let result = resolve(&groups(&[NomenclatureRecord::new("ABC1", Some("abc1"), None)]), &exome);
        assert!(result.alias_to_canonical.is_empty());
        assert_eq!(result.groups_resolved, 1);
    }

    #[test]
    fn test_shared_alias_last_write_wins_in_first_position() {
        let exome = CanonicalExomeSet::from_symbols(["GENEA", "GENEB"]);
        let result = resolve(
            &groups(&[
                NomenclatureRecord::new("GENEA", Some("SHARED"), None),
                NomenclatureRecord::new("GENEA", Some("ONLYA"), None),
                NomenclatureRecord::new("GENEB", Some("SHARED"), None),
            ]),
            &exome,
        );
        assert_eq!(
            pairs(&result.alias_to_canonical),
            vec![("SHARED", "GENEB"), ("ONLYA", "GENEA")]
        );
        assert_eq!(
            result.conflicts,
            vec![AliasConflict {
                alias: "SHARED".to_string(),
                previous: "GENEA".to_string(),
                replacement: "GENEB".to_string(),
            }]
        );
    }

    #[test]
    fn test_same_mapping_twice_is_not_a_conflict() {
        let mut table = AliasTable::new();
        assert_eq!(table.insert("A".into(), "X".into()), None);
        assert_eq!(table.insert("A".into(), "X".into()), Some("X".to_string()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("A"), Some("X"));
    }

    #[test]
    fn test_unresolved_not_deduplicated_across_groups() {
        let exome = CanonicalExomeSet::default();
        let result = resolve(
            &groups(&[
                NomenclatureRecord::new("FOO", Some("BAR"), None),
                NomenclatureRecord::new("BAZ", Some("BAR"), None),
            ]),
            &exome,
        );
        assert_eq!(result.unresolved_symbols, vec!["FOO", "BAR", "BAZ", "BAR"]);
    }
}
