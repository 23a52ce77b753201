//! Data-quality checks over the cross-reference table.
//!
//! Nothing here changes the alias table; findings are logged and, when an
//! audit file is configured, written as a plain-text report.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};

use tracing::warn;

use crate::group::AliasGroups;
use crate::resolve::{AliasConflict, ResolutionResult};
use crate::tables::{CanonicalExomeSet, NomenclatureRecord};

/// Distinct raw spellings of one symbol that differ only by letter case.
/// They collapse to one key once uppercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseCollision {
    pub key: String,
    pub spellings: Vec<String>,
    /// Canonical symbol the key maps to in the alias table.
    pub mapped_to: Option<String>,
}

/// Where a symbol ended up after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolFate {
    Alias(String),
    Canonical,
    Unresolved,
    NotSeen,
}

impl fmt::Display for SymbolFate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alias(canonical) => write!(f, "alias of {canonical}"),
            Self::Canonical => write!(f, "canonical exome symbol"),
            Self::Unresolved => write!(f, "unresolved"),
            Self::NotSeen => write!(f, "not present in any group"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchHit {
    pub symbol: String,
    pub fate: SymbolFate,
}

pub fn find_case_collisions(
    records: &[NomenclatureRecord],
    result: &ResolutionResult,
) -> Vec<CaseCollision> {
    let mut spellings: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        let symbols = record
            .approved_symbol
            .as_deref()
            .into_iter()
            .chain(record.alternates());
        for symbol in symbols {
            spellings.entry(symbol.to_uppercase()).or_default().insert(symbol);
        }
    }

    spellings
        .into_iter()
        .filter(|(_, raw)| raw.len() > 1)
        .map(|(key, raw)| CaseCollision {
            mapped_to: result.alias_to_canonical.get(&key).map(str::to_string),
            spellings: raw.into_iter().map(str::to_string).collect(),
            key,
        })
        .collect()
}

pub fn symbol_fate(
    symbol: &str,
    groups: &AliasGroups,
    exome: &CanonicalExomeSet,
    result: &ResolutionResult,
) -> SymbolFate {
    let seen = groups.iter().any(|g| g.symbols().any(|s| s == symbol));
    if !seen {
        SymbolFate::NotSeen
    } else if let Some(canonical) = result.alias_to_canonical.get(symbol) {
        SymbolFate::Alias(canonical.to_string())
    } else if exome.contains(symbol) {
        SymbolFate::Canonical
    } else {
        SymbolFate::Unresolved
    }
}

/// Report the fate of each watched symbol, warning on those present.
pub fn check_watch_symbols(
    watch: &[String],
    groups: &AliasGroups,
    exome: &CanonicalExomeSet,
    result: &ResolutionResult,
) -> Vec<WatchHit> {
    watch
        .iter()
        .map(|w| {
            let symbol = w.to_uppercase();
            let fate = symbol_fate(&symbol, groups, exome, result);
            if fate != SymbolFate::NotSeen {
                warn!("Watched symbol {}: {}", symbol, fate);
            }
            WatchHit { symbol, fate }
        })
        .collect()
}

pub fn log_findings(collisions: &[CaseCollision]) {
    for c in collisions {
        warn!(
            "Case collision on {}: {:?} -> {}",
            c.key,
            c.spellings,
            c.mapped_to.as_deref().unwrap_or("-")
        );
    }
}

pub fn render_audit(
    collisions: &[CaseCollision],
    conflicts: &[AliasConflict],
    watch: &[WatchHit],
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# case collisions: {}", collisions.len());
    for c in collisions {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            c.key,
            c.spellings.join(","),
            c.mapped_to.as_deref().unwrap_or("-")
        );
    }

    let _ = writeln!(out, "# alias conflicts: {}", conflicts.len());
    for c in conflicts {
        let _ = writeln!(out, "{}\t{}\t{}", c.alias, c.previous, c.replacement);
    }

    let _ = writeln!(out, "# watched symbols: {}", watch.len());
    for hit in watch {
        let _ = writeln!(out, "{}\t{}", hit.symbol, hit.fate);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use std::path::Path;

    fn fixture() -> (Vec<NomenclatureRecord>, AliasGroups, CanonicalExomeSet, ResolutionResult) {
        let records = vec![
            NomenclatureRecord::new("CIP2A", Some("p90"), None),
            NomenclatureRecord::new("CIP2A", Some("P90"), None),
            NomenclatureRecord::new("ORPHAN1", Some("ODCP"), None),
        ];
        let groups = AliasGroups::from_records(&records, Path::new("xref.tsv")).unwrap();
        let exome = CanonicalExomeSet::from_symbols(["CIP2A"]);
        let result = resolve(&groups, &exome);
        (records, groups, exome, result)
    }

    #[test]
    fn test_case_collision_found_on_raw_spellings() {
        let (records, _, _, result) = fixture();
        let collisions = find_case_collisions(&records, &result);
        assert_eq!(
            collisions,
            vec![CaseCollision {
                key: "P90".to_string(),
                spellings: vec!["P90".to_string(), "p90".to_string()],
                mapped_to: Some("CIP2A".to_string()),
            }]
        );
    }

    #[test]
    fn test_watch_symbol_fates() {
        let (_, groups, exome, result) = fixture();
        let watch = vec!["odcp".to_string(), "AZFA".to_string(), "cip2a".to_string()];
        let hits = check_watch_symbols(&watch, &groups, &exome, &result);
        assert_eq!(hits[0].fate, SymbolFate::Unresolved);
        assert_eq!(hits[1].fate, SymbolFate::NotSeen);
        assert_eq!(hits[2].fate, SymbolFate::Canonical);
    }

    #[test]
    fn test_render_audit_sections() {
        let (records, groups, exome, result) = fixture();
        let collisions = find_case_collisions(&records, &result);
        let hits = check_watch_symbols(&["P90".to_string()], &groups, &exome, &result);
        let report = render_audit(&collisions, &result.conflicts, &hits);
        assert_eq!(
            report,
            "# case collisions: 1\nP90\tP90,p90\tCIP2A\n\
             # alias conflicts: 0\n\
             # watched symbols: 1\nP90\talias of CIP2A\n"
        );
    }
}
