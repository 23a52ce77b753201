//! Plain-text outputs, formatted to be pasted as source literals.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use symbolmap_common::{Result, SymbolMapError};
use symbolmap_config::OutputConfig;
use tracing::info;

use crate::resolve::{AliasTable, ResolutionResult};
use crate::tables::CanonicalExomeSet;

/// `"SYMBOL",` per exome symbol, ascending.
pub fn render_valid_exome(exome: &CanonicalExomeSet) -> String {
    render_symbols(exome.iter())
}

/// `"SYMBOL",` per unresolved symbol, in processing order.
pub fn render_unresolved(result: &ResolutionResult) -> String {
    render_symbols(result.unresolved_symbols.iter().map(String::as_str))
}

/// `("ALIAS", "CANONICAL"),` per entry, in insertion order.
pub fn render_alias_dict(table: &AliasTable) -> String {
    let mut out = String::new();
    for entry in table.iter() {
        let _ = writeln!(out, "(\"{}\", \"{}\"),", entry.alias.to_uppercase(), entry.canonical);
    }
    out
}

fn render_symbols<'a>(symbols: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for symbol in symbols {
        let _ = writeln!(out, "\"{}\",", symbol.to_uppercase());
    }
    out
}

/// Write the three outputs, plus `audit` when an audit file is configured.
///
/// Everything is rendered before the first file is touched.
pub fn write_outputs(
    outputs: &OutputConfig,
    exome: &CanonicalExomeSet,
    result: &ResolutionResult,
    audit: Option<String>,
) -> Result<Vec<PathBuf>> {
    let mut rendered = vec![
        (outputs.valid_exome_path(), render_valid_exome(exome)),
        (outputs.unresolved_path(), render_unresolved(result)),
        (outputs.alias_path(), render_alias_dict(&result.alias_to_canonical)),
    ];
    if let (Some(path), Some(report)) = (outputs.audit_path(), audit) {
        rendered.push((path, report));
    }

    std::fs::create_dir_all(&outputs.dir).map_err(|e| SymbolMapError::io(&outputs.dir, e))?;

    let mut written = Vec::with_capacity(rendered.len());
    for (path, contents) in rendered {
        write_file(&path, &contents)?;
        info!("Wrote {:?} ({} lines)", path, contents.lines().count());
        written.push(path);
    }
    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| SymbolMapError::io(path, e))
}
