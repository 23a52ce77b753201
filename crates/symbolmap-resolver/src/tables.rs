//! Input tables: the nomenclature cross-reference export and the exome list.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use csv::StringRecord;
use symbolmap_common::{Result, SymbolMapError};
use symbolmap_config::ParsingConfig;
use tracing::{debug, info, warn};

pub const APPROVED_SYMBOL_COLUMN: &str = "Approved symbol";
pub const ALIAS_SYMBOL_COLUMN: &str = "Alias symbol";
pub const PREVIOUS_SYMBOL_COLUMN: &str = "Previous symbol";
pub const EXOME_SYMBOL_COLUMN: &str = "symbol";

/// One row of the cross-reference table. Absent cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NomenclatureRecord {
    /// Line in the source file (header is line 1)
    pub line: u64,
    pub approved_symbol: Option<String>,
    pub alias_symbol: Option<String>,
    pub previous_symbol: Option<String>,
}

impl NomenclatureRecord {
    pub fn new(approved: &str, alias: Option<&str>, previous: Option<&str>) -> Self {
        Self {
            line: 0,
            approved_symbol: Some(approved.to_string()),
            alias_symbol: alias.map(str::to_string),
            previous_symbol: previous.map(str::to_string),
        }
    }

    /// Alias then previous symbol, skipping absent ones.
    pub fn alternates(&self) -> impl Iterator<Item = &str> {
        self.alias_symbol
            .as_deref()
            .into_iter()
            .chain(self.previous_symbol.as_deref())
    }
}

/// Uppercased exome gene symbols, sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalExomeSet {
    symbols: BTreeSet<String>,
}

impl CanonicalExomeSet {
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            symbols: symbols.into_iter().map(|s| s.as_ref().to_uppercase()).collect(),
        }
    }

    /// Case-sensitive; callers pass uppercased symbols.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Ascending lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize { self.symbols.len() }

    pub fn is_empty(&self) -> bool { self.symbols.is_empty() }
}

/// Load the tab-separated cross-reference table.
pub fn load_nomenclature(path: &Path, parsing: &ParsingConfig) -> Result<Vec<NomenclatureRecord>> {
    debug!("Loading nomenclature table from {:?}", path);
    let mut reader = open_table(path, b'\t')?;
    let headers = reader
        .headers()
        .map_err(|e| SymbolMapError::from_csv(path, e))?
        .clone();

    let approved = column_index(path, &headers, APPROVED_SYMBOL_COLUMN)?;
    let alias = column_index(path, &headers, ALIAS_SYMBOL_COLUMN)?;
    let previous = column_index(path, &headers, PREVIOUS_SYMBOL_COLUMN)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result.map_err(|e| SymbolMapError::from_csv(path, e))?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(i as u64 + 2);

        records.push(NomenclatureRecord {
            line,
            approved_symbol: cell(&row, approved, parsing),
            alias_symbol: cell(&row, alias, parsing),
            previous_symbol: cell(&row, previous, parsing),
        });
    }

    info!("Loaded {} nomenclature rows from {:?}", records.len(), path);
    Ok(records)
}

/// Load the comma-separated exome gene list.
pub fn load_exome(path: &Path, parsing: &ParsingConfig) -> Result<CanonicalExomeSet> {
    debug!("Loading exome gene list from {:?}", path);
    let mut reader = open_table(path, b',')?;
    let headers = reader
        .headers()
        .map_err(|e| SymbolMapError::from_csv(path, e))?
        .clone();
    let symbol = column_index(path, &headers, EXOME_SYMBOL_COLUMN)?;

    let mut symbols = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let row = result.map_err(|e| SymbolMapError::from_csv(path, e))?;
        match cell(&row, symbol, parsing) {
            Some(s) => symbols.push(s),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} exome rows with an empty `{}` cell", skipped, EXOME_SYMBOL_COLUMN);
    }

    let exome = CanonicalExomeSet::from_symbols(symbols);
    info!("Loaded {} distinct exome symbols from {:?}", exome.len(), path);
    Ok(exome)
}

fn open_table(path: &Path, delimiter: u8) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SymbolMapError::InputNotFound { path: path.to_path_buf() },
        _ => SymbolMapError::io(path, e),
    })?;

    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        // short rows leave trailing columns absent
        .flexible(true)
        .from_reader(file))
}

fn column_index(path: &Path, headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
        .ok_or_else(|| SymbolMapError::malformed(path, format!("missing required column `{name}`")))
}

fn cell(row: &StringRecord, index: usize, parsing: &ParsingConfig) -> Option<String> {
    row.get(index)
        .filter(|v| !parsing.is_missing(v))
        .map(str::to_string)
}
