//! Configuration loading for symbolmap.
//! Reads symbolmap.toml from the current directory when it exists; every
//! field falls back to the fixed locations the batch run has always used.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "symbolmap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inputs: InputConfig,
    #[serde(default)]
    pub outputs: OutputConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

// ── Inputs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// HGNC/BioMart cross-reference export (tab-separated).
    #[serde(default = "default_nomenclature")]
    pub nomenclature: PathBuf,
    /// IDT exome gene list (comma-separated, `symbol` column).
    #[serde(default = "default_exome")]
    pub exome: PathBuf,
}

fn default_nomenclature() -> PathBuf { PathBuf::from("../data/biomart_results.txt") }
fn default_exome()        -> PathBuf { PathBuf::from("../data/idt_exome_gene_list.csv") }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            nomenclature: default_nomenclature(),
            exome: default_exome(),
        }
    }
}

// ── Outputs ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_valid_exome_file")]
    pub valid_exome_file: String,
    #[serde(default = "default_unresolved_file")]
    pub unresolved_file: String,
    #[serde(default = "default_alias_file")]
    pub alias_file: String,
    /// Optional data-quality report; nothing is written when unset.
    #[serde(default)]
    pub audit_file: Option<String>,
}

fn default_output_dir()       -> PathBuf { PathBuf::from(".") }
fn default_valid_exome_file() -> String  { "valid_idt_exome.txt".to_string() }
fn default_unresolved_file()  -> String  { "not_in_idt_exome.txt".to_string() }
fn default_alias_file()       -> String  { "alias_dict.txt".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            valid_exome_file: default_valid_exome_file(),
            unresolved_file: default_unresolved_file(),
            alias_file: default_alias_file(),
            audit_file: None,
        }
    }
}

impl OutputConfig {
    pub fn valid_exome_path(&self) -> PathBuf { self.dir.join(&self.valid_exome_file) }
    pub fn unresolved_path(&self)  -> PathBuf { self.dir.join(&self.unresolved_file) }
    pub fn alias_path(&self)       -> PathBuf { self.dir.join(&self.alias_file) }

    pub fn audit_path(&self) -> Option<PathBuf> {
        self.audit_file.as_ref().map(|f| self.dir.join(f))
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    /// Cell values treated as absent. Compared verbatim, no trimming.
    #[serde(default = "default_missing_values")]
    pub missing_values: Vec<String>,
}

/// The NA markers a pandas `read_csv` recognises out of the box; the
/// BioMart exports this tool consumes were always read with that list.
fn default_missing_values() -> Vec<String> {
    [
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
        "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
        "n/a", "nan", "null",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self { missing_values: default_missing_values() }
    }
}

impl ParsingConfig {
    pub fn is_missing(&self, cell: &str) -> bool {
        self.missing_values.iter().any(|m| m == cell)
    }
}

// ── Audit ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Symbols known to be ambiguous in HGNC; their fate is logged.
    #[serde(default = "default_watch_symbols")]
    pub watch_symbols: Vec<String>,
}

fn default_watch_symbols() -> Vec<String> {
    vec!["AZFA".to_string(), "MIP-2A".to_string(), "ODCP".to_string()]
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { watch_symbols: default_watch_symbols() }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl Config {
    /// Load `symbolmap.toml` from the working directory, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_default(Path::new(CONFIG_FILE))
    }

    /// Load from `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_match_batch_layout() {
        let config = Config::default();
        assert_eq!(config.inputs.nomenclature, PathBuf::from("../data/biomart_results.txt"));
        assert_eq!(config.inputs.exome, PathBuf::from("../data/idt_exome_gene_list.csv"));
        assert_eq!(config.outputs.valid_exome_path(), PathBuf::from("./valid_idt_exome.txt"));
        assert_eq!(config.outputs.unresolved_path(), PathBuf::from("./not_in_idt_exome.txt"));
        assert_eq!(config.outputs.alias_path(), PathBuf::from("./alias_dict.txt"));
        assert!(config.outputs.audit_path().is_none());
    }

    #[test]
    fn test_default_missing_values() {
        let parsing = ParsingConfig::default();
        assert!(parsing.is_missing(""));
        assert!(parsing.is_missing("NA"));
        assert!(parsing.is_missing("null"));
        assert!(!parsing.is_missing("BRCA1"));
        // verbatim comparison
        assert!(!parsing.is_missing(" NA"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [outputs]
            dir = "out"
            audit_file = "audit.txt"

            [parsing]
            missing_values = [""]
            "#,
        )
        .unwrap();
        assert_eq!(config.outputs.dir, PathBuf::from("out"));
        assert_eq!(config.outputs.alias_file, "alias_dict.txt");
        assert_eq!(config.outputs.audit_path(), Some(PathBuf::from("out/audit.txt")));
        assert!(!config.parsing.is_missing("NA"));
        assert_eq!(config.audit.watch_symbols, vec!["AZFA", "MIP-2A", "ODCP"]);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.outputs.alias_file, "alias_dict.txt");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[inputs\nnomenclature = 3").unwrap();
        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
