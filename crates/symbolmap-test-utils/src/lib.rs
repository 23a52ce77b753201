//! Fixture helpers: a temp directory holding both input tables and a
//! [`Config`] pointing at it.

use std::path::{Path, PathBuf};

use symbolmap_config::Config;
use tempfile::TempDir;

pub const NOMENCLATURE_HEADER: &str = "Approved symbol\tAlias symbol\tPrevious symbol";
pub const EXOME_HEADER: &str = "symbol";

pub struct Fixture {
    dir: TempDir,
    pub config: Config,
}

impl Fixture {
    /// `rows` are `(approved, alias, previous)`, written tab-separated with
    /// `None` as an empty cell.
    pub fn new(exome: &[&str], rows: &[(&str, Option<&str>, Option<&str>)]) -> Self {
        let mut table = String::from(NOMENCLATURE_HEADER);
        table.push('\n');
        for (approved, alias, previous) in rows {
            table.push_str(&format!(
                "{}\t{}\t{}\n",
                approved,
                alias.unwrap_or(""),
                previous.unwrap_or("")
            ));
        }
        Self::from_raw(&exome_csv(exome), &table)
    }

    /// Write the two input files verbatim.
    pub fn from_raw(exome_csv: &str, nomenclature_tsv: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut config = Config::default();
        config.inputs.exome = write_fixture(dir.path(), "idt_exome_gene_list.csv", exome_csv);
        config.inputs.nomenclature = write_fixture(dir.path(), "biomart_results.txt", nomenclature_tsv);
        config.outputs.dir = dir.path().join("out");
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn read_output(&self, file: &str) -> String {
        std::fs::read_to_string(self.config.outputs.dir.join(file))
            .unwrap_or_else(|e| panic!("read {file}: {e}"))
    }
}

pub fn exome_csv(symbols: &[&str]) -> String {
    let mut csv = String::from(EXOME_HEADER);
    csv.push('\n');
    for s in symbols {
        csv.push_str(s);
        csv.push('\n');
    }
    csv
}

pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
