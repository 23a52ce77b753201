//! symbolmap-resolver — builds the gene-symbol alias table.
//!
//! Reads an HGNC/BioMart cross-reference export and the IDT exome gene list,
//! groups every alias and previous symbol under its approved symbol, and
//! reconciles each group against the exome list:
//!
//! 1. **Load**: [`tables::load_nomenclature`], [`tables::load_exome`]
//! 2. **Group**: [`group::AliasGroups::from_records`]
//! 3. **Resolve**: [`resolve::resolve`]
//! 4. **Emit**: [`emit::write_outputs`]
//!
//! ```rust,no_run
//! use symbolmap_config::Config;
//! use symbolmap_resolver::AliasResolver;
//!
//! fn main() -> anyhow::Result<()> {
//!     let summary = AliasResolver::new(Config::load()?).run()?;
//!     println!("{} aliases written", summary.alias_entries);
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod emit;
pub mod group;
pub mod pipeline;
pub mod resolve;
pub mod tables;

pub use group::{AliasGroup, AliasGroups};
pub use pipeline::{AliasResolver, ResolvedRun, RunSummary};
pub use resolve::{resolve, AliasConflict, AliasEntry, AliasTable, ResolutionResult};
pub use tables::{CanonicalExomeSet, NomenclatureRecord};
