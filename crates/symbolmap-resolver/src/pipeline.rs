//! Load → Group → Resolve → Emit, end to end.

use std::path::PathBuf;

use symbolmap_common::Result;
use symbolmap_config::Config;
use tracing::info;

use crate::audit;
use crate::emit;
use crate::group::AliasGroups;
use crate::resolve::{resolve, ResolutionResult};
use crate::tables::{self, CanonicalExomeSet, NomenclatureRecord};

/// Everything computed by a run before any file is written.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub records: Vec<NomenclatureRecord>,
    pub exome: CanonicalExomeSet,
    pub groups: AliasGroups,
    pub result: ResolutionResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub exome_symbols: usize,
    pub groups: usize,
    pub groups_resolved: usize,
    pub groups_unresolved: usize,
    pub alias_entries: usize,
    pub unresolved_symbols: usize,
    pub conflicts: usize,
    pub case_collisions: usize,
    pub outputs: Vec<PathBuf>,
}

pub struct AliasResolver {
    config: Config,
}

impl AliasResolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load both tables, group and resolve. Writes nothing.
    pub fn resolve_only(&self) -> Result<ResolvedRun> {
        let inputs = &self.config.inputs;
        let parsing = &self.config.parsing;

        let exome = tables::load_exome(&inputs.exome, parsing)?;
        let records = tables::load_nomenclature(&inputs.nomenclature, parsing)?;
        let groups = AliasGroups::from_records(&records, &inputs.nomenclature)?;
        let result = resolve(&groups, &exome);

        Ok(ResolvedRun { records, exome, groups, result })
    }

    /// Full batch run. Any input error aborts before the first write.
    pub fn run(&self) -> Result<RunSummary> {
        let run = self.resolve_only()?;

        let collisions = audit::find_case_collisions(&run.records, &run.result);
        audit::log_findings(&collisions);
        let watch = audit::check_watch_symbols(
            &self.config.audit.watch_symbols,
            &run.groups,
            &run.exome,
            &run.result,
        );
        let report = self
            .config
            .outputs
            .audit_path()
            .map(|_| audit::render_audit(&collisions, &run.result.conflicts, &watch));

        let outputs = emit::write_outputs(&self.config.outputs, &run.exome, &run.result, report)?;

        let summary = RunSummary {
            records: run.records.len(),
            exome_symbols: run.exome.len(),
            groups: run.groups.len(),
            groups_resolved: run.result.groups_resolved,
            groups_unresolved: run.result.groups_unresolved,
            alias_entries: run.result.alias_to_canonical.len(),
            unresolved_symbols: run.result.unresolved_symbols.len(),
            conflicts: run.result.conflicts.len(),
            case_collisions: collisions.len(),
            outputs,
        };
        info!(
            "Done: {} aliases, {} unresolved symbols written to {:?}",
            summary.alias_entries, summary.unresolved_symbols, self.config.outputs.dir
        );
        Ok(summary)
    }
}
