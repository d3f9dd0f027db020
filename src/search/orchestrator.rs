use crate::{error::Result,
            progress::{NullProgress, Progress},
            search::{query::TargetQuery, site::SearchSite},
            table::{PaginationWalker, RecordSet, Schema, SchemaRegistry}};

/// Runs a list of searches one after another and gathers their records in order
///
/// The orchestrator holds the site exclusively for the whole run. Targets are
/// processed strictly in sequence: every page of one target is read before the
/// next target is submitted. Any error ends the run and no partial result is
/// returned.
pub struct SearchOrchestrator<'a, S: SearchSite> {
    site: S,
    registry: &'a SchemaRegistry,
    progress: Option<&'a mut dyn Progress>,
}

impl<'a, S: SearchSite> SearchOrchestrator<'a, S> {
    pub fn new(site: S, registry: &'a SchemaRegistry) -> Self {
        Self {
            site,
            registry,
            progress: None,
        }
    }

    /// Builder method: report every accepted record to `progress`
    pub fn with_progress(mut self, progress: &'a mut dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn site(&self) -> &S {
        &self.site
    }

    /// Search every target in order and return all accepted records
    pub fn run(&mut self, targets: &[TargetQuery]) -> Result<RecordSet> {
        let schemas = preflight(self.registry, targets)?;

        let mut null = NullProgress;
        let progress: &mut dyn Progress = match self.progress.as_deref_mut() {
            Some(progress) => progress,
            None => &mut null,
        };

        let mut results = RecordSet::new();
        for (target, schema) in targets.iter().zip(schemas) {
            let jurisdiction_id = schema.jurisdiction_id();
            self.site.submit(jurisdiction_id, target)?;

            let records = PaginationWalker::new(schema).walk(&mut self.site, progress)?;
            log::info!("{}: {} records", jurisdiction_id, records.len());

            results.extend(records);
        }

        log::info!("{} records across {} targets", results.count(), targets.len());
        Ok(results)
    }
}

/// Validate every target and resolve its schema before any browser work,
/// so a bad entry late in the list fails the run up front
pub fn preflight<'r>(registry: &'r SchemaRegistry, targets: &[TargetQuery]) -> Result<Vec<&'r Schema>> {
    targets
        .iter()
        .map(|target| {
            target.validate()?;
            registry.lookup(target.resolved_jurisdiction())
        })
        .collect()
}
