use crate::config::cli::Command;
use crate::config::Config;
use crate::domain::storage::Storage;
use crate::domain::{Manifest, RecordSet};
use crate::error::{HarvestError, Result};
use crate::infrastructure::{FileSystemStore, Selectors, Session};
use crate::services::{ExtractionChain, TableSource};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub struct Pipeline {
    config: Config,
    store: FileSystemStore,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let store = FileSystemStore::new(&config.args.data_dir);
        Self { config, store }
    }

    pub async fn run(&self) -> Result<()> {
        match &self.config.args.command {
            Some(Command::Recover { snapshot_file }) => self.recover(snapshot_file),
            None => self.capture_live().await,
        }
    }

    async fn capture_live(&self) -> Result<()> {
        let selectors = Selectors::new(&self.config.site)?;
        let chain = ExtractionChain::new(&selectors);

        let session = Session::open(
            self.config.site.clone(),
            Duration::from_secs(self.config.args.readiness_timeout),
            self.config.args.chrome_path.as_deref(),
        )
        .await?;

        self.run_with_source(&chain, session).await
    }

    /// Runs the chain against a live source. The source is released on
    /// every path out of the chain, before any outcome propagates.
    async fn run_with_source<S: TableSource + Send>(
        &self,
        chain: &ExtractionChain<'_>,
        mut source: S,
    ) -> Result<()> {
        let outcome = chain.run(&mut source).await;

        // Archive the markup when every strategy came up empty, so the run
        // can be retried offline against what the page actually served
        let archived = match &outcome {
            Err(HarvestError::ExtractionEmpty) => source.capture().await.ok(),
            _ => None,
        };

        source.close().await;

        if let Some(markup) = archived {
            let path = self.store.save_snapshot(&markup)?;
            info!(
                "Archived page markup to {:?}; retry with `goldharvest recover {}`",
                path,
                path.display()
            );
        }

        let records = outcome?;
        self.persist(self.config.site.url.clone(), records)
    }

    fn recover(&self, snapshot_file: &Path) -> Result<()> {
        info!("Recovering from snapshot {:?}", snapshot_file);

        let markup = std::fs::read_to_string(snapshot_file)?;
        let selectors = Selectors::new(&self.config.site)?;
        let chain = ExtractionChain::new(&selectors);

        let records = chain.run_offline(&markup)?;
        self.persist(snapshot_file.display().to_string(), records)
    }

    fn persist(&self, source: String, records: RecordSet) -> Result<()> {
        if let Some(latest) = records.records().first() {
            info!(
                "Latest quote {}: bid {} / ask {}",
                latest.quote_date, latest.bid, latest.ask
            );
        }

        let manifest = Manifest::new(source, records.into_records());
        let path = self.store.save_records(&manifest)?;
        info!("Saved {} records to {:?}", manifest.total_records, path);
        Ok(())
    }
}
