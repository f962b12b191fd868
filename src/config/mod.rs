use crate::config::cli::Args;
use crate::error::Result;
use clap::Parser;
use serde::Deserialize;
use tracing::info;

pub(crate) mod cli;

/// Site contract: where the quotation table lives and how to find it.
/// Defaults target the Tabulator widget family.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub url: String,
    /// Primary structural identifier for the table container.
    pub container_id_selector: String,
    /// Fallback class identifier for the same widget family.
    pub container_class_selector: String,
    pub row_selector: String,
    pub cell_selector: String,
    /// Element polled for during the readiness wait.
    pub readiness_selector: String,
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://www.goldmarket.co.kr/gold-price".to_string(),
            container_id_selector: "#example-table".to_string(),
            container_class_selector: ".tabulator".to_string(),
            row_selector: ".tabulator-row".to_string(),
            cell_selector: ".tabulator-cell".to_string(),
            readiness_selector: ".tabulator-table".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

pub struct Config {
    pub args: Args,
    pub site: SiteConfig,
}

impl Config {
    pub fn new() -> Result<Self> {
        let args = Args::parse();

        // The config file is optional; the defaults describe the known target site
        let site = if args.config_file.exists() {
            serde_json::from_str(&std::fs::read_to_string(&args.config_file)?)?
        } else {
            SiteConfig::default()
        };

        Ok(Self { args, site })
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }

        info!("Data dir exists");
        Ok(())
    }
}
