use crate::config::SiteConfig;
use crate::error::{HarvestError, Result};
use scraper::Selector;

pub(crate) mod live;
pub(crate) mod snapshot;

/// Parsed structural selectors for the table widget, built once per run
/// from the site configuration.
pub struct Selectors {
    pub container_id: Selector,
    pub container_class: Selector,
    pub row: Selector,
    pub cell: Selector,
}

impl Selectors {
    pub fn new(site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            container_id: parse(&site.container_id_selector)?,
            container_class: parse(&site.container_class_selector)?,
            row: parse(&site.row_selector)?,
            cell: parse(&site.cell_selector)?,
        })
    }
}

fn parse(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| HarvestError::Selector(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_site_selectors_parse() {
        assert!(Selectors::new(&SiteConfig::default()).is_ok());
    }

    #[test]
    fn invalid_selector_is_a_config_error() {
        let site = SiteConfig {
            row_selector: ":::".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(
            Selectors::new(&site),
            Err(HarvestError::Selector(_))
        ));
    }
}
