use store::SiteConfig;

use crate::dom;

/// Read the inline `<script id="aclubConfig" type="application/toml">`
/// block. Absent or unreadable blocks yield the defaults.
pub fn load() -> SiteConfig {
    let Some(block) = dom::document().and_then(|d| d.get_element_by_id(SiteConfig::element_id()))
    else {
        return SiteConfig::default();
    };
    let text = block.text_content().unwrap_or_default();
    match SiteConfig::from_toml(&text) {
        Ok(config) => {
            tracing::debug!("loaded inline site config");
            config
        }
        Err(e) => {
            tracing::warn!(error = %e, "invalid inline site config, using defaults");
            SiteConfig::default()
        }
    }
}
