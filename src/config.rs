use config::{Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

use crate::error::{Result, TrackerError};
use crate::models::{Budget, ReportPolicy, DEFAULT_BOT_NAME};
use crate::parsers::SelectorConfig;

pub const ENV_PREFIX: &str = "PRICE_TRACKER";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 25;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Sent with every product page request.
    #[serde(default, alias = "amazon_headers")]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub products: Vec<ProductConfig>,
    #[serde(rename = "intros", default)]
    pub greetings: Vec<String>,
    #[serde(rename = "botname", default = "default_bot_name")]
    pub bot_name: String,
    #[serde(rename = "discord_webhooks")]
    pub webhook_url: String,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    pub url: String,
    pub budget: Budget,
    #[serde(default, rename = "report")]
    pub policy: ReportPolicy,
}

fn default_bot_name() -> String {
    DEFAULT_BOT_NAME.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Settings {
    /// Read the settings file, letting `PRICE_TRACKER_*` variables override top-level keys.
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(true))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.greetings.is_empty() {
            return Err(TrackerError::Config("`intros` must not be empty".to_string()));
        }

        Url::parse(&self.webhook_url).map_err(|e| {
            TrackerError::Config(format!("invalid webhook url {:?}: {}", self.webhook_url, e))
        })?;

        for product in &self.products {
            Url::parse(&product.url).map_err(|e| {
                TrackerError::Config(format!("invalid product url {:?}: {}", product.url, e))
            })?;
        }

        if self.request_timeout_seconds == 0 {
            return Err(TrackerError::Config(
                "`request_timeout_seconds` must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SETTINGS: &str = r#"{
        "amazon_headers": { "User-Agent": "TestAgent/1.0", "Accept-Language": "en-IN" },
        "products": [
            { "url": "https://www.amazon.in/dp/B0001", "budget": 1500 },
            { "url": "https://www.amazon.in/dp/B0002", "budget": 899.5, "report": "on_low" },
            { "url": "https://www.amazon.in/dp/B0003", "budget": 10, "report": "whenever" }
        ],
        "intros": ["Hey there!\n"],
        "botname": "Price Bot",
        "discord_webhooks": "https://discord.com/api/webhooks/1/abc"
    }"#;

    #[test]
    fn parses_settings_document() {
        let settings = Settings::from_json(SETTINGS).unwrap();

        assert_eq!(settings.products.len(), 3);
        assert_eq!(settings.products[0].policy, ReportPolicy::Normal);
        assert_eq!(settings.products[0].budget.value(), 1500.0);
        assert_eq!(settings.products[1].policy, ReportPolicy::OnLow);
        assert_eq!(settings.products[1].budget.value(), 899.5);
        assert_eq!(settings.products[2].policy, ReportPolicy::Normal);
        assert_eq!(settings.greetings, vec!["Hey there!\n".to_string()]);
        assert_eq!(settings.bot_name, "Price Bot");
        assert_eq!(settings.webhook_url, "https://discord.com/api/webhooks/1/abc");
        assert_eq!(settings.selectors, SelectorConfig::default());
        assert_eq!(settings.request_timeout_seconds, DEFAULT_TIMEOUT_SECONDS);

        let agent = settings
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
            .map(|(_, value)| value.as_str());
        assert_eq!(agent, Some("TestAgent/1.0"));
    }

    #[test]
    fn bot_name_defaults_when_absent() {
        let json = r#"{
            "products": [],
            "intros": ["Hi\n"],
            "discord_webhooks": "https://discord.com/api/webhooks/1/abc"
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.bot_name, DEFAULT_BOT_NAME);
        assert!(settings.headers.is_empty());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let json = r#"{
            "products": [{ "url": "https://www.amazon.in/dp/B0001", "budget": 0 }],
            "intros": ["Hi\n"],
            "discord_webhooks": "https://discord.com/api/webhooks/1/abc"
        }"#;
        assert!(Settings::from_json(json).is_err());
    }

    #[test]
    fn empty_greeting_pool_is_rejected() {
        let json = r#"{
            "products": [],
            "intros": [],
            "discord_webhooks": "https://discord.com/api/webhooks/1/abc"
        }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(TrackerError::Config(_))
        ));
    }

    #[test]
    fn malformed_urls_are_rejected() {
        let json = r#"{
            "products": [{ "url": "not a url", "budget": 10 }],
            "intros": ["Hi\n"],
            "discord_webhooks": "https://discord.com/api/webhooks/1/abc"
        }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(TrackerError::Config(_))
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Settings::from_json("{ products: ").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("price-tracker-does-not-exist.json");
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!(
            "price-tracker-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, SETTINGS).unwrap();

        let settings = Settings::load(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.unwrap().products.len(), 3);
    }

    #[test]
    fn environment_overrides_webhook_from_file() {
        let path = std::env::temp_dir().join(format!(
            "price-tracker-env-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, SETTINGS).unwrap();

        std::env::set_var("PRICE_TRACKER_DISCORD_WEBHOOKS", "https://example.com/hook");
        let settings = Settings::load(&path);
        std::env::remove_var("PRICE_TRACKER_DISCORD_WEBHOOKS");
        std::fs::remove_file(&path).ok();

        let settings = settings.unwrap();
        assert_eq!(settings.webhook_url, "https://example.com/hook");
        assert_eq!(settings.bot_name, "Price Bot");
    }
}
