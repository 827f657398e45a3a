use crate::analysis::{AnalysisOptions, SelectionPolicy};
use crate::infer::parsing::NumericFormat;
use anyhow::{Context, Error};
use confique::Config;
use std::{
    net::IpAddr,
    sync::{Arc, Mutex, OnceLock},
};

#[derive(Debug, Config)]
pub struct TabInsightConfig {
    #[config(env = "TABINSIGHT_PORT", default = 3000)]
    pub port: u16,
    #[config(env = "TABINSIGHT_ENDPOINT", default = "127.0.0.1")]
    pub endpoint: IpAddr,

    #[config(env = "TABINSIGHT_HTTP_BODY_LIMIT", default = "10mb")]
    pub http_body_limit: String,

    #[config(env = "TABINSIGHT_HTTP_SERVER_TIMEOUT_SECONDS", default = 30)]
    pub http_server_timeout_seconds: u64,

    /// Rows looked at to classify a column
    #[config(env = "TABINSIGHT_SAMPLE_SIZE", default = 5)]
    pub sample_size: usize,

    /// Every character is stripped from numeric values
    #[config(env = "TABINSIGHT_CURRENCY_SYMBOLS", default = "$")]
    pub currency_symbols: String,

    #[config(env = "TABINSIGHT_THOUSANDS_SEPARATORS", default = ",")]
    pub thousands_separators: String,

    #[config(env = "TABINSIGHT_MAX_INSIGHTS", default = 7)]
    pub max_insights: usize,

    #[config(env = "TABINSIGHT_COMPARISON_TOP_N", default = 5)]
    pub comparison_top_n: usize,

    #[config(env = "TABINSIGHT_DISTRIBUTION_TOP_N", default = 6)]
    pub distribution_top_n: usize,

    /// `first` or `variance`
    #[config(env = "TABINSIGHT_SELECTION", default = "first")]
    pub selection: String,

    #[config(env = "TABINSIGHT_DEFAULT_INPUT_FORMAT", default = "csv")]
    pub default_input_format: String,

    #[config(env = "TABINSIGHT_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

impl TabInsightConfig {
    pub fn load() -> Result<TabInsightConfig, Error> {
        let c = TabInsightConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }

    pub fn parse_http_body_limit(&self) -> Result<usize, Error> {
        let size = byte_unit::Byte::parse_str(self.http_body_limit.clone(), true)?.as_u64();
        if size > 16 * 1024 * 1024 * 1024 {
            anyhow::bail!("Body size is too big: > 16GB");
        }
        Ok(size as usize)
    }

    /// Builds and validates the options handed to every analysis.
    pub fn analysis_options(&self) -> Result<AnalysisOptions, Error> {
        let selection = self
            .selection
            .parse::<SelectionPolicy>()
            .context("Invalid TABINSIGHT_SELECTION")?;
        let options = AnalysisOptions {
            sample_size: self.sample_size,
            numeric_format: NumericFormat {
                currency_symbols: self.currency_symbols.chars().collect(),
                thousands_separators: self.thousands_separators.chars().collect(),
            },
            max_insights: self.max_insights,
            comparison_top_n: self.comparison_top_n,
            distribution_top_n: self.distribution_top_n,
            selection,
        };
        options.validate()?;
        Ok(options)
    }
}

static TABINSIGHT_CONFIG: OnceLock<Arc<TabInsightConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<TabInsightConfig>, Error> {
    TABINSIGHT_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    // Check if the configuration has already been loaded
    if TABINSIGHT_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = TabInsightConfig::load()?;
    TABINSIGHT_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

static TEST_CONFIG_INIT: Mutex<()> = Mutex::new(());

/// Loads the configuration once, whatever the number of tests asking for it.
pub fn load_configuration_for_tests() -> Result<(), Error> {
    let _guard = TEST_CONFIG_INIT
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if TABINSIGHT_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = TabInsightConfig::load()?;
    TABINSIGHT_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_config() {
        let config = TabInsightConfig::load().unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.endpoint, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.default_input_format, "csv");
        assert!(config.sentry_dsn.is_none());

        temp_env::with_var("TABINSIGHT_PORT", Some("8080"), || {
            let config = TabInsightConfig::load().unwrap();
            assert_eq!(config.port, 8080);
        });
    }

    #[test]
    #[serial]
    fn test_parse_http_body_limit() {
        let config = TabInsightConfig::load().unwrap();
        assert_eq!(config.parse_http_body_limit().unwrap(), 10000000);

        temp_env::with_var("TABINSIGHT_HTTP_BODY_LIMIT", Some("12345"), || {
            let config = TabInsightConfig::load().unwrap();
            assert_eq!(config.parse_http_body_limit().unwrap(), 12345);
        });

        temp_env::with_var("TABINSIGHT_HTTP_BODY_LIMIT", Some("10MiB"), || {
            let config = TabInsightConfig::load().unwrap();
            assert_eq!(config.parse_http_body_limit().unwrap(), 10485760);
        });

        temp_env::with_var("TABINSIGHT_HTTP_BODY_LIMIT", Some("1tb"), || {
            let config = TabInsightConfig::load().unwrap();
            assert!(config.parse_http_body_limit().is_err());
        });

        temp_env::with_var("TABINSIGHT_HTTP_BODY_LIMIT", Some("-5mb"), || {
            let config = TabInsightConfig::load().unwrap();
            assert!(config.parse_http_body_limit().is_err());
        });
    }

    #[test]
    #[serial]
    fn test_analysis_options() {
        let config = TabInsightConfig::load().unwrap();
        assert_eq!(config.analysis_options().unwrap(), AnalysisOptions::default());

        temp_env::with_vars(
            [
                ("TABINSIGHT_CURRENCY_SYMBOLS", Some("$€£")),
                ("TABINSIGHT_THOUSANDS_SEPARATORS", Some(",_")),
                ("TABINSIGHT_MAX_INSIGHTS", Some("2")),
                ("TABINSIGHT_SELECTION", Some("variance")),
            ],
            || {
                let options = TabInsightConfig::load().unwrap().analysis_options().unwrap();
                assert_eq!(options.numeric_format.currency_symbols, vec!['$', '€', '£']);
                assert_eq!(options.numeric_format.thousands_separators, vec![',', '_']);
                assert_eq!(options.max_insights, 2);
                assert_eq!(options.selection, SelectionPolicy::HighestVariance);
            },
        );

        temp_env::with_var("TABINSIGHT_SELECTION", Some("random"), || {
            let config = TabInsightConfig::load().unwrap();
            assert!(config.analysis_options().is_err());
        });

        temp_env::with_var("TABINSIGHT_SAMPLE_SIZE", Some("0"), || {
            let config = TabInsightConfig::load().unwrap();
            assert!(config.analysis_options().is_err());
        });
    }

    #[test]
    #[serial]
    fn test_load_configuration() {
        load_configuration().unwrap();
        assert!(TABINSIGHT_CONFIG.get().is_some());

        let config = get().unwrap();
        assert_eq!(config.port, 3000);
        assert!(load_configuration_for_tests().is_ok());
    }
}
