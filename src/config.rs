use std::path::Path;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "chat-widget.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Backend base URL
    #[arg(long, env = "CHAT_BACKEND_URL")]
    pub base_url: Option<String>,

    /// Name of the person the assistant represents
    #[arg(long, env = "CHAT_SUBJECT_NAME")]
    pub subject: Option<String>,

    /// Seconds between health probes (0 disables)
    #[arg(long, env = "CHAT_HEALTH_INTERVAL")]
    pub health_interval: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub widget: WidgetSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub health_path: String,
    pub chat_path: String,
    /// No timeout unless set; a hung request keeps the widget busy.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WidgetSettings {
    pub subject_name: String,
    /// Replaces the generated greeting entirely.
    #[serde(default)]
    pub greeting: Option<String>,
    pub health_interval_secs: u64,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            subject_name: "Benitha".to_string(),
            greeting: None,
            health_interval_secs: 30,
        }
    }
}

impl WidgetSettings {
    /// First transcript entry.
    pub fn greeting_text(&self) -> String {
        match &self.greeting {
            Some(greeting) if !greeting.trim().is_empty() => greeting.clone(),
            _ => format!(
                "Hello! I'm {name}'s AI assistant. I can help you learn about {name}'s background, skills, experience, and availability. What would you like to know?",
                name = self.subject_name
            ),
        }
    }

    /// Periodic probe interval, `None` when disabled.
    pub fn health_interval(&self) -> Option<Duration> {
        (self.health_interval_secs > 0).then(|| Duration::from_secs(self.health_interval_secs))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let defaults = WidgetSettings::default();
        let mut builder = Config::builder()
            .set_default("backend.base_url", "http://127.0.0.1:5000")?
            .set_default("backend.health_path", "/health")?
            .set_default("backend.chat_path", "/chat")?
            .set_default("widget.subject_name", defaults.subject_name)?
            .set_default("widget.health_interval_secs", defaults.health_interval_secs)?;

        // Explicit file must exist; the cwd fallback is optional.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path).required(true));
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
        }

        // E.g. CHAT_WIDGET_BACKEND__BASE_URL=http://localhost:8080
        builder = builder.add_source(
            Environment::with_prefix("CHAT_WIDGET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Flags (and their env aliases) win over everything else.
        if let Some(url) = cli.base_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(subject) = cli.subject {
            builder = builder.set_override("widget.subject_name", subject)?;
        }
        if let Some(secs) = cli.health_interval {
            builder = builder.set_override("widget.health_interval_secs", secs)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
