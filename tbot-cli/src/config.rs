//! Application config loaded from the environment (after `dotenvy`).
//!
//! Required: BOT_TOKEN, MONGO_STR (or DATABASE_URL), CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY,
//! CLOUDINARY_API_SECRET. Everything else has a default.

use anyhow::{Context, Result};
use cloudinary_client::{CloudinaryConfig, DEFAULT_API_URL};
use std::env;
use std::time::Duration;
use storage::StoreBackend;
use tbot_core::mask_secret;
use tbot_telegram::TelegramConfig;
use upload_handlers::{PipelineSettings, DEFAULT_FOLDER};

pub const DEFAULT_MONGO_DATABASE: &str = "telegram_db";
pub const DEFAULT_MONGO_COLLECTION: &str = "lax_itsm";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub mongo_url: String,
    pub mongo_database: String,
    pub mongo_collection: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub cloudinary_folder: String,
    pub cloudinary_api_url: String,
    /// Bound applied to each network step of the pipeline and to Cloudinary HTTP requests.
    pub request_timeout: Duration,
}

/// Value of `name`, treating a blank value as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    non_empty(name).unwrap_or_else(|| default.to_string())
}

fn required(name: &str, missing: &mut Vec<&'static str>, label: &'static str) -> String {
    non_empty(name).unwrap_or_else(|| {
        missing.push(label);
        String::new()
    })
}

impl AppConfig {
    /// Loads configuration from env. If `token` is provided it overrides BOT_TOKEN.
    /// All missing required variables are reported in one error.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let mut missing = Vec::new();

        let token = token.filter(|t| !t.trim().is_empty());
        if token.is_none() && env::var("BOT_TOKEN").map_or(true, |t| t.trim().is_empty()) {
            missing.push("BOT_TOKEN");
        }

        let mongo_url = match non_empty("MONGO_STR").or_else(|| non_empty("DATABASE_URL")) {
            Some(v) => v,
            None => {
                missing.push("MONGO_STR");
                String::new()
            }
        };
        let cloudinary_cloud_name =
            required("CLOUDINARY_CLOUD_NAME", &mut missing, "CLOUDINARY_CLOUD_NAME");
        let cloudinary_api_key = required("CLOUDINARY_API_KEY", &mut missing, "CLOUDINARY_API_KEY");
        let cloudinary_api_secret =
            required("CLOUDINARY_API_SECRET", &mut missing, "CLOUDINARY_API_SECRET");

        if !missing.is_empty() {
            anyhow::bail!("Missing required configuration: {}", missing.join(", "));
        }

        let telegram = TelegramConfig::from_env(token)?;

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))?;
                Duration::from_secs(secs)
            }
            _ => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let config = Self {
            telegram,
            mongo_url,
            mongo_database: var_or("MONGO_DATABASE", DEFAULT_MONGO_DATABASE),
            mongo_collection: var_or("MONGO_COLLECTION", DEFAULT_MONGO_COLLECTION),
            cloudinary_cloud_name,
            cloudinary_api_key,
            cloudinary_api_secret,
            cloudinary_folder: var_or("CLOUDINARY_FOLDER", DEFAULT_FOLDER),
            cloudinary_api_url: var_or("CLOUDINARY_API_URL", DEFAULT_API_URL),
            request_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        StoreBackend::from_url(&self.mongo_url)
            .context("MONGO_STR must be a mongodb://, mongodb+srv://, sqlite: or file: URL")?;
        if self.cloudinary_folder.contains("..") {
            anyhow::bail!("CLOUDINARY_FOLDER must not contain '..'");
        }
        self.telegram.build_bot().map(|_| ())
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            folder: self.cloudinary_folder.clone(),
            step_timeout: self.request_timeout,
            staging_dir: None,
        }
    }

    pub fn cloudinary_config(&self) -> CloudinaryConfig {
        CloudinaryConfig::new(
            &self.cloudinary_cloud_name,
            &self.cloudinary_api_key,
            &self.cloudinary_api_secret,
        )
        .with_api_url(&self.cloudinary_api_url)
        .with_timeout(self.request_timeout)
    }

    /// Human-readable summary with the token, API secret and database credentials masked.
    pub fn summary(&self) -> String {
        let lines = [
            format!("bot_token: {}", mask_secret(&self.telegram.bot_token)),
            format!(
                "telegram_api_url: {}",
                self.telegram.telegram_api_url.as_deref().unwrap_or("(default)")
            ),
            format!("log_file: {}", self.telegram.log_file),
            format!("database_url: {}", mask_secret(&self.mongo_url)),
            format!("mongo_database: {}", self.mongo_database),
            format!("mongo_collection: {}", self.mongo_collection),
            format!("cloudinary_cloud_name: {}", self.cloudinary_cloud_name),
            format!("cloudinary_api_key: {}", self.cloudinary_api_key),
            format!("cloudinary_api_secret: {}", mask_secret(&self.cloudinary_api_secret)),
            format!("cloudinary_folder: {}", self.cloudinary_folder),
            format!("cloudinary_api_url: {}", self.cloudinary_api_url),
            format!("request_timeout_secs: {}", self.request_timeout.as_secs()),
        ];
        lines.join("\n")
    }
}
