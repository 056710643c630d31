use crate::admin::DEFAULT_PASSWORD;
use crate::advice::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::advice::GeminiSettings;
use anyhow::{Context, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub advice_timeout: Duration,
    pub admin_password: String,
    pub agent_name: String,
    pub contact_phone: String,
}

impl AppConfig {
    /// Read settings from the environment, after loading `.env` if present
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let advice_timeout = match var("ADVICE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("ADVICE_TIMEOUT_SECS is not a number: {}", raw))?,
            ),
            None => Duration::from_secs(30),
        };

        Ok(Self {
            data_dir: var("LISTINGS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            gemini_api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            advice_timeout,
            admin_password: var("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            agent_name: var("AGENT_NAME").unwrap_or_else(|| "שגית פלק".to_string()),
            contact_phone: var("CONTACT_PHONE").unwrap_or_else(|| "0548188436".to_string()),
        })
    }

    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: self.advice_timeout,
            agent_name: self.agent_name.clone(),
        }
    }
}
