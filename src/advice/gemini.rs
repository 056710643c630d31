use crate::advice::traits::AdviceService;
use crate::models::ListingSummary;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

/// Connection settings for the Gemini endpoint
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Agent the assistant speaks for
    pub agent_name: String,
}

/// Advice backed by Google's generateContent API
pub struct GeminiAdvisor {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiAdvisor {
    pub fn new(settings: GeminiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Prompt sent with every question: persona, the question, and the listings
/// on offer as JSON
pub fn build_prompt(agent_name: &str, question: &str, listings: &[ListingSummary]) -> Result<String> {
    let context = serde_json::to_string(listings).context("Failed to serialize listing context")?;

    Ok(format!(
        "אתה עוזר נדל\"ן אישי באתר של {agent}.\n\
         המשתמש שאל: \"{question}\"\n\
         \n\
         אלו הנכסים הזמינים כרגע במערכת:\n\
         {context}\n\
         \n\
         אנא ענה למשתמש בעברית רהוטה ומקצועית.\n\
         אם המשתמש מחפש נכס מסוים, המלץ לו על הנכסים המתאימים ביותר מהרשימה שסיפקתי.\n\
         אם הוא שואל שאלות כלליות על נדל\"ן בישראל, ענה לו בצורה מקצועית ומכבדת.\n\
         תמיד תזכיר ש{agent} היא המומחית שתשמח לעזור לו באופן אישי.\n\
         שמור על תשובות קצרות וקולעות.",
        agent = agent_name,
        question = question,
        context = context,
    ))
}

/// Concatenated text of the first candidate, empty if there is none
fn extract_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[async_trait]
impl AdviceService for GeminiAdvisor {
    async fn advise(&self, question: &str, listings: &[ListingSummary]) -> Result<String> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .context("Gemini API key is not configured")?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(&self.settings.agent_name, question, listings)?),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        debug!("Asking {} with {} listings as context", self.settings.model, listings.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach Gemini")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned status: {}", status);
            anyhow::bail!("Gemini request failed: {} {}", status, body);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        Ok(extract_text(body))
    }

    fn provider_name(&self) -> &'static str {
        "Gemini"
    }
}
