use crate::advice::traits::AdviceService;
use crate::models::Property;
use tracing::{info, warn};

/// First message shown in the chat
pub fn greeting(agent_name: &str) -> String {
    format!(
        "שלום! אני העוזר האישי של {}. איך אוכל לעזור לכם למצוא את נכס החלומות שלכם היום?",
        agent_name
    )
}

/// Reply when the service answered with nothing
pub const EMPTY_REPLY_FALLBACK: &str = "סליחה, אני מתקשה לענות כרגע. אנא נסו שוב מאוחר יותר.";

/// Reply when the service could not be reached or refused the request
pub fn error_fallback(agent_name: &str) -> String {
    let first_name = agent_name.split_whitespace().next().unwrap_or(agent_name);
    format!(
        "אירעה שגיאה בתקשורת עם העוזר החכם. {} תשמח לעזור לך טלפונית.",
        first_name
    )
}

/// Who said a chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Chat front for an advice service
///
/// Never fails: any error from the service, or an empty answer, is replaced
/// with one of the static fallback replies.
pub struct AdviceDesk<A: AdviceService> {
    service: A,
    agent_name: String,
    transcript: Vec<ChatMessage>,
}

impl<A: AdviceService> AdviceDesk<A> {
    pub fn new(service: A, agent_name: &str) -> Self {
        Self {
            service,
            agent_name: agent_name.to_string(),
            transcript: vec![ChatMessage {
                role: Role::Assistant,
                content: greeting(agent_name),
            }],
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Ask about the given active listings. Blank input is ignored and
    /// yields `None`.
    pub async fn ask(&mut self, question: &str, active: &[Property]) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage {
            role: Role::User,
            content: question.to_string(),
        });

        let summaries: Vec<_> = active.iter().map(Property::summary).collect();
        let reply = match self.service.advise(question, &summaries).await {
            Ok(text) if !text.trim().is_empty() => {
                info!("{} answered ({} chars)", self.service.provider_name(), text.len());
                text
            }
            Ok(_) => {
                warn!("{} returned an empty answer", self.service.provider_name());
                EMPTY_REPLY_FALLBACK.to_string()
            }
            Err(e) => {
                warn!("{} advice failed: {:#}", self.service.provider_name(), e);
                error_fallback(&self.agent_name)
            }
        };

        self.transcript.push(ChatMessage {
            role: Role::Assistant,
            content: reply.clone(),
        });
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{samples, ListingSummary};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Canned reply, recording what it was asked
    struct Scripted {
        reply: Result<String, String>,
        seen: Mutex<Vec<(String, usize)>>,
    }

    impl Scripted {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AdviceService for Scripted {
        async fn advise(&self, question: &str, listings: &[ListingSummary]) -> Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push((question.to_string(), listings.len()));
            self.reply.clone().map_err(anyhow::Error::msg)
        }

        fn provider_name(&self) -> &'static str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn passes_answer_through_with_catalog_context() {
        let mut desk = AdviceDesk::new(Scripted::new(Ok("יש לנו פנטהאוז מעולה")), "שגית פלק");
        let active = samples::default_listings();

        let reply = desk.ask("  פנטהאוז? ", &active).await;
        assert_eq!(reply.as_deref(), Some("יש לנו פנטהאוז מעולה"));
        assert_eq!(
            *desk.service.seen.lock().unwrap(),
            vec![("פנטהאוז?".to_string(), 4)]
        );
        assert_eq!(desk.transcript().len(), 3);
        assert_eq!(desk.transcript()[1].role, Role::User);
    }

    #[tokio::test]
    async fn service_error_becomes_fallback() {
        let mut desk = AdviceDesk::new(Scripted::new(Err("connection refused")), "שגית פלק");
        let reply = desk.ask("שאלה", &[]).await;
        assert_eq!(
            reply.as_deref(),
            Some("אירעה שגיאה בתקשורת עם העוזר החכם. שגית תשמח לעזור לך טלפונית.")
        );
    }

    #[tokio::test]
    async fn error_fallback_names_the_configured_agent() {
        let mut desk = AdviceDesk::new(Scripted::new(Err("timeout")), "רונית כהן");
        let reply = desk.ask("שאלה", &[]).await.unwrap();
        assert_eq!(reply, error_fallback("רונית כהן"));
        assert!(reply.contains("רונית תשמח"));
        assert!(!reply.contains("שגית"));
    }

    #[tokio::test]
    async fn empty_answer_becomes_fallback() {
        let mut desk = AdviceDesk::new(Scripted::new(Ok("  ")), "שגית פלק");
        let reply = desk.ask("שאלה", &[]).await;
        assert_eq!(reply.as_deref(), Some(EMPTY_REPLY_FALLBACK));
    }

    #[tokio::test]
    async fn blank_question_is_not_sent() {
        let mut desk = AdviceDesk::new(Scripted::new(Ok("x")), "שגית פלק");
        assert_eq!(desk.ask("   ", &[]).await, None);
        assert!(desk.service.seen.lock().unwrap().is_empty());
        assert_eq!(desk.transcript().len(), 1);
        assert!(desk.transcript()[0].content.contains("שגית פלק"));
    }
}
