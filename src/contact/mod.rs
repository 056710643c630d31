use crate::models::Property;
use anyhow::{Context, Result};
use reqwest::Url;

const WHATSAPP_BASE: &str = "https://wa.me/";
const COUNTRY_CODE: &str = "972";

/// Pre-filled WhatsApp links to the agent
pub struct ContactLinks {
    phone: String,
    agent_name: String,
}

impl ContactLinks {
    /// `phone` in local format, e.g. `0548188436`
    pub fn new(phone: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            agent_name: agent_name.into(),
        }
    }

    /// International number without the leading trunk zero
    fn international_number(&self) -> String {
        let digits: String = self.phone.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("{}{}", COUNTRY_CODE, digits.strip_prefix('0').unwrap_or(&digits))
    }

    fn first_name(&self) -> &str {
        self.agent_name.split_whitespace().next().unwrap_or(&self.agent_name)
    }

    /// General consultation request from a visitor
    pub fn consultation_message(&self, name: Option<&str>, phone: Option<&str>) -> String {
        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("אורח");
        let phone = phone.map(str::trim).unwrap_or("");
        format!(
            "שלום {}, שמי {}, אני פונה מהאתר ומעוניין בתיאום פגישת ייעוץ. הטלפון שלי: {}",
            self.first_name(),
            name,
            phone
        )
    }

    /// Inquiry about a specific listing
    pub fn listing_message(&self, property: &Property) -> String {
        format!(
            "שלום {}, ראיתי את הנכס \"{}\" ב{} באתר ואשמח לקבל עליו פרטים נוספים.",
            self.first_name(),
            property.title,
            property.location
        )
    }

    pub fn whatsapp_url(&self, message: &str) -> Result<Url> {
        let base = format!("{}{}", WHATSAPP_BASE, self.international_number());
        Url::parse_with_params(&base, &[("text", message)]).context("Failed to build WhatsApp link")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::samples;

    fn links() -> ContactLinks {
        ContactLinks::new("054-8188436", "שגית פלק")
    }

    #[test]
    fn number_drops_trunk_zero() {
        let url = links().whatsapp_url("hi").unwrap();
        assert_eq!(url.path(), "/972548188436");
        assert_eq!(url.host_str(), Some("wa.me"));
    }

    #[test]
    fn message_is_carried_in_text_param() {
        let message = links().consultation_message(Some("דנה"), Some("0501234567"));
        let url = links().whatsapp_url(&message).unwrap();

        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned());
        assert_eq!(text.as_deref(), Some(message.as_str()));
        assert!(message.contains("שמי דנה"));
        assert!(message.starts_with("שלום שגית,"));
    }

    #[test]
    fn anonymous_visitor_is_a_guest() {
        let message = links().consultation_message(Some("  "), None);
        assert!(message.contains("שמי אורח"));
    }

    #[test]
    fn listing_inquiry_names_title_and_location() {
        let property = &samples::default_listings()[1];
        let message = links().listing_message(property);
        assert!(message.contains("\"פנטהאוז מפואר עם מרפסת ענקית\""));
        assert!(message.contains("בקריית גת, כרמי גת"));
    }
}
