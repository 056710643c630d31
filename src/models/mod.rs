pub mod draft;
pub mod samples;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use draft::PropertyDraft;

/// Category of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Apartment,
    House,
    Penthouse,
    Villa,
    Plot,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Penthouse,
        PropertyType::Villa,
        PropertyType::Plot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Penthouse => "Penthouse",
            PropertyType::Villa => "Villa",
            PropertyType::Plot => "Plot",
        }
    }

    /// Label shown to buyers in the search panel
    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "דירה",
            PropertyType::House => "בית פרטי",
            PropertyType::Penthouse => "פנטהאוז",
            PropertyType::Villa => "וילה",
            PropertyType::Plot => "מגרש",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ListingError::UnknownType(s.to_string()))
    }
}

/// Rejections the admin surface has to tell apart
#[derive(Debug, Error, PartialEq)]
pub enum ListingError {
    #[error("יש להוסיף לפחות תמונה אחת לנכס")]
    MissingImages,
    #[error("listing id {0} is already in use")]
    DuplicateId(String),
    #[error("no image at position {0}")]
    InvalidImageIndex(usize),
    #[error("{field} must not be negative")]
    NegativeValue { field: &'static str },
    #[error("unknown property type: {0}")]
    UnknownType(String),
}

/// A single listing
///
/// Serialized as camelCase JSON. Records written in the older single
/// `image` shape are folded into `images` when read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "StoredProperty")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: u64,
    pub bedrooms: f32,
    pub bathrooms: f32,
    pub area: f32,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub images: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Property {
    /// Cover image, if any
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// Check the invariants a listing must hold before it is stored
    pub fn validate(&self) -> Result<(), ListingError> {
        if self.images.is_empty() {
            return Err(ListingError::MissingImages);
        }
        for (field, value) in [
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
            ("area", self.area),
        ] {
            if value < 0.0 || value.is_nan() {
                return Err(ListingError::NegativeValue { field });
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            location: self.location.clone(),
            price: self.price,
            property_type: self.property_type,
        }
    }
}

/// The slice of a listing handed to the advice service
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: u64,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

/// On-disk shape, accepting both `images` and the older `image` field
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProperty {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    price: u64,
    #[serde(default)]
    bedrooms: f32,
    #[serde(default)]
    bathrooms: f32,
    #[serde(default)]
    area: f32,
    #[serde(rename = "type")]
    property_type: PropertyType,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    featured: Option<bool>,
}

impl From<StoredProperty> for Property {
    fn from(stored: StoredProperty) -> Self {
        let mut images = stored.images;
        if images.is_empty() {
            images.extend(stored.image.filter(|i| !i.trim().is_empty()));
        }

        Property {
            id: stored.id,
            title: stored.title,
            location: stored.location,
            price: stored.price,
            bedrooms: stored.bedrooms,
            bathrooms: stored.bathrooms,
            area: stored.area,
            property_type: stored.property_type,
            images,
            description: stored.description,
            video_url: stored.video_url.filter(|v| !v.trim().is_empty()),
            featured: stored.featured,
        }
    }
}

/// Format a price the way the site shows it, e.g. `₪2,450,000`
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("₪{}", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_legacy_single_image_shape() {
        let raw = json!({
            "id": "1",
            "title": "דירה",
            "location": "קריית גת",
            "price": 2150000,
            "bedrooms": 4,
            "bathrooms": 2,
            "area": 105,
            "type": "Apartment",
            "image": "https://example.com/a.jpg",
            "description": "",
            "featured": false
        });

        let property: Property = serde_json::from_value(raw).unwrap();
        assert_eq!(property.images, vec!["https://example.com/a.jpg".to_string()]);

        let written = serde_json::to_value(&property).unwrap();
        assert!(written.get("image").is_none());
        assert_eq!(written["images"][0], "https://example.com/a.jpg");
    }

    #[test]
    fn empty_video_url_is_absent() {
        let raw = json!({
            "id": "2",
            "title": "t",
            "location": "l",
            "price": 1,
            "bedrooms": 0,
            "bathrooms": 0,
            "area": 300,
            "type": "Plot",
            "images": ["x"],
            "videoUrl": "",
            "description": ""
        });

        let property: Property = serde_json::from_value(raw).unwrap();
        assert_eq!(property.video_url, None);
        assert_eq!(property.featured, None);
    }

    #[test]
    fn validate_requires_an_image() {
        let mut property = samples::default_listings().remove(0);
        property.images.clear();
        assert_eq!(property.validate(), Err(ListingError::MissingImages));
    }

    #[test]
    fn parses_type_names() {
        assert_eq!("villa".parse::<PropertyType>(), Ok(PropertyType::Villa));
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn formats_prices_with_grouping() {
        assert_eq!(format_price(2_450_000), "₪2,450,000");
        assert_eq!(format_price(999), "₪999");
        assert_eq!(format_price(0), "₪0");
    }
}
