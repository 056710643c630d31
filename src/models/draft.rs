use super::{ListingError, Property, PropertyType};
use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A listing being authored in the admin form
///
/// Images may be empty while editing; `into_property` refuses to finish
/// until at least one is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyDraft {
    pub id: Option<String>,
    pub title: String,
    pub location: String,
    pub price: u64,
    pub bedrooms: f32,
    pub bathrooms: f32,
    pub area: f32,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub images: Vec<String>,
    pub video_url: String,
    pub description: String,
    pub featured: bool,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            location: String::new(),
            price: 0,
            bedrooms: 0.0,
            bathrooms: 0.0,
            area: 0.0,
            property_type: PropertyType::Apartment,
            images: Vec::new(),
            video_url: String::new(),
            description: String::new(),
            featured: false,
        }
    }
}

impl From<Property> for PropertyDraft {
    fn from(p: Property) -> Self {
        Self {
            id: Some(p.id),
            title: p.title,
            location: p.location,
            price: p.price,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            area: p.area,
            property_type: p.property_type,
            images: p.images,
            video_url: p.video_url.unwrap_or_default(),
            description: p.description,
            featured: p.featured.unwrap_or(false),
        }
    }
}

impl PropertyDraft {
    /// Append an image reference; blank input is ignored
    pub fn add_image_url(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.images.push(url.to_string());
        true
    }

    /// Embed a local photo as a `data:` URI
    pub fn add_image_file(&mut self, path: &Path) -> Result<()> {
        let Some(mime) = mime_guess::from_path(path)
            .first()
            .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        else {
            bail!("{} is not a recognised image file", path.display());
        };
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

        self.images.push(format!(
            "data:{};base64,{}",
            mime.essence_str(),
            general_purpose::STANDARD.encode(bytes)
        ));
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) -> Result<String, ListingError> {
        if index >= self.images.len() {
            return Err(ListingError::InvalidImageIndex(index));
        }
        Ok(self.images.remove(index))
    }

    /// Move the image at `index` to the front, making it the cover
    pub fn set_primary_image(&mut self, index: usize) -> Result<(), ListingError> {
        if index >= self.images.len() {
            return Err(ListingError::InvalidImageIndex(index));
        }
        let selected = self.images.remove(index);
        self.images.insert(0, selected);
        Ok(())
    }

    /// Finish authoring. A blank id is left for the store to assign.
    pub fn into_property(self) -> Result<Property, ListingError> {
        let property = Property {
            id: self.id.filter(|id| !id.trim().is_empty()).unwrap_or_default(),
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area: self.area,
            property_type: self.property_type,
            images: self.images,
            description: self.description,
            video_url: Some(self.video_url.trim().to_string()).filter(|v| !v.is_empty()),
            featured: Some(self.featured),
        };
        property.validate()?;
        Ok(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn draft_with_images(images: &[&str]) -> PropertyDraft {
        PropertyDraft {
            title: "  וילה עם בריכה ".to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_image_urls_are_ignored() {
        let mut draft = PropertyDraft::default();
        assert!(!draft.add_image_url("   "));
        assert!(draft.add_image_url(" https://example.com/a.jpg "));
        assert_eq!(draft.images, vec!["https://example.com/a.jpg".to_string()]);
    }

    #[test]
    fn set_primary_moves_image_to_front() {
        let mut draft = draft_with_images(&["a", "b", "c"]);
        draft.set_primary_image(2).unwrap();
        assert_eq!(draft.images, vec!["c", "a", "b"]);
        assert_eq!(
            draft.set_primary_image(5),
            Err(ListingError::InvalidImageIndex(5))
        );
    }

    #[test]
    fn remove_image_by_position() {
        let mut draft = draft_with_images(&["a", "b"]);
        assert_eq!(draft.remove_image(0).unwrap(), "a");
        assert_eq!(draft.images, vec!["b"]);
        assert!(draft.remove_image(3).is_err());
    }

    #[test]
    fn local_photo_is_embedded_as_data_uri() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let mut draft = draft_with_images(&[]);
        draft.add_image_file(&path).unwrap();
        assert_eq!(draft.images, vec!["data:image/png;base64,iVBORw=="]);

        let property = draft.into_property().unwrap();
        assert!(property
            .primary_image()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[test]
    fn non_image_or_missing_files_are_refused() {
        let dir = tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "hello").unwrap();

        let mut draft = PropertyDraft::default();
        assert!(draft.add_image_file(&notes).is_err());
        assert!(draft.add_image_file(&dir.path().join("gone.jpg")).is_err());
        assert!(draft.images.is_empty());
    }

    #[test]
    fn finishing_without_images_is_rejected() {
        let draft = draft_with_images(&[]);
        assert_eq!(draft.into_property(), Err(ListingError::MissingImages));
    }

    #[test]
    fn finished_draft_keeps_id_and_trims_text() {
        let mut draft = draft_with_images(&["a"]);
        draft.id = Some("abc".to_string());
        draft.video_url = "  ".to_string();

        let property = draft.into_property().unwrap();
        assert_eq!(property.id, "abc");
        assert_eq!(property.title, "וילה עם בריכה");
        assert_eq!(property.video_url, None);
    }
}
