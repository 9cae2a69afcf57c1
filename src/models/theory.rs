use garde::Validate;
use serde::{Deserialize, Serialize};

/// A sociological theory as served by `/theories`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Theory {
    pub id: i64,
    #[serde(rename = "nomeTeoria")]
    pub title: String,
    #[serde(rename = "autore", default)]
    pub author: String,
    #[serde(rename = "immagineAutoreUrl", alias = "authorImageUrl", default)]
    pub author_image_url: Option<String>,
    #[serde(rename = "spiegazione", default)]
    pub explanation: String,
    #[serde(rename = "esempioApplicazioneModerna", default)]
    pub modern_example: Option<String>,
    #[serde(rename = "descrizioneBreve", default)]
    pub summary: Option<String>,
}

impl Theory {
    /// The short blurb shown on catalog cards.
    pub fn blurb(&self) -> &str {
        self.summary.as_deref().unwrap_or("No description available.")
    }
}

/// The admin form for creating or editing a theory.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct TheoryForm {
    #[serde(rename = "nomeTeoria")]
    #[garde(length(min = 1))]
    pub title: String,
    #[serde(rename = "autore")]
    #[garde(length(min = 1))]
    pub author: String,
    #[serde(rename = "immagineAutoreUrl")]
    #[garde(skip)]
    pub author_image_url: String,
    #[serde(rename = "spiegazione")]
    #[garde(length(min = 1))]
    pub explanation: String,
    #[serde(rename = "esempioApplicazioneModerna")]
    #[garde(length(min = 1))]
    pub modern_example: String,
}

impl TheoryForm {
    /// Pre-fills the form from an existing theory.
    pub fn from_theory(theory: &Theory) -> Self {
        Self {
            title: theory.title.clone(),
            author: theory.author.clone(),
            author_image_url: theory.author_image_url.clone().unwrap_or_default(),
            explanation: theory.explanation.clone(),
            modern_example: theory.modern_example.clone().unwrap_or_default(),
        }
    }
}
