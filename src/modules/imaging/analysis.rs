use std::sync::Arc;

use tracing::info;

use super::ImagingError;
use crate::modules::gemini::{Blob, GenerateRequest, GenerativeModel};
use crate::shared::prompts::render_analysis_prompt;

/// Low temperature keeps the description literal
const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Description used when the model does not answer with text
pub const DEFAULT_DESCRIPTION: &str = "a person";

const NEGATIVE_PHRASES: &[&str] = &["no person", "no people", "no discernible"];
const POSITIVE_PHRASES: &[&str] = &["person", "face", "hair", "clothing"];

/// Result of analysing an uploaded photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAnalysis {
    pub description: String,
    pub person_detected: bool,
}

/// Keyword heuristic over the model's free-text description.
///
/// Any negative phrase wins over every positive keyword.
pub fn detect_person(description: &str) -> bool {
    let lowered = description.to_lowercase();

    if NEGATIVE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
    {
        return false;
    }

    POSITIVE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// Asks the model to describe the person in a photo
pub struct ImageAnalyzer {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
}

impl ImageAnalyzer {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Describe the photo and decide whether it shows a person.
    ///
    /// Call errors propagate. A response without a leading text part is not
    /// an error: it yields the default description and `person_detected =
    /// false`.
    pub async fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<PhotoAnalysis, ImagingError> {
        let instruction = render_analysis_prompt()?;

        let request = GenerateRequest::new()
            .text(instruction)
            .inline_data(Blob::new(mime_type, image.to_vec()))
            .temperature(ANALYSIS_TEMPERATURE);

        let response = self
            .model
            .generate_content(&self.model_name, request)
            .await?;

        let analysis = match response.first_text() {
            Some(text) => PhotoAnalysis {
                description: text.to_string(),
                person_detected: detect_person(text),
            },
            None => PhotoAnalysis {
                description: DEFAULT_DESCRIPTION.to_string(),
                person_detected: false,
            },
        };

        info!("Image analysis: {}", analysis.description);
        info!("Person detected: {}", analysis.person_detected);

        Ok(analysis)
    }
}
