use std::sync::Arc;

use tracing::{info, warn};

use crate::features::adventures::models::{fallback_adventures, AdventurePrompt, GRADIENTS};
use crate::modules::gemini::{GenerateRequest, GenerativeModel};
use crate::shared::prompts::render_adventures_prompt;

/// Number of adventures served per request
pub const ADVENTURE_COUNT: usize = 4;

const FIELD_COUNT: usize = 6;

/// Parse `theme|lighting|prompt|emoji|title|description` lines.
///
/// Blank lines, lines without `|` and lines with fewer than six fields are
/// skipped. At most four adventures are kept. The gradient comes from the
/// line's position in the raw text, not its position among valid lines.
pub fn parse_adventures(text: &str) -> Vec<AdventurePrompt> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && line.contains('|'))
        .filter_map(|(index, line)| {
            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            if fields.len() < FIELD_COUNT {
                return None;
            }

            Some(AdventurePrompt {
                theme: fields[0].to_string(),
                lighting: fields[1].to_string(),
                prompt: fields[2].to_string(),
                emoji: fields[3].to_string(),
                title: fields[4].to_string(),
                description: fields[5].to_string(),
                gradient: GRADIENTS[index % GRADIENTS.len()].to_string(),
            })
        })
        .take(ADVENTURE_COUNT)
        .collect()
}

/// Suggests quick-start scenes using the text model
pub struct AdventureService {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
}

impl AdventureService {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Always returns exactly four adventures; failures fall back to a
    /// fixed list and are only logged.
    pub async fn generate(&self) -> Vec<AdventurePrompt> {
        let prompt = match render_adventures_prompt() {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Failed to render adventures prompt: {}", e);
                return fallback_adventures();
            }
        };

        let response = match self
            .model
            .generate_content(&self.model_name, GenerateRequest::new().text(prompt))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to generate random adventures: {}", e);
                return fallback_adventures();
            }
        };

        let Some(text) = response.first_text() else {
            warn!("Adventure response had no text, using fallback");
            return fallback_adventures();
        };

        let adventures = parse_adventures(text);
        if adventures.len() < ADVENTURE_COUNT {
            warn!(
                "Only {} valid adventures parsed, using fallback",
                adventures.len()
            );
            return fallback_adventures();
        }

        info!("Generated {} random adventures", adventures.len());
        adventures
    }
}
