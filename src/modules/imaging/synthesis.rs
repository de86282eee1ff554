use std::sync::Arc;

use tracing::{debug, info};

use super::ImagingError;
use crate::modules::gemini::{Blob, GenerateRequest, GenerativeModel, ResponsePart};

/// Image produced by the model, not yet persisted
pub type GeneratedAsset = Blob;

/// Generates images from a prompt and optional reference images
pub struct ImageSynthesizer {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
}

impl ImageSynthesizer {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Generate a single image.
    ///
    /// References are sent after the prompt in the order given. The first
    /// image part of the first candidate is returned; text parts are logged
    /// and skipped.
    pub async fn synthesize(
        &self,
        prompt: &str,
        references: Vec<Blob>,
    ) -> Result<GeneratedAsset, ImagingError> {
        let mut request = GenerateRequest::new().text(prompt).with_image_output();
        for reference in references {
            request = request.inline_data(reference);
        }

        info!(
            "Generating image with {} ({} reference images)",
            self.model_name,
            request.inline_data_count()
        );

        let response = self
            .model
            .generate_content(&self.model_name, request)
            .await?;

        let parts = response
            .first_candidate_parts()
            .ok_or(ImagingError::NoImageGenerated)?;

        for (index, part) in parts.iter().enumerate() {
            match part {
                ResponsePart::Image(blob) => {
                    info!(
                        "Generated image! MIME type: {}, size: {} bytes",
                        blob.mime_type,
                        blob.data.len()
                    );
                    return Ok(blob.clone());
                }
                ResponsePart::Text(text) => {
                    debug!("Part {} is text: {}", index, text);
                }
                ResponsePart::Unknown => {
                    debug!("Part {} has an unrecognized shape, skipping", index);
                }
            }
        }

        Err(ImagingError::NoImageGenerated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::gemini::{Candidate, GenerateResponse, ModelError, RequestPart};
    use crate::shared::test_helpers::{text_response, MockModel};

    fn png(bytes: &[u8]) -> Blob {
        Blob::new("image/png", bytes.to_vec())
    }

    #[tokio::test]
    async fn test_returns_first_image_part() {
        let response = GenerateResponse {
            candidates: vec![
                Candidate {
                    parts: vec![
                        ResponsePart::Text("Sure! Here you go".to_string()),
                        ResponsePart::Unknown,
                        ResponsePart::Image(png(b"first")),
                        ResponsePart::Image(png(b"second")),
                    ],
                },
                Candidate {
                    parts: vec![ResponsePart::Image(png(b"other candidate"))],
                },
            ],
        };
        let model = Arc::new(MockModel::new(vec![Ok(response)]));
        let synthesizer = ImageSynthesizer::new(model, "image-model");

        let asset = synthesizer.synthesize("a toy", Vec::new()).await.unwrap();
        assert_eq!(asset, png(b"first"));
    }

    #[tokio::test]
    async fn test_sends_prompt_then_references_in_order() {
        let model = Arc::new(MockModel::new(vec![Ok(GenerateResponse {
            candidates: vec![Candidate {
                parts: vec![ResponsePart::Image(png(b"out"))],
            }],
        })]));
        let synthesizer = ImageSynthesizer::new(model.clone(), "image-model");

        synthesizer
            .synthesize("compose", vec![png(b"background"), png(b"figurine")])
            .await
            .unwrap();

        let calls = model.calls();
        assert_eq!(calls[0].model, "image-model");
        let request = &calls[0].request;
        assert!(request.image_output);
        assert_eq!(
            request.parts,
            vec![
                RequestPart::Text("compose".to_string()),
                RequestPart::InlineData(png(b"background")),
                RequestPart::InlineData(png(b"figurine")),
            ]
        );
    }

    #[tokio::test]
    async fn test_fails_when_only_text_is_returned() {
        let model = Arc::new(MockModel::new(vec![Ok(text_response(
            "I cannot draw that",
        ))]));
        let synthesizer = ImageSynthesizer::new(model, "image-model");

        let err = synthesizer.synthesize("a toy", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ImagingError::NoImageGenerated));
    }

    #[tokio::test]
    async fn test_fails_without_candidates() {
        let model = Arc::new(MockModel::new(vec![Ok(GenerateResponse::default())]));
        let synthesizer = ImageSynthesizer::new(model, "image-model");

        let err = synthesizer.synthesize("a toy", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ImagingError::NoImageGenerated));
        assert_eq!(err.to_string(), "no image generated");
    }

    #[tokio::test]
    async fn test_propagates_model_errors() {
        let model = Arc::new(MockModel::new(vec![Err(ModelError::Request(
            "connection reset".to_string(),
        ))]));
        let synthesizer = ImageSynthesizer::new(model, "image-model");

        let err = synthesizer.synthesize("a toy", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ImagingError::Model(ModelError::Request(_))));
    }
}
