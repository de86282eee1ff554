use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::modules::gemini::{Blob, GenerateRequest, GenerativeModel, ModelError};
use crate::modules::imaging::{ImageAnalyzer, ImageSynthesizer, ImagingError};
use crate::modules::storage::{AssetKind, LocalObjectStore, StorageError};
use crate::shared::prompts::{
    render_caption_prompt, render_composition_prompt, render_figurine_prompt,
    render_scene_prompt,
};
use crate::shared::templates::TemplateError;

/// Caption used when the model answers without text
pub const DEFAULT_CAPTION: &str = "Adventure awaits!";

/// Stored assets are always written and re-read as PNG
const STORED_MIME_TYPE: &str = "image/png";

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("no person detected in photo")]
    NoPersonDetected,

    #[error("no image generated")]
    NoImageGenerated,
}

impl From<ImagingError> for StudioError {
    fn from(err: ImagingError) -> Self {
        match err {
            ImagingError::Model(e) => StudioError::Model(e),
            ImagingError::Template(e) => StudioError::Template(e),
            ImagingError::NoImageGenerated => StudioError::NoImageGenerated,
        }
    }
}

/// Orchestrates the figurine, scene, composition and caption pipelines
pub struct StudioService {
    model: Arc<dyn GenerativeModel>,
    text_model: String,
    analyzer: ImageAnalyzer,
    synthesizer: ImageSynthesizer,
    store: Arc<LocalObjectStore>,
}

impl StudioService {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        text_model: &str,
        image_model: &str,
        store: Arc<LocalObjectStore>,
    ) -> Self {
        Self {
            analyzer: ImageAnalyzer::new(Arc::clone(&model), text_model),
            synthesizer: ImageSynthesizer::new(Arc::clone(&model), image_model),
            model,
            text_model: text_model.to_string(),
            store,
        }
    }

    /// Turn an uploaded photo into a stored figurine image.
    ///
    /// The photo is analysed first; synthesis only runs when a person was
    /// detected in the description.
    pub async fn create_figurine(
        &self,
        photo: &[u8],
        mime_type: &str,
    ) -> Result<String, StudioError> {
        info!(
            "Analyzing uploaded photo ({} bytes, {})",
            photo.len(),
            mime_type
        );

        let analysis = self.analyzer.analyze(photo, mime_type).await?;
        if !analysis.person_detected {
            warn!(
                "No person detected in photo, description: {}",
                analysis.description
            );
            return Err(StudioError::NoPersonDetected);
        }

        let prompt = render_figurine_prompt(&analysis.description)?;
        let asset = self.synthesizer.synthesize(&prompt, Vec::new()).await?;
        let url = self.store.put(&asset.data, AssetKind::Figurine).await?;

        info!("Figurine stored at {}", url);
        Ok(url)
    }

    /// Generate a background scene and store it
    pub async fn generate_scene(
        &self,
        theme: &str,
        time_of_day: &str,
        details: &str,
    ) -> Result<String, StudioError> {
        info!("Generating scene: theme={}, time_of_day={}", theme, time_of_day);

        let prompt = render_scene_prompt(theme, time_of_day, details)?;
        let asset = self.synthesizer.synthesize(&prompt, Vec::new()).await?;
        let url = self.store.put(&asset.data, AssetKind::Scene).await?;

        info!("Scene stored at {}", url);
        Ok(url)
    }

    /// Place a stored figurine onto a stored background.
    ///
    /// Both assets are loaded before the model is called, so an unreadable
    /// URL never costs a remote call.
    pub async fn compose_scene(
        &self,
        figurine_url: &str,
        background_url: &str,
    ) -> Result<String, StudioError> {
        let figurine = self.store.get(figurine_url).await?;
        let background = self.store.get(background_url).await?;

        debug!(
            "Loaded figurine ({} bytes) and background ({} bytes)",
            figurine.len(),
            background.len()
        );

        let prompt = render_composition_prompt()?;
        let references = vec![
            Blob::new(STORED_MIME_TYPE, background),
            Blob::new(STORED_MIME_TYPE, figurine),
        ];

        let asset = self.synthesizer.synthesize(&prompt, references).await?;
        let url = self.store.put(&asset.data, AssetKind::Composed).await?;

        info!("Composed scene stored at {}", url);
        Ok(url)
    }

    /// One-line comic caption for a scene prompt
    pub async fn generate_caption(&self, scene_prompt: &str) -> Result<String, StudioError> {
        let prompt = render_caption_prompt(scene_prompt)?;
        let request = GenerateRequest::new().text(prompt);

        let response = self
            .model
            .generate_content(&self.text_model, request)
            .await?;

        let caption = response
            .first_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_CAPTION.to_string());

        Ok(caption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::gemini::{GenerateResponse, RequestPart};
    use crate::shared::test_helpers::{image_response, text_response, MockModel};
    use tempfile::TempDir;

    fn service(model: Arc<MockModel>, dir: &TempDir) -> StudioService {
        StudioService::new(
            model,
            "text-model",
            "image-model",
            Arc::new(LocalObjectStore::new(dir.path())),
        )
    }

    #[tokio::test]
    async fn test_create_figurine_stores_generated_image() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(MockModel::new(vec![
            Ok(text_response("A person with curly red hair and a green jacket")),
            Ok(image_response(b"figurine-png".to_vec())),
        ]));
        let service = service(model.clone(), &dir);

        let url = service
            .create_figurine(b"photo", "image/jpeg")
            .await
            .unwrap();

        assert!(url.starts_with("/static/uploads/figurine_"));
        assert_eq!(service.store.get(&url).await.unwrap(), b"figurine-png");

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].model, "text-model");
        assert_eq!(calls[1].model, "image-model");
        assert!(calls[1]
            .request
            .prompt_text()
            .contains("curly red hair and a green jacket"));
        assert_eq!(calls[1].request.inline_data_count(), 0);
    }

    #[tokio::test]
    async fn test_create_figurine_without_person_skips_synthesis() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(MockModel::new(vec![Ok(text_response(
            "a landscape with no person visible",
        ))]));
        let service = service(model.clone(), &dir);

        let err = service
            .create_figurine(b"photo", "image/jpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, StudioError::NoPersonDetected));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_scene_renders_prompt() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(MockModel::new(vec![Ok(image_response(b"scene".to_vec()))]));
        let service = service(model.clone(), &dir);

        let url = service
            .generate_scene("underwater-temple", "golden-hour", "lots of coral")
            .await
            .unwrap();

        assert!(url.starts_with("/static/uploads/scene_"));
        let prompt = model.calls()[0].request.prompt_text();
        assert!(prompt.contains("underwater-temple scene with golden-hour lighting"));
        assert!(prompt.contains("lots of coral"));
    }

    #[tokio::test]
    async fn test_generate_scene_without_image_fails() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(MockModel::new(vec![Ok(text_response("no can do"))]));
        let service = service(model, &dir);

        let err = service
            .generate_scene("jungle", "sunset", "")
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::NoImageGenerated));
    }

    #[tokio::test]
    async fn test_compose_sends_background_then_figurine() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(MockModel::new(vec![Ok(image_response(b"merged".to_vec()))]));
        let service = service(model.clone(), &dir);

        let figurine_url = service
            .store
            .put(b"figurine", AssetKind::Figurine)
            .await
            .unwrap();
        let background_url = service
            .store
            .put(b"background", AssetKind::Scene)
            .await
            .unwrap();

        let url = service
            .compose_scene(&figurine_url, &background_url)
            .await
            .unwrap();
        assert!(url.starts_with("/static/uploads/composed_"));

        let request = &model.calls()[0].request;
        assert_eq!(
            request.parts[1..],
            [
                RequestPart::InlineData(Blob::new("image/png", b"background".to_vec())),
                RequestPart::InlineData(Blob::new("image/png", b"figurine".to_vec())),
            ]
        );
    }

    #[tokio::test]
    async fn test_compose_with_unsupported_url_never_calls_model() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(MockModel::new(Vec::new()));
        let service = service(model.clone(), &dir);

        let err = service
            .compose_scene("https://evil.example/figurine.png", "/static/uploads/x.png")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StudioError::Storage(StorageError::UnsupportedUrl(_))
        ));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_caption_is_trimmed_and_defaults() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(MockModel::new(vec![
            Ok(text_response("  Monkey business in orbit!\n")),
            Ok(GenerateResponse::default()),
        ]));
        let service = service(model.clone(), &dir);

        let caption = service.generate_caption("a space station").await.unwrap();
        assert_eq!(caption, "Monkey business in orbit!");
        assert_eq!(model.calls()[0].model, "text-model");

        let caption = service.generate_caption("a space station").await.unwrap();
        assert_eq!(caption, DEFAULT_CAPTION);
    }

    #[tokio::test]
    async fn test_caption_propagates_model_errors() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(MockModel::new(vec![Err(ModelError::Api {
            status: 503,
            message: "overloaded".to_string(),
        })]));
        let service = service(model, &dir);

        let err = service.generate_caption("a castle").await.unwrap_err();
        assert!(matches!(err, StudioError::Model(ModelError::Api { status: 503, .. })));
    }
}
