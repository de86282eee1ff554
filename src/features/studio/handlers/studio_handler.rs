use axum::{
    extract::{Multipart, State},
    response::Html,
    Form,
};
use std::sync::Arc;
use tracing::{debug, error};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::studio::dtos::{
    CaptionFormDto, ComposeFormDto, SceneFormDto, UploadedPhoto,
};
use crate::features::studio::services::{StudioError, StudioService};
use crate::shared::templates::{render_error, render_success, OperationKind};

/// Render the outcome of a pipeline as an htmx fragment.
///
/// Pipeline failures are logged and shown to the user as a generic error
/// panel with a 200 status; only template failures become HTTP errors.
fn fragment_response(
    kind: OperationKind,
    outcome: std::result::Result<String, StudioError>,
    failure_message: &str,
) -> Result<Html<String>> {
    let html = match outcome {
        Ok(url) => render_success(kind, &url)?,
        Err(e) => {
            error!("{} failed: {}", kind.result_id(), e);
            render_error(kind, failure_message)?
        }
    };

    Ok(Html(html))
}

/// Read the `photo` field from a multipart upload
async fn read_photo(mut multipart: Multipart) -> Result<UploadedPhoto> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest("Failed to parse form".to_string())
    })? {
        if field.name() != Some("photo") {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let content_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read photo bytes: {}", e);
            AppError::BadRequest("Failed to parse form".to_string())
        })?;

        if data.is_empty() {
            break;
        }

        return Ok(UploadedPhoto::new(data.to_vec(), content_type.as_deref()));
    }

    Err(AppError::BadRequest("No photo uploaded".to_string()))
}

/// Upload a photo and turn it into a figurine
///
/// Accepts multipart/form-data with a `photo` file field.
pub async fn create_figurine(
    State(service): State<Arc<StudioService>>,
    multipart: Multipart,
) -> Result<Html<String>> {
    let photo = read_photo(multipart).await?;

    let outcome = service
        .create_figurine(&photo.data, &photo.mime_type)
        .await;

    fragment_response(
        OperationKind::Figurine,
        outcome,
        "Failed to transform image",
    )
}

/// Generate a background scene
pub async fn generate_scene(
    State(service): State<Arc<StudioService>>,
    Form(dto): Form<SceneFormDto>,
) -> Result<Html<String>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = service
        .generate_scene(&dto.theme, &dto.time_of_day, &dto.prompt)
        .await;

    fragment_response(OperationKind::Scene, outcome, "Failed to generate scene")
}

/// Merge a figurine into a background scene
pub async fn compose_scene(
    State(service): State<Arc<StudioService>>,
    Form(dto): Form<ComposeFormDto>,
) -> Result<Html<String>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = service
        .compose_scene(&dto.figurine_url, &dto.background_url)
        .await;

    fragment_response(
        OperationKind::Composition,
        outcome,
        "Failed to compose scene",
    )
}

/// Caption for a scene prompt, returned as plain text
pub async fn generate_caption(
    State(service): State<Arc<StudioService>>,
    Form(dto): Form<CaptionFormDto>,
) -> Result<String> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    match service.generate_caption(&dto.prompt).await {
        Ok(caption) => Ok(caption),
        Err(e) => {
            error!("Caption generation failed: {}", e);
            Ok("Failed to generate caption".to_string())
        }
    }
}
