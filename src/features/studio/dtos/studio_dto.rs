use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fallback MIME type for uploads that do not declare an image type
pub const DEFAULT_PHOTO_MIME_TYPE: &str = "image/jpeg";

/// Form for `/hx/scene`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SceneFormDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Theme and time of day required"))]
    pub theme: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Theme and time of day required"))]
    pub time_of_day: String,

    /// Free-form extra details (optional)
    #[serde(default)]
    pub prompt: String,
}

/// Form for `/hx/compose`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ComposeFormDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Both figurine and background URLs required"))]
    pub figurine_url: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Both figurine and background URLs required"))]
    pub background_url: String,
}

/// Form for `/hx/caption`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CaptionFormDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Prompt required"))]
    pub prompt: String,
}

/// Photo read from the multipart `photo` field
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl UploadedPhoto {
    /// Keep the declared content type only when it is an image type
    pub fn new(data: Vec<u8>, content_type: Option<&str>) -> Self {
        let mime_type = content_type
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or(DEFAULT_PHOTO_MIME_TYPE)
            .to_string();

        Self { data, mime_type }
    }
}
