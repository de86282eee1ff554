//! Photo analysis and image synthesis on top of the generative model

mod analysis;
mod synthesis;

use thiserror::Error;

use crate::modules::gemini::ModelError;
use crate::shared::templates::TemplateError;

pub use analysis::{ImageAnalyzer, PhotoAnalysis};
pub use synthesis::{GeneratedAsset, ImageSynthesizer};

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("no image generated")]
    NoImageGenerated,
}
