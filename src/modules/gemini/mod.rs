//! Gemini generative model integration
//!
//! `GenerativeModel` is the seam the rest of the service talks to;
//! `GeminiClient` implements it over the Generative Language REST API.

mod client;
mod types;

use async_trait::async_trait;

pub use client::GeminiClient;
pub use types::{
    Blob, Candidate, GenerateRequest, GenerateResponse, ModelError, RequestPart, ResponsePart,
};

/// A remote model that turns prompt parts into response parts
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, ModelError>;
}
