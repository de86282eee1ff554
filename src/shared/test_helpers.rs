//! Test doubles shared across feature tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::modules::gemini::{
    Blob, Candidate, GenerateRequest, GenerateResponse, GenerativeModel, ModelError, ResponsePart,
};

/// One recorded call to the mock model
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub request: GenerateRequest,
}

/// Generative model double that replays scripted responses in order and
/// records every request it receives. Running out of script is an error.
pub struct MockModel {
    responses: Mutex<VecDeque<Result<GenerateResponse, ModelError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockModel {
    pub fn new(responses: Vec<Result<GenerateResponse, ModelError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, ModelError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            request,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Request("no scripted response left".to_string())))
    }
}

/// Single-candidate response with one text part
pub fn text_response(text: &str) -> GenerateResponse {
    GenerateResponse {
        candidates: vec![Candidate {
            parts: vec![ResponsePart::Text(text.to_string())],
        }],
    }
}

/// Single-candidate response with one PNG image part
pub fn image_response(data: Vec<u8>) -> GenerateResponse {
    GenerateResponse {
        candidates: vec![Candidate {
            parts: vec![ResponsePart::Image(Blob::new("image/png", data))],
        }],
    }
}
