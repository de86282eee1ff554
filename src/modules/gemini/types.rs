use thiserror::Error;

/// Errors returned by a generative model backend
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Gemini request failed: {0}")]
    Request(String),

    #[error("Gemini request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode Gemini response: {0}")]
    Decode(String),
}

/// Binary payload with its declared MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// A single input part sent to the model
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPart {
    Text(String),
    InlineData(Blob),
}

/// Input for one `generateContent` call.
///
/// Parts are sent in insertion order; image models rely on it to tell
/// "image 1" from "image 2" in the instruction text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    pub parts: Vec<RequestPart>,
    pub temperature: Option<f32>,
    /// Ask for `TEXT` + `IMAGE` response modalities
    pub image_output: bool,
}

impl GenerateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(RequestPart::Text(text.into()));
        self
    }

    pub fn inline_data(mut self, blob: Blob) -> Self {
        self.parts.push(RequestPart::InlineData(blob));
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_image_output(mut self) -> Self {
        self.image_output = true;
        self
    }

    /// Concatenated text parts, mostly useful in logs and tests
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                RequestPart::Text(text) => Some(text.as_str()),
                RequestPart::InlineData(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn inline_data_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, RequestPart::InlineData(_)))
            .count()
    }
}

/// One part of a model response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePart {
    Text(String),
    Image(Blob),
    /// Anything else the API returns (function calls, non-image inline data, ...)
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Parts of the first candidate, if there is one
    pub fn first_candidate_parts(&self) -> Option<&[ResponsePart]> {
        self.candidates
            .first()
            .map(|candidate| candidate.parts.as_slice())
    }

    /// Text of the first candidate's first part, only if that part is text
    pub fn first_text(&self) -> Option<&str> {
        match self.first_candidate_parts()?.first()? {
            ResponsePart::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}
