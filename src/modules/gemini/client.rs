use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::types::{
    Blob, Candidate, GenerateRequest, GenerateResponse, ModelError, RequestPart, ResponsePart,
};
use super::GenerativeModel;
use crate::core::config::GeminiConfig;

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

/// HTTP client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    request_timeout: Option<Duration>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, ModelError> {
        let http = Client::builder()
            .user_agent("BananaVerseStudio/0.1")
            .build()
            .map_err(|e| ModelError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            request_timeout: config.request_timeout,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn redact(&self, text: &str) -> String {
        if self.api_key.is_empty() {
            return text.to_string();
        }
        text.replace(&self.api_key, "[redacted]")
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, ModelError> {
        let payload = build_payload(&request);

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "llm.gemini",
                model = model,
                payload = %summarize_request(&request)
            );
        }

        let mut builder = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&payload);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|err| {
            let err_text = self.redact(&err.to_string());
            warn!(
                "Gemini request failed to send: {} (timeout={}, connect={})",
                err_text,
                err.is_timeout(),
                err.is_connect()
            );
            ModelError::Request(err_text)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (message, body_summary) = summarize_error_body(&body);
            warn!("Gemini API error: status={}, body={}", status, body_summary);
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: message.unwrap_or(body_summary),
            });
        }

        let raw = response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ModelError::Decode(self.redact(&e.to_string())))?;
        let decoded = decode_response(raw)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "llm.gemini",
                model = model,
                response = %summarize_response(&decoded)
            );
        }

        Ok(decoded)
    }
}

fn build_payload(request: &GenerateRequest) -> Value {
    let parts: Vec<Value> = request
        .parts
        .iter()
        .map(|part| match part {
            RequestPart::Text(text) => json!({ "text": text }),
            RequestPart::InlineData(blob) => json!({
                "inlineData": {
                    "mimeType": blob.mime_type,
                    "data": general_purpose::STANDARD.encode(&blob.data),
                }
            }),
        })
        .collect();

    let mut generation_config = serde_json::Map::new();
    if let Some(temperature) = request.temperature {
        generation_config.insert("temperature".to_string(), json!(temperature));
    }
    if request.image_output {
        generation_config.insert("responseModalities".to_string(), json!(["TEXT", "IMAGE"]));
    }

    let mut payload = json!({
        "contents": [{ "role": "user", "parts": parts }],
    });
    if !generation_config.is_empty() {
        payload["generationConfig"] = Value::Object(generation_config);
    }
    payload
}

fn decode_response(raw: GeminiResponse) -> Result<GenerateResponse, ModelError> {
    let mut candidates = Vec::new();

    for candidate in raw.candidates.unwrap_or_default() {
        let mut parts = Vec::new();
        let raw_parts = candidate
            .content
            .and_then(|content| content.parts)
            .unwrap_or_default();

        for part in raw_parts {
            let decoded = match part {
                GeminiPart::Text { text } => ResponsePart::Text(text),
                GeminiPart::InlineData { inline_data } => {
                    if inline_data.mime_type.starts_with("image/") {
                        let data = general_purpose::STANDARD
                            .decode(inline_data.data.as_bytes())
                            .map_err(|e| {
                                ModelError::Decode(format!("invalid base64 image data: {}", e))
                            })?;
                        ResponsePart::Image(Blob::new(inline_data.mime_type, data))
                    } else {
                        ResponsePart::Unknown
                    }
                }
                GeminiPart::Other(_) => ResponsePart::Unknown,
            };
            parts.push(decoded);
        }

        candidates.push(Candidate { parts });
    }

    Ok(GenerateResponse { candidates })
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_request(request: &GenerateRequest) -> Value {
    let parts: Vec<Value> = request
        .parts
        .iter()
        .map(|part| match part {
            RequestPart::Text(text) => json!({ "text": truncate_for_log(text, 200) }),
            RequestPart::InlineData(blob) => json!({
                "inlineData": { "mimeType": blob.mime_type, "dataLen": blob.data.len() }
            }),
        })
        .collect();

    json!({
        "parts": parts,
        "temperature": request.temperature,
        "imageOutput": request.image_output,
    })
}

fn summarize_response(response: &GenerateResponse) -> Value {
    let mut text_parts = 0usize;
    let mut image_parts = 0usize;
    let mut unknown_parts = 0usize;
    let mut text_preview = None;

    for candidate in &response.candidates {
        for part in &candidate.parts {
            match part {
                ResponsePart::Text(text) => {
                    text_parts += 1;
                    if text_preview.is_none() && !text.trim().is_empty() {
                        text_preview = Some(truncate_for_log(text, 200));
                    }
                }
                ResponsePart::Image(_) => image_parts += 1,
                ResponsePart::Unknown => unknown_parts += 1,
            }
        }
    }

    json!({
        "candidates": response.candidates.len(),
        "textParts": text_parts,
        "imageParts": image_parts,
        "unknownParts": unknown_parts,
        "textPreview": text_preview,
    })
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: "test-api-key".to_string(),
            base_url: base_url.to_string(),
            text_model: GeminiConfig::DEFAULT_TEXT_MODEL.to_string(),
            image_model: GeminiConfig::DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout: Some(Duration::from_secs(5)),
        }
    }

    #[test]
    fn test_build_payload_encodes_parts_in_order() {
        let request = GenerateRequest::new()
            .text("describe")
            .inline_data(Blob::new("image/jpeg", b"abc".to_vec()))
            .temperature(0.3);

        let payload = build_payload(&request);
        let parts = payload["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], "describe");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "YWJj");
        let temperature = payload["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.3).abs() < 1e-6);
        assert!(payload["generationConfig"].get("responseModalities").is_none());
    }

    #[test]
    fn test_build_payload_without_generation_config() {
        let payload = build_payload(&GenerateRequest::new().text("hello"));
        assert!(payload.get("generationConfig").is_none());

        let payload = build_payload(&GenerateRequest::new().text("draw").with_image_output());
        assert_eq!(
            payload["generationConfig"]["responseModalities"],
            json!(["TEXT", "IMAGE"])
        );
    }

    #[test]
    fn test_summarize_error_body() {
        let (message, _) = summarize_error_body(r#"{"error":{"message":"quota exceeded"}}"#);
        assert_eq!(message.as_deref(), Some("quota exceeded"));

        let (message, summary) = summarize_error_body("   ");
        assert!(message.is_none());
        assert_eq!(summary, "empty response body");

        let (message, summary) = summarize_error_body("gateway exploded");
        assert!(message.is_none());
        assert_eq!(summary, "gateway exploded");
    }

    #[tokio::test]
    async fn test_generate_content_decodes_heterogeneous_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-image-preview:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [
                            { "text": "Here is your figurine" },
                            { "functionCall": { "name": "noop", "args": {} } },
                            { "inlineData": { "mimeType": "application/pdf", "data": "AAAA" } },
                            { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
                        ]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri())).unwrap();
        let response = client
            .generate_content(
                GeminiConfig::DEFAULT_IMAGE_MODEL,
                GenerateRequest::new().text("make a toy").with_image_output(),
            )
            .await
            .unwrap();

        let parts = response.first_candidate_parts().unwrap();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], ResponsePart::Text("Here is your figurine".to_string()));
        assert_eq!(parts[1], ResponsePart::Unknown);
        assert_eq!(parts[2], ResponsePart::Unknown);
        match &parts[3] {
            ResponsePart::Image(blob) => {
                assert_eq!(blob.mime_type, "image/png");
                assert_eq!(blob.data, vec![0x89, b'P', b'N', b'G']);
            }
            other => panic!("expected image part, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_content_without_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri())).unwrap();
        let response = client
            .generate_content("gemini-1.5-flash", GenerateRequest::new().text("hi"))
            .await
            .unwrap();

        assert!(response.candidates.is_empty());
        assert!(response.first_text().is_none());
    }

    #[tokio::test]
    async fn test_generate_content_maps_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "code": 429, "message": "Resource has been exhausted" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri())).unwrap();
        let err = client
            .generate_content("gemini-1.5-flash", GenerateRequest::new().text("hi"))
            .await
            .unwrap_err();

        match err {
            ModelError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_content_rejects_bad_image_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "inlineData": { "mimeType": "image/png", "data": "%%%" } }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri())).unwrap();
        let err = client
            .generate_content("gemini-1.5-flash", GenerateRequest::new().text("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::Decode(_)));
    }
}
