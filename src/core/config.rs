use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Configuration for the Gemini generative model API
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent with every request. Required, there is no default.
    pub api_key: String,
    /// Base URL of the Generative Language API (overridable for tests/proxies)
    pub base_url: String,
    /// Model used for photo analysis, captions and adventure ideas
    pub text_model: String,
    /// Model used for figurine, scene and composition images
    pub image_model: String,
    /// Optional per-request timeout. `None` waits for the remote indefinitely.
    pub request_timeout: Option<Duration>,
}

/// Local file storage for generated assets
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Directory generated images are written to (`<static_dir>/uploads`)
    pub uploads_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            gemini: GeminiConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl GeminiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_TEXT_MODEL: &'static str = "gemini-1.5-flash";
    pub const DEFAULT_IMAGE_MODEL: &'static str = "gemini-2.5-flash-image-preview";

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("GOOGLE_AI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| "GOOGLE_AI_API_KEY environment variable is required".to_string())?;

        let base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let text_model =
            env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| Self::DEFAULT_TEXT_MODEL.to_string());

        let image_model = env::var("GEMINI_IMAGE_MODEL")
            .unwrap_or_else(|_| Self::DEFAULT_IMAGE_MODEL.to_string());

        let request_timeout = match env::var("GEMINI_REQUEST_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| "GEMINI_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?,
            )),
            _ => None,
        };

        Ok(Self {
            api_key,
            base_url,
            text_model,
            image_model,
            request_timeout,
        })
    }
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let static_dir = PathBuf::from(env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));
        let uploads_dir = static_dir.join("uploads");

        Ok(Self {
            static_dir,
            uploads_dir,
        })
    }
}
