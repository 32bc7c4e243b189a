//! Roast text acquisition.
//!
//! - [`RoastProvider`]: async source of roast text that may fail
//! - [`GeminiProvider`]: the Generative Language `generateContent` API over HTTP
//! - [`FallbackRoaster`]: wraps an optional provider and always returns a roast

use crate::error::ProviderError;
use async_trait::async_trait;
use ragelang_core::{MAX_ROAST_WIDTH, RoastConfig, RoastContext, RoastPicker, normalize_roast};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// A source of roast text.
#[async_trait]
pub trait RoastProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Generate a roast for `context`. The text is normalized by the caller.
    async fn generate(&self, context: &RoastContext) -> Result<String, ProviderError>;
}

fn lock_picker(picker: &Mutex<RoastPicker>) -> MutexGuard<'_, RoastPicker> {
    picker.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    pub(crate) fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub(crate) fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Client for the `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    picker: Mutex<RoastPicker>,
}

impl GeminiProvider {
    /// Create a provider for `api_key` with a per-request `timeout`.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: ragelang_core::config::DEFAULT_ENDPOINT.to_string(),
            model: ragelang_core::config::DEFAULT_MODEL.to_string(),
            api_key,
            picker: Mutex::new(RoastPicker::new()),
        })
    }

    /// Build from the configuration. Fails with [`ProviderError::MissingApiKey`] without a key.
    pub fn from_config(config: &RoastConfig) -> Result<Self, ProviderError> {
        let api_key = config.api_key().ok_or(ProviderError::MissingApiKey)?;
        Ok(Self::new(api_key, config.request_timeout())?
            .with_endpoint(&config.endpoint)
            .with_model(&config.model))
    }

    /// Override the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a seeded picker for prompt flavors.
    pub fn with_picker(mut self, picker: RoastPicker) -> Self {
        self.picker = Mutex::new(picker);
        self
    }

    /// The `generateContent` URL (without the key).
    pub fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RoastProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, context: &RoastContext) -> Result<String, ProviderError> {
        let prompt = context.prompt(&mut lock_picker(&self.picker));
        debug!(model = %self.model, prompt_len = prompt.len(), "requesting roast");

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::from_prompt(&prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let payload: GenerateResponse = response.json().await?;
        payload
            .text()
            .map(str::to_string)
            .ok_or(ProviderError::EmptyResponse)
    }
}

/// Always produces a roast: the provider's when it works, a local pick otherwise.
pub struct FallbackRoaster {
    provider: Option<Arc<dyn RoastProvider>>,
    picker: Mutex<RoastPicker>,
    max_width: usize,
}

impl std::fmt::Debug for FallbackRoaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRoaster")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("max_width", &self.max_width)
            .finish()
    }
}

impl FallbackRoaster {
    /// Wrap `provider`; `None` means local roasts only.
    pub fn new(provider: Option<Arc<dyn RoastProvider>>) -> Self {
        Self {
            provider,
            picker: Mutex::new(RoastPicker::new()),
            max_width: MAX_ROAST_WIDTH,
        }
    }

    /// Local roasts only.
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Build from the configuration: a Gemini provider when an API key is set.
    pub fn from_config(config: &RoastConfig) -> Self {
        let provider = match GeminiProvider::from_config(config) {
            Ok(provider) => Some(Arc::new(provider) as Arc<dyn RoastProvider>),
            Err(ProviderError::MissingApiKey) => None,
            Err(err) => {
                warn!(error = %err, "could not build roast provider, using local roasts");
                None
            }
        };
        Self::new(provider)
    }

    /// Use a seeded picker for fallback choices.
    pub fn with_picker(mut self, picker: RoastPicker) -> Self {
        self.picker = Mutex::new(picker);
        self
    }

    /// Override the display-width budget of a roast.
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Whether a remote provider is configured.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// A roast for `context`. Provider failures are logged and replaced by a local pick.
    pub async fn roast(&self, context: &RoastContext) -> String {
        let Some(provider) = &self.provider else {
            debug!("no roast provider, using local roast");
            return self.fallback();
        };

        match provider.generate(context).await {
            Ok(text) => match normalize_roast(&text, self.max_width) {
                Some(roast) => return roast,
                None => warn!(provider = provider.name(), "provider returned blank roast"),
            },
            Err(err) => {
                warn!(provider = provider.name(), error = %err, "roast generation failed, using local roast")
            }
        }
        self.fallback()
    }

    /// A local roast, normalized like provider output.
    pub fn fallback(&self) -> String {
        let pick = lock_picker(&self.picker).fallback_roast();
        normalize_roast(pick, self.max_width).unwrap_or_else(|| pick.to_string())
    }
}
