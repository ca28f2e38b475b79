use super::types::*;
use crate::{Error, Result, config::UpstreamConfig};
use async_trait::async_trait;
use tracing::{debug, error, info};

/// Outbound seam to the generative-text service.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        debug!(
            "Sending generateContent request with {} turns to model {}",
            request.contents.len(),
            self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        info!("Gemini status: {}", status.as_u16());

        if !status.is_success() {
            let body = response.text().await?;
            error!("Gemini error: {} {}", status.as_u16(), body);
            return Err(Error::upstream(status.as_u16(), body));
        }

        let response = response.json::<GenerateContentResponse>().await?;

        debug!(
            "Received generateContent response with {} candidates",
            response.candidates.len()
        );

        Ok(response)
    }
}
