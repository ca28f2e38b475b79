use async_trait::async_trait;
use blueprint_relay::{
    Error, Result,
    llm::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, LlmClient, Part},
};
use std::sync::{Arc, Mutex};

/// What the mock upstream does with each call.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Reply with the given blueprint text.
    Text(String),
    /// Reply with a body that has no candidates at all.
    NoCandidates,
    /// Reply with the caller's prompt, prefixed, so tests can match requests to responses.
    Echo,
    /// Fail as a non-success upstream status would.
    Status(u16, String),
    /// Fail as a transport error would.
    Internal(String),
}

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub behavior: MockBehavior,
    pub requests: Arc<Mutex<Vec<(String, GenerateContentRequest)>>>,
}

impl MockLlmClient {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Text(text.into()))
    }

    pub fn get_requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part {
                    text: Some(text.to_string()),
                }],
            }),
        }],
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));

        match &self.behavior {
            MockBehavior::Text(text) => Ok(text_response(text)),
            MockBehavior::NoCandidates => Ok(GenerateContentResponse::default()),
            MockBehavior::Echo => {
                let prompt = request
                    .contents
                    .last()
                    .and_then(|content| content.parts.first())
                    .and_then(|part| part.text.clone())
                    .unwrap_or_default();
                // Yield so concurrent requests interleave.
                tokio::task::yield_now().await;
                Ok(text_response(&format!("root\n\t{}", prompt)))
            }
            MockBehavior::Status(status, body) => Err(Error::upstream(*status, body.clone())),
            MockBehavior::Internal(message) => Err(Error::internal(message.clone())),
        }
    }
}
