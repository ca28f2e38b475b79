use super::types::{BlueprintResponse, RelayRequest};
use crate::{
    Error, Result,
    config::UpstreamConfig,
    llm::{GenerateContentRequest, LlmClient},
};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const PROMPT_PREVIEW_CHARS: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn LlmClient>,
    pub upstream: Arc<UpstreamConfig>,
    pub max_prompt_chars: usize,
    pub max_body_bytes: usize,
}

/// Serves every path: answers preflight probes and relays `POST` prompts upstream.
///
/// The body is taken unbuffered so preflight and rejected methods never read it.
pub async fn relay(State(state): State<AppState>, method: Method, body: Body) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }

    match generate_blueprint(&state, &method, body).await {
        Ok(blueprint) => Json(BlueprintResponse { blueprint }).into_response(),
        Err(e) => {
            match &e {
                Error::MissingCredential => error!("GEMINI_KEY not configured"),
                Error::EmptyCompletion => warn!("Empty response from Gemini"),
                e if e.is_client_error() => info!("Rejected request: {}", e),
                Error::Upstream { .. } => {}
                e => error!("Relay error: {}", e),
            }
            e.into_response()
        }
    }
}

async fn generate_blueprint(state: &AppState, method: &Method, body: Body) -> Result<String> {
    if *method != Method::POST {
        return Err(Error::MethodNotAllowed);
    }

    let api_key = state.upstream.credential().ok_or(Error::MissingCredential)?;

    let body = read_body(body, state).await?;
    let prompt = parse_prompt(&body)?;
    info!("Prompt received: {}", prompt_preview(&prompt));

    // Measured in UTF-16 code units, as browsers count string length.
    if prompt.encode_utf16().count() > state.max_prompt_chars {
        return Err(Error::PromptTooLong {
            max: state.max_prompt_chars,
        });
    }

    let request = GenerateContentRequest::blueprint(&state.upstream, &prompt);
    let response = state.client.generate_content(api_key, &request).await?;

    let blueprint = response.first_text();
    if blueprint.trim().is_empty() {
        return Err(Error::EmptyCompletion);
    }

    info!("Blueprint generated ({} chars)", blueprint.chars().count());

    Ok(blueprint.to_string())
}

/// Buffers at most `max_body_bytes`. A body past the cap cannot carry an
/// acceptable prompt, so it is reported as one that is too long.
async fn read_body(body: Body, state: &AppState) -> Result<Bytes> {
    match Limited::new(body, state.max_body_bytes).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(Error::PromptTooLong {
            max: state.max_prompt_chars,
        }),
        Err(e) => {
            debug!("Failed to read request body: {}", e);
            Err(Error::MissingPrompt)
        }
    }
}

fn parse_prompt(body: &[u8]) -> Result<String> {
    // Going through `Value` keeps the last of any repeated keys.
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| Error::MissingPrompt)?;
    let request: RelayRequest =
        serde_json::from_value(value).map_err(|_| Error::MissingPrompt)?;

    request
        .prompt
        .filter(|prompt| !prompt.is_empty())
        .ok_or(Error::MissingPrompt)
}

fn prompt_preview(prompt: &str) -> String {
    let mut chars = prompt.chars();
    let mut preview: String = chars.by_ref().take(PROMPT_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        preview.push_str("...");
    }
    preview
}
