//! AI assistant backed by a hosted language model

use std::fmt::Write;

use tracing::{info, instrument, warn};
use validator::Validate;

use guide_core::traits::GatewayError;

use crate::dto::{ChatRequest, ChatResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const PREAMBLE: &str = "Answer the user request below.\n\
Context: businesses, restaurants, hotels and activities in and around Alanya.\n\
Reply in short paragraphs and list suggestions as bullet points where possible.\n";

/// Assemble the full prompt sent to the model
pub fn build_prompt(prompt: &str, latitude: Option<f64>, longitude: Option<f64>) -> String {
    let mut out = String::from(PREAMBLE);
    if let (Some(lat), Some(lng)) = (latitude, longitude) {
        let _ = writeln!(
            out,
            "User's approximate location: {lat}, {lng}. Prefer suggestions close to it."
        );
    }
    out.push_str("User request:\n");
    out.push_str(prompt.trim());
    out.push('\n');
    out
}

pub struct AssistantService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AssistantService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(has_location = request.latitude.is_some()))]
    pub async fn chat(&self, request: ChatRequest) -> ServiceResult<ChatResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        if request.prompt.trim().is_empty() {
            return Err(ServiceError::validation("Prompt must not be empty"));
        }

        let model = self.ctx.chat_model();
        if !model.is_enabled() {
            return Err(ServiceError::Unavailable("AI assistant"));
        }

        let prompt = build_prompt(&request.prompt, request.latitude, request.longitude);
        let response = model.generate(&prompt).await.map_err(|e| match e {
            GatewayError::Disabled(feature) => ServiceError::Unavailable(feature),
            GatewayError::Upstream(msg) => {
                warn!(error = %msg, "Assistant request failed");
                ServiceError::upstream(msg)
            }
        })?;

        info!(reply_len = response.len(), "Assistant replied");
        Ok(ChatResponse { response })
    }
}
