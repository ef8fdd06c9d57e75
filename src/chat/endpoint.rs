use super::{
    ChatReply, ChatRequest, ErrorBody, FunctionEvent, FunctionResponse, InvocationContext,
    prompt::build_completion_request,
};
use crate::{
    Result,
    config::LlmConfig,
    llm::{LlmClient, OpenAiClient, UpstreamError},
};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, error, info, warn};

/// Reply returned in place of a model answer when no credential is configured.
pub const MISSING_KEY_REPLY: &str = "Добавь OPENAI_API_KEY в секреты проекта для работы AI";

/// Stateless handler for the chat function. One `handle` call per invocation.
#[derive(Clone)]
pub struct ChatEndpoint {
    settings: LlmConfig,
    client: Option<Arc<dyn LlmClient>>,
}

impl ChatEndpoint {
    /// Without a client every POST gets the missing-credential reply.
    pub fn new(settings: LlmConfig, client: Option<Arc<dyn LlmClient>>) -> Self {
        Self { settings, client }
    }

    pub fn from_config(settings: LlmConfig) -> Result<Self> {
        let client: Option<Arc<dyn LlmClient>> = match settings.credential() {
            Some(key) => Some(Arc::new(OpenAiClient::new(key, &settings)?)),
            None => {
                warn!("OPENAI_API_KEY is not configured, chat replies will be placeholders");
                None
            }
        };

        Ok(Self::new(settings, client))
    }

    /// Fails only when a POST body is not a valid chat request.
    pub async fn handle(
        &self,
        event: FunctionEvent,
        context: &InvocationContext,
    ) -> Result<FunctionResponse> {
        debug!(
            "Handling {} invocation {}",
            event.http_method, context.request_id
        );

        match event.http_method.as_str() {
            "OPTIONS" => Ok(preflight()),
            "POST" => {
                let body = event.body.as_deref().unwrap_or("{}");
                let request: ChatRequest = serde_json::from_str(body)?;
                self.chat(request, context).await
            }
            _ => json_response(
                405,
                &ErrorBody {
                    error: "Method not allowed".to_string(),
                },
                None,
            ),
        }
    }

    async fn chat(
        &self,
        request: ChatRequest,
        context: &InvocationContext,
    ) -> Result<FunctionResponse> {
        let Some(client) = &self.client else {
            warn!(
                "Invocation {} answered without a model: no credential",
                context.request_id
            );
            return reply(MISSING_KEY_REPLY.to_string(), context);
        };

        let completion = build_completion_request(&self.settings, &request);

        match client
            .create_chat_completion(completion)
            .await
            .and_then(|response| response.first_reply())
        {
            Ok(text) => {
                info!("Invocation {} answered", context.request_id);
                reply(text, context)
            }
            Err(e) => {
                error!(
                    "Invocation {} upstream failure ({}): {}",
                    context.request_id, e.kind, e
                );
                reply(upstream_failure_reply(&e), context)
            }
        }
    }
}

pub fn upstream_failure_reply(error: &UpstreamError) -> String {
    format!("Ошибка AI: {}. Проверь OPENAI_API_KEY.", error)
}

fn preflight() -> FunctionResponse {
    let headers = HashMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Methods".to_string(),
            "POST, OPTIONS".to_string(),
        ),
        (
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        ),
        ("Access-Control-Max-Age".to_string(), "86400".to_string()),
    ]);

    FunctionResponse {
        status_code: 200,
        headers,
        body: String::new(),
        is_base64_encoded: None,
    }
}

fn reply(text: String, context: &InvocationContext) -> Result<FunctionResponse> {
    json_response(
        200,
        &ChatReply {
            reply: text,
            timestamp: context.request_id.clone(),
        },
        Some(false),
    )
}

fn json_response<T: serde::Serialize>(
    status_code: u16,
    body: &T,
    is_base64_encoded: Option<bool>,
) -> Result<FunctionResponse> {
    let headers = HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ]);

    Ok(FunctionResponse {
        status_code,
        headers,
        body: serde_json::to_string(body)?,
        is_base64_encoded,
    })
}
