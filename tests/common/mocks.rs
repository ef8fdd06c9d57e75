use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tutibot::llm::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, LlmClient, UpstreamError,
    UpstreamErrorKind,
};

/// Mock LLM client for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<UpstreamError>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(text_response(text));
        self
    }

    pub fn with_responses(self, responses: Vec<ChatCompletionResponse>) -> Self {
        *self.responses.lock().unwrap() = responses;
        self
    }

    pub fn with_error(mut self, kind: UpstreamErrorKind, message: &str) -> Self {
        self.error = Some(UpstreamError::new(kind, message));
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, UpstreamError> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(error.clone());
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(UpstreamError::new(
                UpstreamErrorKind::Api,
                "No more mock responses available",
            ));
        }

        Ok(responses.remove(0))
    }
}

pub fn text_response(text: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-test".to_string(),
        model: "gpt-4o-mini".to_string(),
        choices: vec![Choice {
            content: Some(text.to_string()),
            finish_reason: Some("Stop".to_string()),
        }],
        usage: None,
    }
}
