use super::mocks::MockLlmClient;
use serde_json::Value;
use std::sync::Arc;
use tutibot::{
    chat::{ChatEndpoint, FunctionEvent, FunctionResponse, InvocationContext},
    config::LlmConfig,
};

pub const TEST_REQUEST_ID: &str = "test-request-id";

/// LLM settings with a credential present
pub fn create_test_llm_config() -> LlmConfig {
    LlmConfig {
        api_key: Some("test-api-key".to_string()),
        ..LlmConfig::default()
    }
}

/// Endpoint wired to a mock upstream
pub fn endpoint_with(mock: &MockLlmClient) -> ChatEndpoint {
    ChatEndpoint::new(create_test_llm_config(), Some(Arc::new(mock.clone())))
}

/// Endpoint with no credential configured
pub fn endpoint_without_key() -> ChatEndpoint {
    ChatEndpoint::new(LlmConfig::default(), None)
}

pub fn test_context() -> InvocationContext {
    InvocationContext::new(TEST_REQUEST_ID)
}

pub fn post_event(body: &str) -> FunctionEvent {
    FunctionEvent::new("POST", Some(body.to_string()))
}

pub fn body_json(response: &FunctionResponse) -> Value {
    serde_json::from_str(&response.body).expect("response body is JSON")
}
