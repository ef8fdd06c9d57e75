use super::ChatRequest;
use crate::{
    config::LlmConfig,
    llm::{ChatCompletionRequest, ChatMessage, ContentPart, MessageContent},
};

/// Text sent alongside an image when the user wrote nothing.
pub const DEFAULT_IMAGE_PROMPT: &str = "Что на этом изображении?";

pub fn user_content(request: &ChatRequest) -> MessageContent {
    let message = request.message.clone().unwrap_or_default();

    match &request.image {
        Some(image) => {
            let text = if message.is_empty() {
                DEFAULT_IMAGE_PROMPT.to_string()
            } else {
                message
            };
            MessageContent::Parts(vec![
                ContentPart::Text { text },
                ContentPart::ImageUrl {
                    url: image.clone().unwrap_or_default(),
                },
            ])
        }
        None => MessageContent::Text(message),
    }
}

/// Builds the single-turn conversation: persona instruction, then the user turn.
pub fn build_completion_request(config: &LlmConfig, request: &ChatRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(config.system_prompt.clone()),
            ChatMessage::user(user_content(request)),
        ],
        max_tokens: Some(config.max_tokens),
        temperature: Some(config.temperature),
    }
}
