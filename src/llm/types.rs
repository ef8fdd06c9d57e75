use super::UpstreamError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
    ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrl,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text { text: String },
    /// An http(s) URL or a data URI, passed through untouched.
    ImageUrl { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub content: Option<String>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user(content: MessageContent) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }

    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage, UpstreamError> {
        match (self.role, &self.content) {
            (Role::System, MessageContent::Text(text)) => {
                let msg = ChatCompletionRequestSystemMessageArgs::default()
                    .content(ChatCompletionRequestSystemMessageContent::Text(
                        text.clone(),
                    ))
                    .build()?;
                Ok(msg.into())
            }
            (Role::User, content) => {
                let content = match content {
                    MessageContent::Text(text) => {
                        ChatCompletionRequestUserMessageContent::Text(text.clone())
                    }
                    MessageContent::Parts(parts) => ChatCompletionRequestUserMessageContent::Array(
                        parts.iter().map(ContentPart::to_openai_part).collect(),
                    ),
                };
                let msg = ChatCompletionRequestUserMessageArgs::default()
                    .content(content)
                    .build()?;
                Ok(msg.into())
            }
            (Role::System, MessageContent::Parts(_)) => Err(UpstreamError::invalid_request(
                "Structured content is only supported for user messages",
            )),
        }
    }
}

impl ContentPart {
    fn to_openai_part(&self) -> ChatCompletionRequestUserMessageContentPart {
        match self {
            Self::Text { text } => ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText { text: text.clone() },
            ),
            Self::ImageUrl { url } => ChatCompletionRequestUserMessageContentPart::ImageUrl(
                ChatCompletionRequestMessageContentPartImage {
                    image_url: ImageUrl {
                        url: url.clone(),
                        detail: None,
                    },
                },
            ),
        }
    }
}

impl ChatCompletionResponse {
    /// Text of the first choice. A choice without content yields an empty reply.
    pub fn first_reply(&self) -> Result<String, UpstreamError> {
        self.choices
            .first()
            .map(|choice| choice.content.clone().unwrap_or_default())
            .ok_or_else(|| UpstreamError::malformed("response contained no choices"))
    }
}
