mod client;
mod error;
mod types;

pub use client::{LlmClient, OpenAiClient};
pub use error::{UpstreamError, UpstreamErrorKind};
pub use types::*;
