mod endpoint;
mod prompt;
mod types;

pub use endpoint::{ChatEndpoint, MISSING_KEY_REPLY, upstream_failure_reply};
pub use prompt::{DEFAULT_IMAGE_PROMPT, build_completion_request, user_content};
pub use types::*;
