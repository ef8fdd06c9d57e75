use crate::{
    Error,
    chat::{ChatEndpoint, ErrorBody, FunctionEvent, FunctionResponse, InvocationContext},
};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub endpoint: Arc<ChatEndpoint>,
}

/// Serves the function directly over HTTP.
pub async fn function(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: String,
) -> Response {
    let context = invocation_context(&headers);
    let event = FunctionEvent::new(method.as_str(), Some(body));

    match state.endpoint.handle(event, &context).await {
        Ok(response) => into_http_response(response),
        Err(e) => invocation_failed(&context, e).into_response(),
    }
}

/// Runs one invocation from a runtime-style event and returns the raw function result.
pub async fn invoke(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<FunctionEvent>,
) -> Result<Json<FunctionResponse>, (StatusCode, Json<ErrorBody>)> {
    let context = invocation_context(&headers);

    state
        .endpoint
        .handle(event, &context)
        .await
        .map(Json)
        .map_err(|e| invocation_failed(&context, e))
}

pub fn invocation_context(headers: &HeaderMap) -> InvocationContext {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    InvocationContext::new(request_id)
}

pub fn into_http_response(response: FunctionResponse) -> Response {
    let status = StatusCode::from_u16(response.status_code).unwrap_or_else(|_| {
        warn!("Function returned invalid status {}", response.status_code);
        StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut headers = HeaderMap::new();
    for (name, value) in &response.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!("Dropping invalid response header: {}", name),
        }
    }

    let mut http_response = Response::new(Body::from(response.body));
    *http_response.status_mut() = status;
    *http_response.headers_mut() = headers;
    http_response
}

fn invocation_failed(context: &InvocationContext, e: Error) -> (StatusCode, Json<ErrorBody>) {
    error!("Invocation {} failed: {}", context.request_id, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: format!("Invocation failed: {}", e),
        }),
    )
}
