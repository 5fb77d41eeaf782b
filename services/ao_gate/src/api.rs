use crate::error::{status_for, AppError};
use crate::AppState;
use ao_actions::{execute, ActionResponse, AoError, ProviderResult, StatusSnapshot};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    let service = state.service.read().await;
    Json(StatusSnapshot::of(&service))
}

pub async fn get_provider(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ProviderResult>, AppError> {
    let provider = state
        .providers
        .iter()
        .find(|p| p.name().eq_ignore_ascii_case(&name))
        .ok_or_else(|| AppError::not_found("provider"))?;
    let service = state.service.read().await;
    Ok(Json(provider.get(Some(&*service))))
}

pub async fn run_action(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Some(action) = state.actions.get(&name) else {
        return AppError::not_found("action").into_response();
    };

    if !authorized(state.api_key.as_deref(), &headers) {
        warn!(action = action.name(), "rejected action: bad or missing API key");
        let resp = ActionResponse::failure(
            &format!("{} rejected", action.name()),
            &AoError::unauthorized(),
        );
        return envelope(resp);
    }

    let Json(payload) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            let err = AppError {
                status: rejection.status(),
                ..AppError::bad_request(rejection.body_text())
            };
            return err.into_response();
        }
    };

    let request = match action.check(&payload) {
        Ok(request) => request,
        Err(e) => {
            debug!(action = action.name(), error = %e, "action does not apply to payload");
            return AppError::not_applicable(action.name(), &e).into_response();
        }
    };

    let service = state.service.read().await;
    envelope(execute(&service, request).await)
}

fn authorized(expected: Option<&str>, headers: &HeaderMap) -> bool {
    match expected {
        None => true,
        Some(key) => headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|given| given == key)
            .unwrap_or(false),
    }
}

fn envelope(resp: ActionResponse) -> Response {
    let status = if resp.success {
        StatusCode::OK
    } else {
        resp.error()
            .map(|e| status_for(e.kind))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    };
    (status, Json(resp)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn no_configured_key_allows_everything() {
        assert!(authorized(None, &HeaderMap::new()));
    }

    #[test]
    fn configured_key_must_match() {
        let mut headers = HeaderMap::new();
        assert!(!authorized(Some("secret"), &headers));
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("wrong"));
        assert!(!authorized(Some("secret"), &headers));
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("secret"));
        assert!(authorized(Some("secret"), &headers));
    }
}
