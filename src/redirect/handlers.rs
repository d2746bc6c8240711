use axum::{
    extract::{ConnectInfo, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::analytics::{classify, ClickEvent};
use crate::storage::Storage;

pub struct RedirectState {
    pub storage: Arc<dyn Storage>,
}

/// Redirect to the original URL, recording one classified click
pub async fn redirect_url(
    State(state): State<Arc<RedirectState>>,
    Path(code): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let handler_start = Instant::now();
    let now = Utc::now().timestamp_millis();

    match state.storage.get(&code).await {
        Ok(Some(url)) => {
            if url.is_expired(now) {
                // Expiry removes the whole entry, click log included
                if let Err(err) = state.storage.delete(&code).await {
                    tracing::warn!(short_code = %code, error = %err, "failed to remove expired link");
                }
                return (StatusCode::GONE, "This link has expired").into_response();
            }

            let event = build_click_event(now, &headers, addr.ip());
            if let Err(err) = state.storage.record_click(&code, event).await {
                tracing::warn!(short_code = %code, error = %err, "failed to record click");
            }

            tracing::debug!(
                short_code = %code,
                handler_ms = handler_start.elapsed().as_millis() as u64,
                "redirect served"
            );

            Redirect::permanent(&url.original_url).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "URL not found").into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response(),
    }
}

/// Assemble a click event from the request.
///
/// The user agent is classified here, before the event is persisted; the
/// country is taken as already resolved from the edge (`cf-ipcountry`)
/// and never computed locally.
fn build_click_event(timestamp: i64, headers: &HeaderMap, ip: std::net::IpAddr) -> ClickEvent {
    let user_agent = header_str(headers, header::USER_AGENT.as_str()).to_string();
    let referer = header_str(headers, header::REFERER.as_str()).to_string();
    let country = headers
        .get("cf-ipcountry")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let profile = classify(&user_agent);

    ClickEvent {
        timestamp,
        referer,
        ip: ip.to_string(),
        country,
        browser: Some(profile.browser.as_str().to_string()),
        os: Some(profile.os.as_str().to_string()),
        device: Some(profile.device.as_str().to_string()),
        user_agent,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    #[derive(Serialize)]
    struct HealthResponse {
        status: String,
    }

    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
