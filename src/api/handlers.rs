use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::analytics::{summarize, AnalyticsSummary};
use crate::models::{CreateUrlRequest, ShortenedUrl};
use crate::qr;
use crate::storage::{Storage, StorageError};

pub struct AppState {
    pub storage: Arc<dyn Storage>,
    /// Base used when building the short links returned to clients
    pub base_url: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
}

/// Listing view of an entry; the click log stays server-side.
#[derive(Serialize)]
pub struct UrlResponse {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub custom_alias: Option<String>,
    pub clicks: u64,
    pub created_at: i64,
    pub expires_at: Option<i64>,
}

impl From<&ShortenedUrl> for UrlResponse {
    fn from(url: &ShortenedUrl) -> Self {
        Self {
            id: url.id,
            short_code: url.short_code.clone(),
            original_url: url.original_url.clone(),
            custom_alias: url.custom_alias.clone(),
            clicks: url.clicks,
            created_at: url.created_at,
            expires_at: url.expires_at,
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub url: UrlResponse,
    pub summary: AnalyticsSummary,
}

/// Generate a random 6-character short code
fn generate_short_code() -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect()
}

/// Create a new shortened URL
pub async fn create_url(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), (StatusCode, Json<ErrorResponse>)> {
    if payload.url.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "URL cannot be empty".to_string(),
            }),
        ));
    }

    if url::Url::parse(&payload.url).is_err() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid URL".to_string(),
            }),
        ));
    }

    let expires_at = payload
        .expires_in
        .map(|secs| chrono::Utc::now().timestamp_millis() + secs * 1000);

    let url = if let Some(alias) = payload.alias.as_deref() {
        if alias.is_empty() || alias.len() > 20 {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Alias must be 1-20 characters".to_string(),
                }),
            ));
        }

        match state
            .storage
            .create(alias, &payload.url, Some(alias), expires_at)
            .await
        {
            Ok(url) => url,
            Err(StorageError::Conflict) => {
                return Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: "Alias already taken".to_string(),
                    }),
                ));
            }
            Err(e) => {
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to create URL: {}", e),
                    }),
                ));
            }
        }
    } else {
        // Generated codes can collide; retry a bounded number of times
        let mut attempts = 0;
        loop {
            let code = generate_short_code();
            match state
                .storage
                .create(&code, &payload.url, None, expires_at)
                .await
            {
                Ok(url) => break url,
                Err(StorageError::Conflict) if attempts < 10 => {
                    attempts += 1;
                }
                Err(StorageError::Conflict) => {
                    return Err((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: "Failed to generate unique short code".to_string(),
                        }),
                    ));
                }
                Err(e) => {
                    return Err((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: format!("Failed to create URL: {}", e),
                        }),
                    ));
                }
            }
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: short_link(&state.base_url, &url.short_code),
            short_code: url.short_code,
            original_url: url.original_url,
        }),
    ))
}

/// Entry metadata plus the on-demand analytics summary
pub async fn url_stats(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.get(&code).await {
        Ok(Some(url)) => {
            let summary = summarize(&url.click_log);
            Ok(Json(StatsResponse {
                url: UrlResponse::from(&url),
                summary,
            }))
        }
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "URL not found".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to get URL: {}", e),
            }),
        )),
    }
}

/// List all shortened URLs, newest first
pub async fn list_urls(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UrlResponse>>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.list().await {
        Ok(urls) => Ok(Json(urls.iter().map(UrlResponse::from).collect())),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to list URLs: {}", e),
            }),
        )),
    }
}

/// Delete a shortened URL
pub async fn delete_url(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<SuccessResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.delete(&code).await {
        Ok(true) => Ok(Json(SuccessResponse {
            message: "URL deleted successfully".to_string(),
        })),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "URL not found".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to delete URL: {}", e),
            }),
        )),
    }
}

/// Render the short link as an SVG QR-style image
pub async fn url_qr(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.get(&code).await {
        Ok(Some(url)) => {
            let svg = qr::render_svg(&short_link(&state.base_url, &url.short_code), 200);
            Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
        }
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "URL not found".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to get URL: {}", e),
            }),
        )),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}

fn short_link(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
