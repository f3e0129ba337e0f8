use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};

use crate::core::error::{PackError, PackResult};

const APP_USER_AGENT: &str = concat!("dollpack/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client() -> PackResult<Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT, HeaderValue::from_static("application/json, image/png"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .build()
        .map_err(PackError::Transport)
}

/// Map a non-success status from the profile service onto the error taxonomy.
pub fn classify_status(url: &str, status: StatusCode, player: &str) -> PackError {
    match status {
        StatusCode::NOT_FOUND => PackError::PlayerNotFound(player.to_string()),
        StatusCode::TOO_MANY_REQUESTS => PackError::RateLimited {
            url: url.to_string(),
        },
        other => PackError::UpstreamError {
            url: url.to_string(),
            status: other.as_u16(),
        },
    }
}

/// Map a transport failure, separating timeouts from everything else.
pub fn classify_transport(url: &str, err: reqwest::Error) -> PackError {
    if err.is_timeout() {
        PackError::UpstreamTimeout {
            url: url.to_string(),
        }
    } else {
        PackError::Transport(err)
    }
}
