use crate::config::HttpConfig;
use crate::utils::error::{PetError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Turn a non-2xx response into `PetError::UpstreamError`.
pub fn ensure_success(response: Response, endpoint: &str) -> Result<Response> {
    let status = response.status();
    tracing::debug!("{} answered {}", endpoint, status);
    if status.is_success() {
        Ok(response)
    } else {
        Err(PetError::UpstreamError {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
