use reqwest::{Client, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} returned HTTP {status}")]
    Status { status: StatusCode, url: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// GET a URL and return the response body. Non-success statuses become
/// `FetchError::Status`; there is no retry.
pub async fn fetch(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}
