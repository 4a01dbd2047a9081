use std::time::Duration;

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use crate::core::DeckError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

pub fn http_client(timeout_secs: u64) -> Result<Client, DeckError> {
    let timeout = if timeout_secs == 0 { DEFAULT_TIMEOUT_SECS } else { timeout_secs };
    Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()
        .map_err(|e| DeckError::Custom(format!("HTTP client build failed: {e}")))
}

pub async fn get_text(client: &Client, url: &str) -> Result<String, DeckError> {
    let resp = client.get(url).header(USER_AGENT, "hanzideck/0.1 (+reqwest)").send().await?;
    ensure_success(&resp)?;
    Ok(resp.text().await?)
}

/// Posts `body` as JSON text under a `text/plain` content type and returns the raw body.
pub async fn post_json_text<T: serde::Serialize>(
    client: &Client,
    url: &str,
    body: &T,
) -> Result<String, DeckError> {
    let payload = serde_json::to_string(body)?;
    let resp = client
        .post(url)
        .header(USER_AGENT, "hanzideck/0.1 (+reqwest)")
        .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
        .body(payload)
        .send()
        .await?;
    ensure_success(&resp)?;
    Ok(resp.text().await?)
}

fn ensure_success(resp: &Response) -> Result<(), DeckError> {
    if !resp.status().is_success() {
        return Err(DeckError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
