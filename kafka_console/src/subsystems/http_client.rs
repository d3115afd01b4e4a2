use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, anyhow::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("While building http client")
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    base_urls: &[String],
    path: &str,
) -> Result<T, anyhow::Error> {
    let mut last_error = None;
    for base_url in base_urls {
        let url = format!("{}{}", base_url.trim_end_matches('/'), path);
        match fetch_json(client, &url).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!("Request to {url} failed: {e:#}");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow!("No urls configured")))
}

async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T, anyhow::Error> {
    let value = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("While sending request to {url}"))?
        .error_for_status()
        .with_context(|| format!("While checking response status of {url}"))?
        .json::<T>()
        .await
        .with_context(|| format!("While parsing response of {url}"))?;

    Ok(value)
}
