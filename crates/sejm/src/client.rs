use anyhow::{Context, Result};
use fake_user_agent::get_chrome_rua;
use reqwest::{Client, Url};

pub struct SejmClient {
    client: Client,
}

impl SejmClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(get_chrome_rua())
            .build()
            .unwrap();

        Self { client }
    }

    pub async fn webpage(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("could not fetch {url}"))?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// The CDN answers the constructed manifest URL with a redirect to the
    /// load-balanced node actually serving it. A HEAD round trip resolves the
    /// final location, then the manifest body is fetched from there.
    pub async fn manifest(&self, url: &str) -> Result<(Url, String)> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .with_context(|| format!("could not resolve manifest url {url}"))?
            .error_for_status()?;
        let manifest_url = response.url().clone();

        let body = self
            .client
            .get(manifest_url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok((manifest_url, body))
    }
}

impl Default for SejmClient {
    fn default() -> Self {
        Self::new()
    }
}
