use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::debug;

/// Minimal client for a Mailgun-compatible message API.
///
/// Authentication is HTTP basic with the fixed `api` username; messages go
/// out as form-encoded POSTs to `/v3/{domain}/messages`.
pub struct MailgunClient {
    client: Client,
    base_url: String,
    domain: String,
    api_key: String,
}

/// One outbound message with both HTML and plain-text parts.
pub struct OutgoingEmail<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub html: &'a str,
    pub text: &'a str,
}

impl MailgunClient {
    pub fn new(base_url: String, domain: String, api_key: String, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .user_agent("Betapool/1.0")
            .build()
            .context("Failed to build mail HTTP client")?;

        Ok(Self::with_shared_client(client, base_url, domain, api_key))
    }

    #[must_use]
    pub fn with_shared_client(
        client: Client,
        base_url: String,
        domain: String,
        api_key: String,
    ) -> Self {
        Self {
            client,
            base_url,
            domain,
            api_key,
        }
    }

    pub async fn send(&self, email: &OutgoingEmail<'_>) -> Result<()> {
        let url = format!(
            "{}/v3/{}/messages",
            self.base_url.trim_end_matches('/'),
            self.domain
        );

        let params = [
            ("from", email.from),
            ("to", email.to),
            ("subject", email.subject),
            ("html", email.html),
            ("text", email.text),
        ];

        debug!("Sending email to {} via {}", email.to, url);

        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&params)
            .send()
            .await
            .context("Mail API request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Mail API returned {}: {}", status, body);
        }

        Ok(())
    }
}
