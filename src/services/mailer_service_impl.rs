//! HTTP implementation of the `MailerService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::clients::mailgun::{MailgunClient, OutgoingEmail};
use crate::config::EmailConfig;
use crate::models::account::Account;
use crate::services::mailer_service::{MailerError, MailerService};
use crate::services::templates;

pub struct HttpMailerService {
    config: EmailConfig,
    client: MailgunClient,
}

impl HttpMailerService {
    pub fn new(config: EmailConfig, http_client: reqwest::Client) -> Self {
        let client = MailgunClient::with_shared_client(
            http_client,
            config.api_base_url.clone(),
            config.domain.clone(),
            config.api_key.clone(),
        );

        Self { config, client }
    }

    async fn deliver(&self, to: &str, subject: &str, html: &str, text: &str) -> anyhow::Result<()> {
        if !self.config.enabled {
            info!(
                recipient = %to,
                subject = %subject,
                content_length = html.len(),
                "Email sending disabled, simulating delivery"
            );
            return Ok(());
        }

        self.client
            .send(&OutgoingEmail {
                from: &self.config.from,
                to,
                subject,
                html,
                text,
            })
            .await
    }
}

#[async_trait]
impl MailerService for HttpMailerService {
    async fn send_credentials(
        &self,
        recipient_email: &str,
        recipient_name: &str,
        account: &Account,
    ) -> Result<(), MailerError> {
        let html =
            templates::credentials_email_html(recipient_name, account, &self.config.signin_url);
        let text = templates::plain_text_alternative(&html);

        self.deliver(recipient_email, templates::CREDENTIALS_SUBJECT, &html, &text)
            .await?;

        info!("Credentials email sent to {}", recipient_email);

        // The admin copy is best-effort: the applicant already has their
        // credentials, so a failed copy only gets logged.
        if let Some(admin) = &self.config.admin_copy_to {
            let subject = format!("[admin copy] {}", templates::CREDENTIALS_SUBJECT);
            if let Err(e) = self.deliver(admin, &subject, &html, &text).await {
                warn!("Failed to deliver admin copy to {}: {}", admin, e);
            }
        }

        Ok(())
    }
}
