pub mod template;

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email provider rejected the request ({status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Confirmation mail client over the Resend HTTP API.
#[derive(Clone)]
pub struct Mailer {
    client: Client,
    api_key: String,
    from: String,
}

impl Mailer {
    pub fn new(api_key: String, from: String) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key,
            from,
        })
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError> {
        let request = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject,
            html,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected { status, body });
        }

        Ok(())
    }

    async fn send_confirmation(&self, recipient: &Recipient, partner_name: Option<&str>) {
        let subject = template::confirmation_subject(&recipient.locale);
        let html = template::confirmation_html(
            &recipient.first_name,
            &recipient.last_name,
            partner_name,
            &recipient.locale,
        );

        match self.send(&recipient.email, subject, &html).await {
            Ok(()) => {
                tracing::info!(to = %recipient.email, "confirmation email sent");
            }
            Err(e) => {
                tracing::error!(to = %recipient.email, error = %e, "failed to send confirmation email");
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recipient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub locale: String,
}

impl Recipient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fire-and-forget confirmation dispatch: one email per athlete, detached
/// from the request path. Failures are logged and never retried; the
/// registration outcome is already recorded by the time this runs.
pub fn dispatch_confirmations(mailer: Mailer, athlete1: Recipient, athlete2: Option<Recipient>) {
    tokio::spawn(async move {
        let partner1 = athlete2.as_ref().map(Recipient::full_name);
        mailer.send_confirmation(&athlete1, partner1.as_deref()).await;

        if let Some(partner) = athlete2 {
            let partner2 = athlete1.full_name();
            mailer.send_confirmation(&partner, Some(&partner2)).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_construction_succeeds() {
        assert!(Mailer::new("re_test_key".to_string(), "Event <noreply@example.com>".to_string()).is_ok());
    }

    #[test]
    fn rejected_error_carries_status_and_body() {
        let error = MailerError::Rejected {
            status: reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            body: "invalid from address".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("422"));
        assert!(message.contains("invalid from address"));
    }
}
