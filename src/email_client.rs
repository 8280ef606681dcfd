use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::subscriber_email::SubscriberEmail;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// Thin client for a SendGrid-compatible `/mail/send` API. Used for the
/// welcome email on subscription and for admin notifications; sends are
/// never retried.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: SubscriberEmail,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
struct SendEmailBody {
    personalizations: Vec<SendGridPersonalization>,
    from: SendGridEmail,
    subject: String,
    content: Vec<SendGridContent>,
}

#[derive(serde::Serialize)]
struct SendGridEmail {
    email: String,
}

#[derive(serde::Serialize)]
struct SendGridPersonalization {
    to: Vec<SendGridEmail>,
}

#[derive(serde::Serialize)]
struct SendGridContent {
    // SendGrid's wire name for the MIME type is "type"
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

impl SendEmailBody {
    fn single(sender: &SubscriberEmail, recipient: &SubscriberEmail, subject: &str, html_content: &str) -> SendEmailBody {
        SendEmailBody {
            from: SendGridEmail {
                email: String::from(sender.as_ref()),
            },
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridEmail {
                    email: String::from(recipient.as_ref()),
                }],
            }],
            subject: String::from(subject),
            content: vec![SendGridContent {
                content_type: String::from("text/html"),
                value: String::from(html_content),
            }],
        }
    }
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SubscriberEmail,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> EmailClient {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .unwrap();

        EmailClient {
            http_client,
            base_url,
            sender,
            api_key,
        }
    }

    pub async fn send_email(
        &self,
        recipient: SubscriberEmail,
        subject: &str,
        html_content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/mail/send", self.base_url);
        let body = SendEmailBody::single(&self.sender, &recipient, subject, html_content);

        self.http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?; // return an error when server response status code is 4xx or 5xx

        Ok(())
    }
}
