use serde::Deserialize;

use crate::domain::subscribe_source::SubscribeSource;
use crate::domain::subscriber_email::SubscriberEmail;

#[derive(Debug)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub source: SubscribeSource,
}

/// Wire shape of a POST /api/subscribe body. `recaptcha_token` is required
/// but only checked for presence: the widget sends a placeholder value and
/// server-side verification is not performed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscriberBody {
    pub email: String,
    pub source: String,
    pub recaptcha_token: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub screen_width: Option<u32>,
    #[serde(default)]
    pub screen_height: Option<u32>,
}

impl TryFrom<&NewSubscriberBody> for NewSubscriber {
    type Error = String;

    // Errors are fixed, user-safe strings: they go straight into 400 bodies.
    fn try_from(body: &NewSubscriberBody) -> Result<Self, Self::Error> {
        if body.recaptcha_token.trim().is_empty() {
            return Err(String::from("Missing recaptcha token"));
        }

        let email = SubscriberEmail::parse(body.email.clone())
            .map_err(|_| String::from("Invalid email"))?;
        let source =
            SubscribeSource::parse(&body.source).map_err(|_| String::from("Invalid source"))?;

        Ok(NewSubscriber { email, source })
    }
}
