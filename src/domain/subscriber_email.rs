use validator::validate_email;

// RFC 5321 limit on the full address
const MAX_EMAIL_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Parses and normalizes an email address. Addresses are lowercased so
    /// the record store can use the email as a natural key.
    pub fn parse(email: String) -> Result<SubscriberEmail, String> {
        let email = email.trim().to_lowercase();

        if email.len() > MAX_EMAIL_LENGTH {
            return Err(String::from("email address is too long"));
        }

        if email.starts_with('.') || email.ends_with('.') || email.contains("..") {
            return Err(format!("{} email is not valid", email));
        }

        if !validate_email(&email) {
            return Err(format!("{} email is not valid", email));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
