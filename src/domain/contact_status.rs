/// Contact messages start as `New`; `Replied` and `Resolved` are reserved
/// for a future admin workflow, no route advances them today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Replied,
    Resolved,
}

impl ContactStatus {
    pub fn parse(status: &str) -> Result<ContactStatus, String> {
        match status {
            "new" => Ok(ContactStatus::New),
            "replied" => Ok(ContactStatus::Replied),
            "resolved" => Ok(ContactStatus::Resolved),
            unknown => Err(format!("{} is not a valid contact status", unknown)),
        }
    }
}

impl AsRef<str> for ContactStatus {
    fn as_ref(&self) -> &str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Replied => "replied",
            ContactStatus::Resolved => "resolved",
        }
    }
}
