/// The fixed allow-list of intake points a subscription may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscribeSource {
    Home,
    About,
    Welcome,
    Newsletter,
}

impl SubscribeSource {
    pub fn parse(source: &str) -> Result<SubscribeSource, String> {
        match source {
            "home" => Ok(SubscribeSource::Home),
            "about" => Ok(SubscribeSource::About),
            "welcome" => Ok(SubscribeSource::Welcome),
            "newsletter" => Ok(SubscribeSource::Newsletter),
            unknown => Err(format!("{} is not a valid subscription source", unknown)),
        }
    }
}

impl AsRef<str> for SubscribeSource {
    fn as_ref(&self) -> &str {
        match self {
            SubscribeSource::Home => "home",
            SubscribeSource::About => "about",
            SubscribeSource::Welcome => "welcome",
            SubscribeSource::Newsletter => "newsletter",
        }
    }
}
