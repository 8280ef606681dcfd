/// Coarse location attached to captured records. Only loopback/private
/// ranges are recognized; everything else is left Unknown until a real
/// IP-geolocation lookup is wired in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub ip: String,
    pub country: String,
    pub region: String,
    pub city: String,
}

impl LocationInfo {
    pub fn from_ip(ip: &str) -> LocationInfo {
        let is_local = ip == "127.0.0.1"
            || ip == "localhost"
            || ip.starts_with("192.168.")
            || ip.starts_with("10.");

        if is_local {
            LocationInfo {
                ip: ip.to_string(),
                country: String::from("Local"),
                region: String::from("Development"),
                city: String::from("Localhost"),
            }
        } else {
            LocationInfo {
                ip: ip.to_string(),
                country: String::from("Unknown"),
                region: String::from("Unknown"),
                city: String::from("Unknown"),
            }
        }
    }
}
