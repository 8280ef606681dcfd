/// Coarse device description derived from the User-Agent header. This is
/// deliberately a set of ordered substring checks, not a full UA parser:
/// the admin view only needs rough OS/browser/device-class buckets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub user_agent: String,
    pub os: String,
    pub browser: String,
    pub device_class: String,
    pub is_mobile: bool,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
}

impl DeviceInfo {
    pub fn from_user_agent(
        user_agent: &str,
        screen_width: Option<u32>,
        screen_height: Option<u32>,
    ) -> DeviceInfo {
        let device_class = detect_device_class(user_agent);

        DeviceInfo {
            user_agent: user_agent.to_string(),
            os: detect_os(user_agent).to_string(),
            browser: detect_browser(user_agent).to_string(),
            device_class: device_class.to_string(),
            is_mobile: device_class == "Mobile",
            screen_width,
            screen_height,
        }
    }
}

fn detect_os(user_agent: &str) -> &'static str {
    // iPhone UAs contain "like Mac OS X", so iOS must be checked before
    // macOS; Android UAs contain "Linux", so Android before Linux.
    if user_agent.contains("Windows") {
        "Windows"
    } else if user_agent.contains("iPhone")
        || user_agent.contains("iPad")
        || user_agent.contains("iPod")
    {
        "iOS"
    } else if user_agent.contains("Mac OS X") || user_agent.contains("Macintosh") {
        "macOS"
    } else if user_agent.contains("Android") {
        "Android"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else {
        "Unknown"
    }
}

fn detect_browser(user_agent: &str) -> &'static str {
    // Chromium-based browsers keep "Chrome" and "Safari" in their UA, so
    // Edge and Opera are checked first and Safari last.
    if user_agent.contains("Edg") {
        "Edge"
    } else if user_agent.contains("OPR") || user_agent.contains("Opera") {
        "Opera"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "Unknown"
    }
}

fn detect_device_class(user_agent: &str) -> &'static str {
    // Tablet wins over Mobile: Android tablets omit "Mobile" from their UA.
    let is_tablet = user_agent.contains("iPad")
        || (user_agent.contains("Android") && !user_agent.contains("Mobile"));

    if is_tablet {
        "Tablet"
    } else if user_agent.contains("Mobi")
        || user_agent.contains("iPhone")
        || user_agent.contains("Android")
    {
        "Mobile"
    } else {
        "Desktop"
    }
}
