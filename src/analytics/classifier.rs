//! User-agent classification
//!
//! Coarse substring classification of raw user-agent strings into fixed
//! label sets. Total over every input: unknown or empty strings fall
//! through to `Other` / `Desktop`.

/// Browser family label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Other,
}

impl Browser {
    /// Match order governs, not substring position: Chrome-derived agents
    /// also advertise "Safari", so Chrome must be checked first.
    fn detect(user_agent: &str) -> Self {
        if user_agent.contains("Chrome") {
            Browser::Chrome
        } else if user_agent.contains("Firefox") {
            Browser::Firefox
        } else if user_agent.contains("Safari") {
            Browser::Safari
        } else if user_agent.contains("Edge") {
            Browser::Edge
        } else {
            Browser::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
            Browser::Safari => "Safari",
            Browser::Edge => "Edge",
            Browser::Other => "Other",
        }
    }
}

/// Operating system label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
    Other,
}

impl Os {
    fn detect(user_agent: &str) -> Self {
        if user_agent.contains("Windows") {
            Os::Windows
        } else if user_agent.contains("Mac") {
            Os::MacOs
        } else if user_agent.contains("Linux") {
            Os::Linux
        } else if user_agent.contains("Android") {
            Os::Android
        } else if user_agent.contains("iPhone") {
            Os::Ios
        } else {
            Os::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::MacOs => "macOS",
            Os::Linux => "Linux",
            Os::Android => "Android",
            Os::Ios => "iOS",
            Os::Other => "Other",
        }
    }
}

/// Device class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Mobile,
    Desktop,
}

impl Device {
    fn detect(user_agent: &str) -> Self {
        if user_agent.contains("Mobile")
            || user_agent.contains("Android")
            || user_agent.contains("iPhone")
        {
            Device::Mobile
        } else {
            Device::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "Mobile",
            Device::Desktop => "Desktop",
        }
    }
}

/// Resolved labels for one user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAgentProfile {
    pub browser: Browser,
    pub os: Os,
    pub device: Device,
}

/// Classify a raw user-agent string.
///
/// Pure and total: every input, including the empty string, maps to
/// exactly one label per dimension.
pub fn classify(user_agent: &str) -> UserAgentProfile {
    UserAgentProfile {
        browser: Browser::detect(user_agent),
        os: Os::detect(user_agent),
        device: Device::detect(user_agent),
    }
}
