//! Domain entities. Pure data structures for the core business.
//!
//! No storage types here; adapters map these to rows or records.

use serde::{Deserialize, Serialize};

/// Aggregate root: a prospective speaker and the sessions they want to present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Speaker {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub years_experience: Option<i32>,
    pub has_blog: bool,
    pub blog_url: Option<String>,
    pub browser: WebBrowser,
    pub certifications: Vec<String>,
    pub employer: String,
    /// Set by fee calculation; 0 until then.
    pub registration_fee: i32,
    pub sessions: Vec<Session>,
}

/// A talk proposal. Owned by exactly one speaker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub approved: bool,
}

impl Session {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            approved: false,
        }
    }
}

/// Browser the speaker submitted from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebBrowser {
    pub name: BrowserName,
    pub major_version: i32,
}

impl WebBrowser {
    pub fn new(name: BrowserName, major_version: i32) -> Self {
        Self {
            name,
            major_version,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserName {
    #[default]
    Unknown,
    InternetExplorer,
    Firefox,
    Chrome,
    Opera,
    Safari,
    Dolphin,
    Konqueror,
    Linx,
}

impl BrowserName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::InternetExplorer => "internet_explorer",
            Self::Firefox => "firefox",
            Self::Chrome => "chrome",
            Self::Opera => "opera",
            Self::Safari => "safari",
            Self::Dolphin => "dolphin",
            Self::Konqueror => "konqueror",
            Self::Linx => "linx",
        }
    }

    /// Inverse of `as_str`. Unrecognised names map to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "internet_explorer" => Self::InternetExplorer,
            "firefox" => Self::Firefox,
            "chrome" => Self::Chrome,
            "opera" => Self::Opera,
            "safari" => Self::Safari,
            "dolphin" => Self::Dolphin,
            "konqueror" => Self::Konqueror,
            "linx" => Self::Linx,
            _ => Self::Unknown,
        }
    }
}
