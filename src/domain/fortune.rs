use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Title shown when the picture service omits one.
pub const DEFAULT_TITLE: &str = "No Title";

/// First day the picture service published an entry. The one-day-back walk
/// never goes earlier than this.
pub const APOD_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(date) => date,
    None => panic!("invalid APOD start date"),
};

const VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".mov", ".avi"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Classify a media URL by its file extension (case-insensitive).
    pub fn from_url(url: &str) -> Self {
        let lower = url.to_ascii_lowercase();
        if VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// One day's entry from the picture service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApodEntry {
    pub date: NaiveDate,
    pub media_url: String,
    pub title: String,
    pub explanation: String,
}

impl ApodEntry {
    pub fn media_type(&self) -> MediaType {
        MediaType::from_url(&self.media_url)
    }
}

/// The result of one refresh cycle. Replaced as a whole, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFortune {
    pub date: NaiveDate,
    pub media_url: String,
    pub media_type: MediaType,
    pub title: String,
    pub explanation: String,
    pub explanation_translated: Option<String>,
    pub fortune: String,
}

impl DailyFortune {
    pub fn new(entry: ApodEntry, explanation_translated: Option<String>, fortune: String) -> Self {
        let media_type = entry.media_type();
        Self {
            date: entry.date,
            media_url: entry.media_url,
            media_type,
            title: entry.title,
            explanation: entry.explanation,
            explanation_translated,
            fortune,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A message shown to the user once, after the refresh that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
