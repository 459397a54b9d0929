use crate::domain::fortune::{DailyFortune, MediaType, Notice, NoticeLevel};

pub struct FortuneView {
    pub date: String,
    pub media_url: String,
    pub is_video: bool,
    pub title: String,
    pub fortune: String,
    pub explanation: String,
    pub explanation_translated: Option<String>,
}

impl FortuneView {
    pub fn from_domain(fortune: &DailyFortune) -> Self {
        Self {
            date: fortune.date.format("%Y-%m-%d").to_string(),
            media_url: fortune.media_url.clone(),
            is_video: fortune.media_type == MediaType::Video,
            title: fortune.title.clone(),
            fortune: fortune.fortune.clone(),
            explanation: fortune.explanation.clone(),
            explanation_translated: fortune.explanation_translated.clone(),
        }
    }
}

pub struct NoticeView {
    /// CSS modifier: `warning` or `error`.
    pub level: &'static str,
    pub message: String,
}

impl NoticeView {
    pub fn from_domain(notice: &Notice) -> Self {
        Self {
            level: match notice.level {
                NoticeLevel::Warning => "warning",
                NoticeLevel::Error => "error",
            },
            message: notice.message.clone(),
        }
    }
}
