use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::errors::{FetchError, GenerationError};
use crate::domain::fortune::{APOD_START_DATE, ApodEntry, DailyFortune, Notice};
use crate::domain::upstreams::{ChatPrompt, PictureSource, TextGenerator};

pub const QUOTA_FALLBACK_FORTUNE: &str = "今日は星々が少し休憩中のようです。占いの利用上限に達したため、\
しばらく時間をおいてからもう一度夜空を見上げてみてください。";

pub const GENERIC_FALLBACK_FORTUNE: &str = "宇宙からのメッセージがうまく届きませんでした。\
それでも星々は変わらずあなたを見守っています。今日も穏やかな一日になりますように。";

const FORTUNE_SYSTEM_PROMPT: &str = "You are a poetic spiritual fortune teller.";
const FORTUNE_MAX_TOKENS: u32 = 300;

const TRANSLATION_SYSTEM_PROMPT: &str = "You are a professional Japanese translator.";
const TRANSLATION_MAX_TOKENS: u32 = 1000;

fn fortune_prompt(description: &str) -> String {
    format!(
        "あなたは詩的でスピリチュアルな占い師です。\
         以下の宇宙画像の解説をインスピレーションに、\
         日本語で 300 文字以内の今日の運勢を作成してください。\n\n\
         【解説】\n{description}"
    )
}

fn translation_prompt(text: &str) -> String {
    format!(
        "以下の英文の天文解説を、意味を変えずに自然な日本語へ翻訳してください。\
         翻訳文のみを出力してください。\n\n{text}"
    )
}

/// Runs the fetch → translate → generate cycle against pluggable upstreams.
#[derive(Clone)]
pub struct FortuneService {
    pictures: Arc<dyn PictureSource>,
    generator: Arc<dyn TextGenerator>,
}

impl FortuneService {
    pub fn new(pictures: Arc<dyn PictureSource>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            pictures,
            generator,
        }
    }

    /// Fetch the picture for `date`, stepping back one day at a time while the
    /// service reports the day as missing. Stops with `NotFound` once the
    /// cursor passes [`APOD_START_DATE`].
    pub async fn fetch(
        &self,
        date: NaiveDate,
        notices: &mut Vec<Notice>,
    ) -> Result<ApodEntry, FetchError> {
        let result = self.walk_back(date).await;
        if let Err(err) = &result {
            warn!(requested = %date, error = %err, "picture fetch failed");
            notices.push(Notice::error(format!(
                "💥 NASA データ取得に失敗しました。\n\nError: {err}"
            )));
        }
        result
    }

    async fn walk_back(&self, requested: NaiveDate) -> Result<ApodEntry, FetchError> {
        let mut cursor = requested;
        while cursor >= APOD_START_DATE {
            match self.pictures.fetch_day(cursor).await {
                Err(FetchError::NotFound { .. }) => {
                    info!(date = %cursor, "no picture for date, trying the day before");
                    match cursor.pred_opt() {
                        Some(previous) => cursor = previous,
                        None => break,
                    }
                }
                result => return result,
            }
        }
        Err(FetchError::NotFound { requested })
    }

    /// Generate a short Japanese fortune from a picture description. Always
    /// returns usable text; failures fall back to fixed messages.
    pub async fn generate(&self, description: &str, notices: &mut Vec<Notice>) -> String {
        let prompt = ChatPrompt {
            system: FORTUNE_SYSTEM_PROMPT.to_string(),
            user: fortune_prompt(description),
            max_tokens: FORTUNE_MAX_TOKENS,
        };

        match self.generator.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("fortune generation returned empty text");
                notices.push(Notice::error(
                    "💥 占い生成に失敗しました。\n\nError: empty response",
                ));
                GENERIC_FALLBACK_FORTUNE.to_string()
            }
            Err(GenerationError::QuotaExceeded(detail)) => {
                warn!(error = %detail, "fortune generation hit the usage limit");
                notices.push(Notice::warning(
                    "⚠️ 占い生成の利用上限に達しました。しばらくしてから再度お試しください。",
                ));
                QUOTA_FALLBACK_FORTUNE.to_string()
            }
            Err(err) => {
                warn!(error = %err, "fortune generation failed");
                notices.push(Notice::error(format!(
                    "💥 占い生成に失敗しました。\n\nError: {err}"
                )));
                GENERIC_FALLBACK_FORTUNE.to_string()
            }
        }
    }

    /// Translate a description to Japanese, returning it unchanged on failure.
    pub async fn translate(&self, text: &str, notices: &mut Vec<Notice>) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let prompt = ChatPrompt {
            system: TRANSLATION_SYSTEM_PROMPT.to_string(),
            user: translation_prompt(text),
            max_tokens: TRANSLATION_MAX_TOKENS,
        };

        match self.generator.complete(&prompt).await {
            Ok(translated) if !translated.trim().is_empty() => translated.trim().to_string(),
            Ok(_) => {
                warn!("translation returned empty text");
                notices.push(Notice::warning("⚠️ 解説の翻訳に失敗しました。原文を表示します。"));
                text.to_string()
            }
            Err(err) => {
                warn!(error = %err, "translation failed");
                notices.push(Notice::warning(format!(
                    "⚠️ 解説の翻訳に失敗しました。原文を表示します。\n\nError: {err}"
                )));
                text.to_string()
            }
        }
    }

    /// Run one full cycle for `date`. Only a fetch failure aborts; the fortune
    /// is generated from the original explanation, not the translation.
    #[tracing::instrument(skip(self, notices))]
    pub async fn refresh(
        &self,
        date: NaiveDate,
        notices: &mut Vec<Notice>,
    ) -> Result<DailyFortune, FetchError> {
        let entry = self.fetch(date, notices).await?;
        let translated = if entry.explanation.trim().is_empty() {
            None
        } else {
            Some(self.translate(&entry.explanation, notices).await)
        };
        let fortune = self.generate(&entry.explanation, notices).await;

        info!(date = %entry.date, title = %entry.title, "refreshed daily fortune");

        Ok(DailyFortune::new(entry, translated, fortune))
    }
}
