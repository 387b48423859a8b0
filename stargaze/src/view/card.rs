use chrono::NaiveDate;

use crate::client::ExplanationState;
use crate::models::{ExplanationRecord, ImageRecord, MediaType};

/// Characters of the NASA description shown before "Read more".
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaView {
    Image { url: String, hd_url: Option<String> },
    /// Videos are not embedded; the card shows a placeholder linking out.
    Video { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainButton {
    pub label: &'static str,
    pub enabled: bool,
}

impl ExplainButton {
    pub fn for_state(state: &ExplanationState) -> Self {
        match state {
            ExplanationState::Absent | ExplanationState::Failed => Self {
                label: "Get AI Explanation",
                enabled: true,
            },
            ExplanationState::Pending => Self {
                label: "Analyzing...",
                enabled: false,
            },
            ExplanationState::Ready(_) => Self {
                label: "AI Analysis Complete",
                enabled: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub date: NaiveDate,
    pub date_label: String,
    pub title: String,
    pub media: MediaView,
    pub copyright: Option<String>,
    pub description: String,
    /// Whether the description was cut and a "Read more" toggle applies.
    pub truncated: bool,
    pub explanation: Option<ExplanationRecord>,
    pub button: ExplainButton,
}

impl CardView {
    pub fn new(image: &ImageRecord, state: &ExplanationState, expanded: bool) -> Self {
        let (description, truncated) = if expanded {
            (image.explanation.clone(), false)
        } else {
            truncate(&image.explanation, DESCRIPTION_PREVIEW_CHARS)
        };

        let media = match image.media_type {
            MediaType::Image => MediaView::Image {
                url: image.url.clone(),
                hd_url: image.hd_url.clone(),
            },
            MediaType::Video => MediaView::Video {
                url: image.url.clone(),
            },
        };

        let explanation = match state {
            ExplanationState::Ready(record) => Some(record.clone()),
            _ => None,
        };

        Self {
            date: image.date,
            date_label: long_date(image.date),
            title: image.title.clone(),
            media,
            copyright: image.copyright.clone(),
            description,
            truncated,
            explanation,
            button: ExplainButton::for_state(state),
        }
    }

    pub fn hd_url(&self) -> Option<&str> {
        match &self.media {
            MediaView::Image { hd_url, .. } => hd_url.as_deref(),
            MediaView::Video { .. } => None,
        }
    }
}

/// "October 18, 2026".
pub fn long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

fn truncate(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (format!("{}...", &text[..byte_idx]), true),
        None => (text.to_string(), false),
    }
}
