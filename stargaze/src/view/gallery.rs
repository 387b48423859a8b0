use std::collections::HashSet;
use std::fmt::Write;

use chrono::NaiveDate;

use super::card::{CardView, MediaView};
use crate::client::{GallerySnapshot, LoadState};

pub const EMPTY_GALLERY: &str = "No images found";
pub const LOADING_MESSAGE: &str = "Loading NASA images...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: &'static str,
    pub tagline: &'static str,
    pub today_label: &'static str,
    pub recent_label: &'static str,
}

impl Default for HeaderView {
    fn default() -> Self {
        Self {
            title: "NASA Image Explorer",
            tagline: "Discover the cosmos with AI-enhanced explanations",
            today_label: "Today's Image",
            recent_label: "Recent Images",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub attribution: &'static str,
    pub source_url: &'static str,
    pub tagline: &'static str,
}

impl Default for FooterView {
    fn default() -> Self {
        Self {
            attribution: "Images courtesy of NASA API",
            source_url: "https://api.nasa.gov/",
            tagline: "Enhanced with AI explanations to make astronomy accessible to everyone",
        }
    }
}

/// One full render of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub header: HeaderView,
    pub loading: bool,
    /// Persistent fetch-failure banner; paired with a "Try Again" action.
    pub banner: Option<String>,
    pub cards: Vec<CardView>,
    pub footer: FooterView,
}

impl GalleryView {
    /// `expanded` lists the cards whose full description is shown.
    pub fn new(snapshot: &GallerySnapshot, expanded: &HashSet<NaiveDate>) -> Self {
        let cards = snapshot
            .images
            .iter()
            .map(|image| {
                CardView::new(
                    image,
                    snapshot.explanation(image.date),
                    expanded.contains(&image.date),
                )
            })
            .collect();

        let banner = match &snapshot.load {
            LoadState::Failed { message } => Some(message.clone()),
            _ => None,
        };

        Self {
            header: HeaderView::default(),
            loading: snapshot.load == LoadState::Loading,
            banner,
            cards,
            footer: FooterView::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Render for a terminal. Loading and failure replace the gallery body.
pub fn render_text(view: &GalleryView) -> String {
    let mut out = String::new();
    let header = &view.header;

    let _ = writeln!(out, "{}", header.title);
    let _ = writeln!(out, "{}", header.tagline);
    let _ = writeln!(out, "[{}] [{}]", header.today_label, header.recent_label);
    out.push('\n');

    if view.loading {
        let _ = writeln!(out, "{LOADING_MESSAGE}");
    } else if let Some(banner) = &view.banner {
        let _ = writeln!(out, "! {banner}");
        let _ = writeln!(out, "[Try Again]");
    } else if view.is_empty() {
        let _ = writeln!(out, "{EMPTY_GALLERY}");
    } else {
        for card in &view.cards {
            render_card(&mut out, card);
            out.push('\n');
        }
    }

    out.push('\n');
    let _ = writeln!(out, "{} ({})", view.footer.attribution, view.footer.source_url);
    let _ = writeln!(out, "{}", view.footer.tagline);
    out
}

fn render_card(out: &mut String, card: &CardView) {
    let _ = writeln!(out, "== {} ==", card.title);
    match &card.copyright {
        Some(copyright) => {
            let _ = writeln!(out, "{} | APOD | (c) {}", card.date_label, copyright);
        }
        None => {
            let _ = writeln!(out, "{} | APOD", card.date_label);
        }
    }

    match &card.media {
        MediaView::Image { url, hd_url } => {
            let _ = writeln!(out, "Image: {url}");
            if let Some(hd) = hd_url {
                let _ = writeln!(out, "View HD: {hd}");
            }
        }
        MediaView::Video { url } => {
            let _ = writeln!(out, "Video Content: {url}");
        }
    }

    let _ = writeln!(out, "NASA Description");
    let _ = writeln!(out, "{}", card.description);
    if card.truncated {
        let _ = writeln!(out, "[Read more]");
    }

    if let Some(explanation) = &card.explanation {
        let _ = writeln!(out, "AI Enhanced Explanation");
        let _ = writeln!(out, "{}", explanation.explanation);
        for feature in &explanation.key_features {
            let _ = writeln!(out, "  * {feature}");
        }
        let _ = writeln!(out, "{}", explanation.scientific_context);
    }

    let marker = if card.button.enabled { "" } else { " (disabled)" };
    let _ = writeln!(out, "[{}]{}", card.button.label, marker);
}
