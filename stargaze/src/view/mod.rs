//! Presentation layer: view models computed from a [`GallerySnapshot`] plus
//! a plain-text renderer for terminals.
//!
//! Views hold no state of their own. Everything a card shows is derived from
//! the record and its [`ExplanationState`] at render time; user actions come
//! back out as [`Intent`]s.
//!
//! [`GallerySnapshot`]: crate::client::GallerySnapshot
//! [`ExplanationState`]: crate::client::ExplanationState

mod card;
mod gallery;

use chrono::NaiveDate;

pub use card::{CardView, ExplainButton, MediaView, DESCRIPTION_PREVIEW_CHARS};
pub use gallery::{render_text, FooterView, GalleryView, HeaderView};

/// User actions a front end reports back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Explain(NaiveDate),
    Today,
    Recent,
    Retry,
}
