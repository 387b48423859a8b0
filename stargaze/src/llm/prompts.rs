//! Prompt templates for the explanation source.
//!
//! Templates use plain `format!()` interpolation so a missing variable is a
//! compile-time error.

use crate::models::{ImageRecord, DATE_FORMAT};

/// System prompt shared by the explanation and summary requests.
pub const ASTRONOMY_EDUCATOR: &str = "You are an expert astronomy educator who explains complex \
astronomical concepts in an accessible, engaging way.";

/// Build the prompt asking for a three-field JSON explanation of one image.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use stargaze::llm::prompts::explanation_prompt;
/// use stargaze::models::{ImageRecord, MediaType};
///
/// let image = ImageRecord {
///     date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
///     explanation: "A barred spiral galaxy.".to_string(),
///     hd_url: None,
///     media_type: MediaType::Image,
///     service_version: "v1".to_string(),
///     title: "NGC 1300".to_string(),
///     url: "https://apod.nasa.gov/apod/image/ngc1300.jpg".to_string(),
///     copyright: None,
/// };
/// let prompt = explanation_prompt(&image);
/// assert!(prompt.contains("NGC 1300"));
/// assert!(prompt.contains("2024-03-14"));
/// ```
pub fn explanation_prompt(image: &ImageRecord) -> String {
    let title = &image.title;
    let explanation = &image.explanation;
    let date = image.date.format(DATE_FORMAT);

    format!(
        r#"Analyze this NASA Astronomy Picture of the Day and write an enhanced explanation of it.

Title: {title}
Original NASA explanation: {explanation}
Date: {date}

Provide:
1. A simplified, engaging explanation suitable for a general audience
2. The key features visible in the image
3. The scientific context and significance

Respond with valid JSON only, no additional text, using exactly this structure:
{{
  "explanation": "simplified explanation here",
  "keyFeatures": ["feature1", "feature2", "feature3"],
  "scientificContext": "broader scientific context here"
}}"#
    )
}

/// Build the prompt asking for a short overview of a set of images.
pub fn collection_summary_prompt(images: &[ImageRecord]) -> String {
    let titles = images
        .iter()
        .map(|image| image.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Write a brief summary of this collection of NASA astronomy images.

Images: {titles}

Give a 2-3 sentence overview highlighting the diversity and significance of these observations.
Respond with the summary text only, without any formatting."#
    )
}
