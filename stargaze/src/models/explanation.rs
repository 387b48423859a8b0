use serde::{Deserialize, Serialize};

pub const FALLBACK_KEY_FEATURE: &str = "Enhanced explanation generated";
pub const FALLBACK_SCIENTIFIC_CONTEXT: &str = "AI-generated astronomical analysis";
pub const FALLBACK_COLLECTION_SUMMARY: &str =
    "A fascinating collection of astronomical images from NASA.";

/// AI-generated annotation for exactly one image record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRecord {
    /// Simplified explanation for a general audience.
    pub explanation: String,
    /// Short items describing what is visible in the image.
    pub key_features: Vec<String>,
    /// Broader scientific significance.
    pub scientific_context: String,
}

/// Outcome of interpreting the explanation source's text.
///
/// `Degraded` is a successful result: the model answered, but not with the
/// requested JSON shape, so the raw text is shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    Parsed(ExplanationRecord),
    Degraded { raw: String },
}

impl Explanation {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn into_record(self) -> ExplanationRecord {
        match self {
            Self::Parsed(record) => record,
            Self::Degraded { raw } => ExplanationRecord {
                explanation: raw,
                key_features: vec![FALLBACK_KEY_FEATURE.to_string()],
                scientific_context: FALLBACK_SCIENTIFIC_CONTEXT.to_string(),
            },
        }
    }
}

impl From<Explanation> for ExplanationRecord {
    fn from(explanation: Explanation) -> Self {
        explanation.into_record()
    }
}
