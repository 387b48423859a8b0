use crate::models::{Explanation, ExplanationRecord};

/// Remove Markdown code-fence markers (```` ```json ```` and ```` ``` ````,
/// each with an optional trailing newline) wherever they appear, then trim.
pub fn strip_code_fences(content: &str) -> String {
    let mut cleaned = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find("```") {
        cleaned.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        if let Some(after_tag) = rest.strip_prefix("json") {
            rest = after_tag;
        }
        if let Some(after_newline) = rest.strip_prefix('\n') {
            rest = after_newline;
        }
    }
    cleaned.push_str(rest);

    cleaned.trim().to_string()
}

/// Interpret the explanation source's answer.
///
/// Anything that does not deserialize into the three-field shape becomes
/// [`Explanation::Degraded`] carrying the untouched original text.
pub fn parse_explanation(content: &str) -> Explanation {
    let cleaned = strip_code_fences(content);

    match serde_json::from_str::<ExplanationRecord>(&cleaned) {
        Ok(record) => Explanation::Parsed(record),
        Err(e) => {
            tracing::warn!(
                response_len = content.len(),
                response_preview = %content.chars().take(100).collect::<String>(),
                error = %e,
                "Explanation was not valid JSON, returning raw text"
            );
            Explanation::Degraded {
                raw: content.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FALLBACK_KEY_FEATURE, FALLBACK_SCIENTIFIC_CONTEXT};
    use pretty_assertions::assert_eq;

    const VALID: &str = r#"{"explanation":"A galaxy.","keyFeatures":["Arms","Core"],"scientificContext":"Galaxies evolve."}"#;

    fn expected() -> ExplanationRecord {
        ExplanationRecord {
            explanation: "A galaxy.".into(),
            key_features: vec!["Arms".into(), "Core".into()],
            scientific_context: "Galaxies evolve.".into(),
        }
    }

    #[test]
    fn strips_json_fence() {
        let fenced = format!("```json\n{VALID}\n```");
        assert_eq!(strip_code_fences(&fenced), VALID);
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = format!("```\n{VALID}\n```\n");
        assert_eq!(strip_code_fences(&fenced), VALID);
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  plain answer \n"), "plain answer");
    }

    #[test]
    fn parses_plain_json() {
        assert_eq!(parse_explanation(VALID), Explanation::Parsed(expected()));
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = format!("```json\n{VALID}\n```");
        assert_eq!(parse_explanation(&fenced), Explanation::Parsed(expected()));
    }

    #[test]
    fn prose_degrades_to_raw_text() {
        let raw = "The Andromeda galaxy is our nearest large neighbour.";
        let explanation = parse_explanation(raw);
        assert_eq!(
            explanation,
            Explanation::Degraded {
                raw: raw.to_string()
            }
        );

        let record = explanation.into_record();
        assert_eq!(record.explanation, raw);
        assert_eq!(record.key_features, vec![FALLBACK_KEY_FEATURE.to_string()]);
        assert_eq!(record.scientific_context, FALLBACK_SCIENTIFIC_CONTEXT);
    }

    #[test]
    fn degraded_keeps_fences_in_raw_text() {
        let raw = "```json\n{\"explanation\": \"truncated\"\n```";
        match parse_explanation(raw) {
            Explanation::Degraded { raw: kept } => assert_eq!(kept, raw),
            other => panic!("expected degraded, got {other:?}"),
        }
    }

    #[test]
    fn json_with_wrong_shape_degrades() {
        let raw = r#"{"summary": "no expected fields"}"#;
        assert!(parse_explanation(raw).is_degraded());
    }

    #[test]
    fn json_array_degrades() {
        assert!(parse_explanation("[1, 2, 3]").is_degraded());
    }
}
