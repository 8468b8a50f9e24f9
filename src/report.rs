//! Sentinel-marker classification of assistant replies.
//!
//! The backend signals a structured assessment by embedding one fixed literal
//! heading in otherwise free-form text. This module is the only place that
//! literal is matched, so the rule (or a future structured-output contract)
//! can change without touching the conversation controller.

/// Fixed sentinel heading the backend embeds in assessment replies.
///
/// Exact, case-sensitive, unversioned: the same literal lives in the persona
/// instructions, and any drift between the two breaks classification silently.
pub const REPORT_MARKER: &str = "---التقرير الطبي التقديري---";

/// Outcome of classifying one raw assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_report: bool,
    /// Reply text with the first marker occurrence removed and ends trimmed.
    pub text: String,
}

/// Classifies a raw assistant reply as report or plain text.
///
/// Total and side-effect free. Only the first marker occurrence is stripped;
/// mid-word and repeated markers are accepted as-is. A reply that is nothing
/// but the marker classifies as a report with empty text.
pub fn classify(raw: &str) -> Classification {
    let is_report = raw.contains(REPORT_MARKER);
    let cleaned = if is_report {
        raw.replacen(REPORT_MARKER, "", 1)
    } else {
        raw.to_string()
    };

    Classification {
        is_report,
        text: cleaned.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, Classification, REPORT_MARKER};

    #[test]
    fn plain_text_is_not_a_report_and_only_gets_trimmed() {
        assert_eq!(
            classify("  hello world  "),
            Classification {
                is_report: false,
                text: "hello world".to_string(),
            }
        );
    }

    #[test]
    fn marked_text_strips_marker_and_surrounding_whitespace() {
        let raw = format!("  {REPORT_MARKER} نص التقرير الكامل  ");
        assert_eq!(
            classify(&raw),
            Classification {
                is_report: true,
                text: "نص التقرير الكامل".to_string(),
            }
        );
    }

    #[test]
    fn marker_only_reply_is_an_empty_bodied_report() {
        let classification = classify(REPORT_MARKER);

        assert!(classification.is_report);
        assert_eq!(classification.text, "");
    }

    #[test]
    fn marker_is_matched_even_mid_word() {
        let raw = format!("نص{REPORT_MARKER}ملتصق");
        let classification = classify(&raw);

        assert!(classification.is_report);
        assert_eq!(classification.text, "نصملتصق");
    }

    #[test]
    fn only_the_first_marker_occurrence_is_stripped() {
        let raw = format!("{REPORT_MARKER} أولاً {REPORT_MARKER} ثانياً");
        let classification = classify(&raw);

        assert!(classification.is_report);
        assert_eq!(classification.text, format!("أولاً {REPORT_MARKER} ثانياً"));
    }

    #[test]
    fn classification_is_idempotent_for_single_marker_replies() {
        for raw in [
            "رد عادي بلا علامة",
            &format!("{REPORT_MARKER} تقرير"),
            &format!("   {REPORT_MARKER}   "),
        ] {
            let cleaned = classify(raw).text;
            assert!(!classify(&cleaned).is_report);
        }
    }
}
