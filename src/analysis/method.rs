/// Keyword rulesets for finish-method detection. Matching is
/// case-insensitive substring search over the raw method text, so a
/// single string can satisfy both sets.
pub const KO_KEYWORDS: &[&str] = &["ko", "tko", "knockout"];

pub const SUBMISSION_KEYWORDS: &[&str] = &[
    "sub",
    "submission",
    "choke",
    "arm",
    "leg",
    "triangle",
    "rear naked",
    "guillotine",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodFlags {
    pub is_ko: bool,
    pub is_submission: bool,
}

/// Classify a free-text finish method. Empty text matches nothing.
pub fn classify(method: &str) -> MethodFlags {
    let lowered = method.to_lowercase();
    MethodFlags {
        is_ko: contains_any(&lowered, KO_KEYWORDS),
        is_submission: contains_any(&lowered, SUBMISSION_KEYWORDS),
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rear_naked_choke_is_a_submission_only() {
        let flags = classify("Submission (Rear Naked Choke)");
        assert!(!flags.is_ko);
        assert!(flags.is_submission);
    }

    #[test]
    fn tko_punches_is_a_knockout_only() {
        let flags = classify("TKO (Punches)");
        assert!(flags.is_ko);
        assert!(!flags.is_submission);
    }

    #[test]
    fn unanimous_decision_matches_neither() {
        let flags = classify("Decision - Unanimous");
        assert!(!flags.is_ko);
        assert!(!flags.is_submission);
    }

    #[test]
    fn both_flags_can_hold_at_once() {
        let flags = classify("TKO (Arm Injury)");
        assert!(flags.is_ko);
        assert!(flags.is_submission);
    }

    #[test]
    fn matching_ignores_case() {
        assert!(classify("REAR NAKED CHOKE").is_submission);
        assert!(classify("knockout").is_ko);
    }

    #[test]
    fn empty_text_matches_nothing() {
        let flags = classify("");
        assert!(!flags.is_ko);
        assert!(!flags.is_submission);
    }
}
