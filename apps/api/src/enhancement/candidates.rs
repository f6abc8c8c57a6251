//! Candidate model ordering.
//!
//! The default list spans different model sizes and families so a failure
//! specific to one deployment rarely takes out the whole list.

/// Default fallback order, largest and most capable first.
pub const DEFAULT_MODELS: [&str; 5] = [
    "llama-3.3-70b-versatile",
    "llama-3.1-8b-instant",
    "mixtral-8x7b-32768",
    "gemma2-9b-it",
    "llama3-70b-8192",
];

/// Builds the per-request candidate sequence.
///
/// If `hint` names a member of `defaults` it moves to the front and the rest
/// keep their relative order. Any other hint (including empty) is ignored.
pub fn order_candidates<S: AsRef<str>>(hint: &str, defaults: &[S]) -> Vec<String> {
    let hint = hint.trim();
    let preferred = defaults.iter().position(|m| m.as_ref() == hint);

    let mut ordered: Vec<String> = Vec::with_capacity(defaults.len());
    if let Some(index) = preferred {
        ordered.push(defaults[index].as_ref().to_string());
    }
    // Skip by position so duplicate entries in a hand-built list survive.
    ordered.extend(
        defaults
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != preferred)
            .map(|(_, m)| m.as_ref().to_string()),
    );
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_hint_keeps_default_order() {
        let ordered = order_candidates("gpt-4o", &DEFAULT_MODELS);
        assert_eq!(ordered, DEFAULT_MODELS.to_vec());
    }

    #[test]
    fn test_empty_hint_keeps_default_order() {
        assert_eq!(order_candidates("", &DEFAULT_MODELS), DEFAULT_MODELS.to_vec());
    }

    #[test]
    fn test_third_entry_hint_moves_to_front() {
        let ordered = order_candidates(DEFAULT_MODELS[2], &DEFAULT_MODELS);
        assert_eq!(
            ordered,
            vec![
                DEFAULT_MODELS[2],
                DEFAULT_MODELS[0],
                DEFAULT_MODELS[1],
                DEFAULT_MODELS[3],
                DEFAULT_MODELS[4],
            ]
        );
    }

    #[test]
    fn test_first_entry_hint_is_unchanged_order() {
        let ordered = order_candidates(DEFAULT_MODELS[0], &DEFAULT_MODELS);
        assert_eq!(ordered, DEFAULT_MODELS.to_vec());
    }

    #[test]
    fn test_ordering_is_idempotent() {
        let first = order_candidates(DEFAULT_MODELS[3], &DEFAULT_MODELS);
        let second = order_candidates(DEFAULT_MODELS[3], &DEFAULT_MODELS);
        assert_eq!(first, second);
        assert_eq!(first.len(), DEFAULT_MODELS.len());
    }

    #[test]
    fn test_hint_is_trimmed() {
        let hint = format!("  {}\n", DEFAULT_MODELS[4]);
        assert_eq!(order_candidates(&hint, &DEFAULT_MODELS)[0], DEFAULT_MODELS[4]);
    }

    #[test]
    fn test_works_with_owned_lists() {
        let defaults = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(order_candidates("c", &defaults), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_entries_are_kept() {
        let defaults = ["a", "a", "b"];
        assert_eq!(order_candidates("", &defaults), vec!["a", "a", "b"]);
        assert_eq!(order_candidates("a", &defaults), vec!["a", "a", "b"]);
        assert_eq!(order_candidates("b", &defaults), vec!["b", "a", "a"]);
    }
}
