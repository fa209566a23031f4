//! Block-list filter for free-text answers.
//!
//! The check is a case-insensitive substring match, so it also flags words
//! that merely contain a blocked word ("hello", "shellfish"). That is the
//! behavior the landing page has always had and it is kept as is.

/// Words that may not appear anywhere in a free-text answer.
pub const BLOCKED_WORDS: [&str; 18] = [
    "hate", "stupid", "idiot", "dumb", "retard", "moron", "fuck", "shit", "damn", "hell", "bitch",
    "asshole", "bastard", "crap", "piss", "suck", "loser", "worthless",
];

/// Message shown when free text trips the filter.
pub const RESPECTFUL_LANGUAGE: &str =
    "Please use respectful language. We want to create a supportive environment for everyone.";

/// Returns the first blocked word found in `text`, if any.
pub fn find_blocked(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    BLOCKED_WORDS.into_iter().find(|word| lower.contains(word))
}

/// Whether `text` contains a blocked word.
pub fn is_inappropriate(text: &str) -> bool {
    find_blocked(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        assert!(!is_inappropriate("Balancing work and my mother's appointments"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(find_blocked("This is STUPID"), Some("stupid"));
    }

    #[test]
    fn substrings_are_flagged() {
        assert_eq!(find_blocked("hello there"), Some("hell"));
        assert!(is_inappropriate("my back sucks after lifting"));
    }
}
