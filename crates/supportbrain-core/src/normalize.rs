//! Text normalisation for ticket subject and body.
//!
//! Every classifier in the cascade was trained on text cleaned exactly this
//! way, so the output is part of the model contract: any change here shifts
//! the token distribution the models see.
//!
//! # Rules
//!
//! - Subject and body are joined with a single space
//! - Lowercased, then every character outside `[a-z0-9]` becomes a space
//!   (punctuation, accented letters, emoji)
//! - Whitespace runs collapse to one space, ends trimmed
//! - Tokens in [`STOP_WORDS`] are dropped

/// Closed set of English function words removed before classification.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "is", "are", "was", "were", "in", "on", "at", "to", "for",
    "with", "of", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
    "my", "your", "his", "her", "its", "our", "their", "from", "as", "by", "be", "been", "am",
    "will", "can", "do", "does", "did", "have", "has", "had", "not", "but", "if", "then", "so",
    "no", "yes",
];

/// Normalise a ticket's subject and body into the text fed to every stage.
///
/// Total over all inputs: empty subject and body yield an empty string.
/// Applying it to its own output (with an empty body) is a no-op.
pub fn normalize(subject: &str, body: &str) -> String {
    let joined = format!("{subject} {body}").to_lowercase();

    let cleaned: String = joined
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| !is_stop_word(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn joins_subject_and_body() {
        assert_eq!(
            normalize("Login failure", "password reset needed"),
            "login failure password reset needed"
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize("", ""), "");
        assert_eq!(normalize("   ", "\n\t"), "");
    }

    #[test]
    fn only_stop_words_yields_empty() {
        assert_eq!(normalize("I am", "if it is not"), "");
    }

    #[test]
    fn strips_punctuation_and_case() {
        assert_eq!(normalize("Can't Login!", ""), "t login");
        assert_eq!(normalize("Can't Login!", ""), normalize("CAN'T login", ""));
        assert_eq!(normalize("Server DOWN!!!", ""), normalize("server down", ""));
    }

    #[test]
    fn non_ascii_becomes_separator() {
        assert_eq!(normalize("café crash 🚀now", ""), "caf crash now");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            normalize("  invoice\t\tmissing ", "\n\n refund   please"),
            "invoice missing refund please"
        );
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize("Error 500", "on v2.1"), "error 500 v2 1");
    }

    #[test]
    fn stop_word_set_is_closed() {
        let expected: HashSet<&str> = [
            "a", "an", "the", "and", "or", "is", "are", "was", "were", "in", "on", "at", "to",
            "for", "with", "of", "this", "that", "these", "those", "i", "you", "he", "she", "it",
            "we", "they", "my", "your", "his", "her", "its", "our", "their", "from", "as", "by",
            "be", "been", "am", "will", "can", "do", "does", "did", "have", "has", "had", "not",
            "but", "if", "then", "so", "no", "yes",
        ]
        .into_iter()
        .collect();
        let actual: HashSet<&str> = STOP_WORDS.iter().copied().collect();
        assert_eq!(STOP_WORDS.len(), 55);
        assert_eq!(actual.len(), STOP_WORDS.len(), "duplicate stop word");
        assert_eq!(actual, expected);
        // Stop words only match whole tokens.
        assert_eq!(normalize("another theme", ""), "another theme");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            ("Can't login", "I forgot my password"),
            ("URGENT: billing!!", "We were charged twice for the same invoice."),
            ("", ""),
            ("Ünïcödé 🎉", "mixed CASE 123"),
        ];
        for (subject, body) in inputs {
            let once = normalize(subject, body);
            assert_eq!(normalize(&once, ""), once, "not idempotent for {subject:?}");
        }
    }

    #[test]
    fn deterministic() {
        let a = normalize("Printer jam", "Tray 2 again");
        let b = normalize("Printer jam", "Tray 2 again");
        assert_eq!(a, b);
    }
}
