//! Suspicion Pattern Classifier
//!
//! Ordered rule table evaluated against a normalized URL. The order is a
//! contract: the first matching rule decides the reported reason.

use regex::Regex;

/// Rule table: (unanchored pattern, reason). Changing order changes
/// observable messages.
const SUSPICION_RULES: [(&str, &str); 8] = [
    (r"\.tk$", "Suspicious TLD"),
    (r"\.xyz$", "Suspicious TLD"),
    (r"bit\.ly", "URL shortener"),
    (r"tiny\.cc", "URL shortener"),
    (r"password.*required", "Suspicious keywords"),
    (r"login.*verify", "Suspicious keywords"),
    (r"[0-9]{10,}", "Suspicious long numbers"),
    (r"[a-zA-Z0-9]{25,}", "Suspicious random string"),
];

/// Evaluates normalized URLs against the suspicion rules.
pub struct PatternClassifier {
    rules: Vec<(Regex, &'static str)>,
}

impl PatternClassifier {
    pub fn new() -> Self {
        let rules = SUSPICION_RULES
            .iter()
            .map(|(pattern, reason)| {
                let re = Regex::new(pattern).expect("suspicion pattern is valid");
                (re, *reason)
            })
            .collect();

        Self { rules }
    }

    /// Reason of the first matching rule, if any.
    pub fn classify(&self, normalized_url: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(normalized_url))
            .map(|(_, reason)| *reason)
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_suspicious_tlds() {
        let c = PatternClassifier::new();
        assert_eq!(c.classify("example.tk"), Some("Suspicious TLD"));
        assert_eq!(c.classify("shady.xyz"), Some("Suspicious TLD"));
    }

    #[test]
    fn flags_url_shorteners() {
        let c = PatternClassifier::new();
        assert_eq!(c.classify("bit.ly/abc"), Some("URL shortener"));
        assert_eq!(c.classify("tiny.cc/abc"), Some("URL shortener"));
    }

    #[test]
    fn flags_keyword_sequences() {
        let c = PatternClassifier::new();
        assert_eq!(
            c.classify("evil.com/password-reset-required"),
            Some("Suspicious keywords")
        );
        assert_eq!(
            c.classify("evil.com/login/verify-account"),
            Some("Suspicious keywords")
        );
    }

    #[test]
    fn flags_long_digit_runs() {
        let c = PatternClassifier::new();
        assert_eq!(c.classify("evil.com/1234567890"), Some("Suspicious long numbers"));
        assert_eq!(c.classify("evil.com/123456789"), None);
    }

    #[test]
    fn flags_long_alphanumeric_runs() {
        let c = PatternClassifier::new();
        assert_eq!(
            c.classify("evil.com/abcdefghij0123456789abcde"),
            Some("Suspicious random string")
        );
    }

    #[test]
    fn first_match_wins_on_overlap() {
        let c = PatternClassifier::new();
        // Matches both the shortener rule and the keyword rule; the shortener
        // rule comes first in the table.
        assert_eq!(
            c.classify("bit.ly/password-required-login"),
            Some("URL shortener")
        );
        // Trailing .tk outranks the digit-run rule.
        assert_eq!(c.classify("0123456789.tk"), Some("Suspicious TLD"));
    }

    #[test]
    fn clean_url_is_unflagged() {
        let c = PatternClassifier::new();
        assert_eq!(c.classify("safe-example.com"), None);
    }
}
