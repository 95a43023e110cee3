//! Rule-based overlays: the SMS heuristic overrides and the URL trusted-domain
//! whitelist.

use regex::Regex;

/// Trusted domains. Any normalized URL containing one of these as a substring
/// short-circuits to a "Safe" verdict without invoking the model.
pub const SAFE_DOMAINS: [&str; 20] = [
    "google.com",
    "github.com",
    "wikipedia.org",
    "stackoverflow.com",
    "microsoft.com",
    "apple.com",
    "linkedin.com",
    "amazon.com",
    "facebook.com",
    "twitter.com",
    "youtube.com",
    "reddit.com",
    "openai.com",
    "gitlab.com",
    "npmjs.com",
    "medium.com",
    "quora.com",
    "gmail.com",
    "icloud.com",
    "bing.com",
];

/// Return the matching trusted domain, if any.
pub fn whitelisted(normalized_url: &str) -> Option<&'static str> {
    SAFE_DOMAINS
        .iter()
        .copied()
        .find(|domain| normalized_url.contains(domain))
}

const MEETING_KEYWORDS: [&str; 10] = [
    "meeting",
    "meet",
    "appointment",
    "schedule",
    "call",
    "pm",
    "am",
    "tomorrow",
    "today",
    "tonight",
];

const SPAM_KEYWORDS: [&str; 12] = [
    "free",
    "win",
    "won",
    "claim",
    "prize",
    "congratulations",
    "earn",
    "offer",
    "cash",
    "voucher",
    "click",
    "apply now",
];

/// Lexical overrides applied after SMS inference. Either predicate may
/// downgrade a Spam verdict to Ham; neither can do the reverse.
pub struct SmsHeuristics {
    otp_words: Regex,
    otp_digits: Regex,
    otp_context: Regex,
    url_pattern: Regex,
    money_pattern: Regex,
}

impl SmsHeuristics {
    /// Compile the heuristic patterns. Done once at state construction.
    pub fn new() -> Self {
        Self {
            otp_words: Regex::new(r"\b(otp|one-time password|one time password|pin|code)\b")
                .expect("hardcoded pattern"),
            otp_digits: Regex::new(r"\b\d{4,6}\b").expect("hardcoded pattern"),
            otp_context: Regex::new(r"\b(your|is|code|otp|pin)\b").expect("hardcoded pattern"),
            url_pattern: Regex::new(r"http\S+|www\.\S+|https\S+").expect("hardcoded pattern"),
            money_pattern: Regex::new(
                r"\b(₹|inr|rs\b|rupee|rupees|lakh|crore|dollars|usd|money)\b",
            )
            .expect("hardcoded pattern"),
        }
    }

    /// True for OTP-style transactional messages.
    pub fn looks_like_otp(&self, text: &str) -> bool {
        let t = text.to_lowercase();
        if self.otp_words.is_match(&t) {
            return true;
        }
        self.otp_digits.is_match(&t) && self.otp_context.is_match(&t)
    }

    /// True for benign scheduling/meeting messages. Conservative: requires a
    /// time/day/meeting keyword and the absence of spam keywords, URLs, and
    /// money references.
    pub fn looks_like_meeting(&self, text: &str) -> bool {
        let t = text.to_lowercase();

        if !MEETING_KEYWORDS.iter().any(|k| t.contains(k)) {
            return false;
        }
        if SPAM_KEYWORDS.iter().any(|k| t.contains(k)) {
            return false;
        }
        if self.url_pattern.is_match(&t) {
            return false;
        }
        if self.money_pattern.is_match(&t) {
            return false;
        }
        true
    }
}

impl Default for SmsHeuristics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_detection() {
        let h = SmsHeuristics::new();
        assert!(h.looks_like_otp("Your OTP is 4821"));
        assert!(h.looks_like_otp("Use PIN 123456 to log in"));
        assert!(h.looks_like_otp("your verification number is 98765"));
        assert!(!h.looks_like_otp("Hello friend"));
        assert!(!h.looks_like_otp("See you at 5"));
    }

    #[test]
    fn test_meeting_detection() {
        let h = SmsHeuristics::new();
        assert!(h.looks_like_meeting("Let's meet tomorrow at 5pm"));
        assert!(h.looks_like_meeting("Team call rescheduled to today"));
        // Spam keyword kills the override
        assert!(!h.looks_like_meeting("Win cash prize, meet us today"));
        // URLs kill the override
        assert!(!h.looks_like_meeting("meeting at http://example.com"));
        // Money references kill the override
        assert!(!h.looks_like_meeting("call me to discuss usd transfer"));
        // No scheduling keyword at all
        assert!(!h.looks_like_meeting("Random text"));
    }

    #[test]
    fn test_whitelist() {
        assert_eq!(whitelisted("github.com/some/repo"), Some("github.com"));
        assert_eq!(whitelisted("faketoken-login.xyz/claim"), None);
    }
}
