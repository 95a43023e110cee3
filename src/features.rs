//! Feature Extraction

use ndarray::Array1;

/// Numeric features derived from a phone number digit string.
///
/// Callers must sanitize the input to digits first (see [`sanitize_digits`]);
/// routes reject strings that are empty after sanitization.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneFeatures {
    /// Total digit count
    pub length: f64,
    /// Starts with "140" (telemarketing prefix)
    pub starts_140: f64,
    /// Starts with "1800" (toll-free prefix)
    pub starts_1800: f64,
    /// Starts with "91" (country code)
    pub starts_91: f64,
    /// Count of distinct digits
    pub unique_digits: f64,
    /// Longest run of one repeated digit
    pub max_run_len: f64,
    /// Shannon entropy (base 2) of the digit distribution
    pub digit_entropy: f64,
    /// Sum of digit values modulo 10
    pub sum_mod_10: f64,
    /// Any digit repeated three times in a row
    pub has_triple_repeat: f64,
    /// Last digit is even
    pub last_digit_even: f64,
}

impl PhoneFeatures {
    /// Extract all ten features from a digit string.
    ///
    /// The prefix indicators are checked independently: "1800..." sets
    /// `starts_1800` without implying anything about `starts_140`.
    pub fn from_digits(s: &str) -> Self {
        let bytes = s.as_bytes();
        let length = bytes.len() as f64;

        let mut seen = [false; 256];
        let mut unique = 0u32;
        for &b in bytes {
            if !seen[b as usize] {
                seen[b as usize] = true;
                unique += 1;
            }
        }

        let mut max_run = 1u32;
        let mut cur = 1u32;
        for w in bytes.windows(2) {
            if w[0] == w[1] {
                cur += 1;
                max_run = max_run.max(cur);
            } else {
                cur = 1;
            }
        }

        let digit_sum: u32 = s.chars().filter_map(|c| c.to_digit(10)).sum();

        let has_triple = bytes
            .windows(3)
            .any(|w| w[0].is_ascii_digit() && w[0] == w[1] && w[1] == w[2]);

        let last_even = s
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .map_or(0.0, |d| if d % 2 == 0 { 1.0 } else { 0.0 });

        Self {
            length,
            starts_140: if s.starts_with("140") { 1.0 } else { 0.0 },
            starts_1800: if s.starts_with("1800") { 1.0 } else { 0.0 },
            starts_91: if s.starts_with("91") { 1.0 } else { 0.0 },
            unique_digits: unique as f64,
            max_run_len: max_run as f64,
            digit_entropy: digit_entropy(s),
            sum_mod_10: (digit_sum % 10) as f64,
            has_triple_repeat: if has_triple { 1.0 } else { 0.0 },
            last_digit_even: last_even,
        }
    }

    /// Feature vector in training order.
    pub fn to_vector(&self) -> Array1<f64> {
        Array1::from(vec![
            self.length,
            self.starts_140,
            self.starts_1800,
            self.starts_91,
            self.unique_digits,
            self.max_run_len,
            self.digit_entropy,
            self.sum_mod_10,
            self.has_triple_repeat,
            self.last_digit_even,
        ])
    }
}

/// Shannon entropy (base 2) of the digit frequency distribution over the ten
/// possible digits. Zero for a string without digits.
pub fn digit_entropy(s: &str) -> f64 {
    let mut counts = [0u32; 10];
    for c in s.chars() {
        if let Some(d) = c.to_digit(10) {
            counts[d as usize] += 1;
        }
    }
    let total: u32 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Strip everything but ASCII digits.
pub fn sanitize_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

const SUSPICIOUS_TLDS: [&str; 7] = ["xyz", "top", "online", "win", "club", "site", "info"];
const SUSPICIOUS_KEYWORDS: [&str; 7] =
    ["free", "offer", "login", "secure", "update", "bonus", "cash"];

/// Lexical features derived from a normalized URL, matching the training
/// pipeline of the URL model.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlFeatures {
    /// Hyphen count
    pub num_hyphens: f64,
    /// Digit count
    pub num_digits: f64,
    /// TLD is on the suspicious list
    pub suspicious_tld: f64,
    /// Count of suspicious keywords present
    pub suspicious_keywords: f64,
}

impl UrlFeatures {
    /// Extract features from a raw URL. Normalization (scheme and `www.`
    /// stripping, lowercasing) happens internally.
    pub fn from_url(raw: &str) -> Self {
        let clean = normalize_url(raw);
        let clean = clean.trim_matches('/');
        let num_hyphens = clean.matches('-').count() as f64;
        let num_digits = clean.chars().filter(|c| c.is_ascii_digit()).count() as f64;
        let tld = clean.rsplit('.').next().unwrap_or("");
        let suspicious_tld = if SUSPICIOUS_TLDS.contains(&tld) { 1.0 } else { 0.0 };
        let suspicious_keywords = SUSPICIOUS_KEYWORDS
            .iter()
            .filter(|kw| clean.contains(*kw))
            .count() as f64;
        Self {
            num_hyphens,
            num_digits,
            suspicious_tld,
            suspicious_keywords,
        }
    }

    /// Feature vector in training order.
    pub fn to_vector(&self) -> Array1<f64> {
        Array1::from(vec![
            self.num_hyphens,
            self.num_digits,
            self.suspicious_tld,
            self.suspicious_keywords,
        ])
    }
}

/// Lowercase a URL and strip scheme and `www.` prefixes.
pub fn normalize_url(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace("http://", "")
        .replace("https://", "")
        .replace("www.", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_unique_bounds() {
        for s in ["1", "1234567890", "1112223334", "9999999999"] {
            let f = PhoneFeatures::from_digits(s);
            assert_eq!(f.length as usize, s.len());
            assert!(f.unique_digits <= f.length);
        }
    }

    #[test]
    fn test_entropy_zero_iff_identical() {
        assert_eq!(digit_entropy("7777777"), 0.0);
        assert!(digit_entropy("7177777") > 0.0);
        // Uniform over two digits: exactly 1 bit
        assert!((digit_entropy("1212") - 1.0).abs() < 1e-12);
        // Uniform over all ten digits: log2(10)
        assert!((digit_entropy("0123456789") - 10f64.log2()).abs() < 1e-12);
    }

    #[test]
    fn test_triple_repeat() {
        assert_eq!(PhoneFeatures::from_digits("1112").has_triple_repeat, 1.0);
        assert_eq!(PhoneFeatures::from_digits("1212").has_triple_repeat, 0.0);
        assert_eq!(PhoneFeatures::from_digits("1211122").max_run_len, 3.0);
    }

    #[test]
    fn test_prefix_indicators_are_independent() {
        let f = PhoneFeatures::from_digits("18001234567");
        assert_eq!(f.starts_1800, 1.0);
        assert_eq!(f.starts_140, 0.0);
        assert_eq!(f.starts_91, 0.0);

        let f = PhoneFeatures::from_digits("1401234567");
        assert_eq!(f.starts_140, 1.0);
        assert_eq!(f.starts_1800, 0.0);
    }

    #[test]
    fn test_sum_and_parity() {
        let f = PhoneFeatures::from_digits("1234");
        assert_eq!(f.sum_mod_10, 0.0);
        assert_eq!(f.last_digit_even, 1.0);

        let f = PhoneFeatures::from_digits("1235");
        assert_eq!(f.sum_mod_10, 1.0);
        assert_eq!(f.last_digit_even, 0.0);
    }

    #[test]
    fn test_sanitize_digits() {
        assert_eq!(sanitize_digits("+91 98765-43210"), "919876543210");
        assert_eq!(sanitize_digits("no digits"), "");
    }

    #[test]
    fn test_url_normalization() {
        assert_eq!(normalize_url("  HTTPS://WWW.Example.COM/x "), "example.com/x");
        assert_eq!(normalize_url("http://github.com"), "github.com");
    }

    #[test]
    fn test_url_features() {
        let f = UrlFeatures::from_url("http://free-login99.xyz/");
        assert_eq!(f.num_hyphens, 1.0);
        assert_eq!(f.num_digits, 2.0);
        assert_eq!(f.suspicious_tld, 1.0);
        // "free" and "login"
        assert_eq!(f.suspicious_keywords, 2.0);

        let f = UrlFeatures::from_url("https://www.example.com");
        assert_eq!(f.suspicious_tld, 0.0);
        assert_eq!(f.suspicious_keywords, 0.0);
    }
}
