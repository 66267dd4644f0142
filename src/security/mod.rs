// Input hardening helpers for the contact form and rendered links.
// Escaping, URL and email shape checks, and random form tokens.

pub mod gate;

use std::sync::OnceLock;

use rand::RngCore;
use regex::Regex;
use url::Url;

pub use gate::SubmissionGate;

/// Escape the five HTML-significant characters.
///
/// Not idempotent: escaping twice double-escapes `&`.
pub fn escape_special_chars(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text for use as an HTML text node. Quotes are left alone.
pub fn sanitize_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attr(input: &str) -> String {
    input.replace('"', "&quot;")
}

/// True for well-formed `http` and `https` URLs only.
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// 32 random bytes as lowercase hex.
pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape_special_chars("A & B"), "A &amp; B");
        assert_eq!(escape_special_chars("<script>"), "&lt;script&gt;");
        assert_eq!(
            escape_special_chars("He said \"Hi\""),
            "He said &quot;Hi&quot;"
        );
        assert_eq!(escape_special_chars("It's great"), "It&#039;s great");
    }

    #[test]
    fn test_escaped_output_has_no_raw_specials() {
        let inputs = [
            "<img src=x onerror=\"alert('xss')\">",
            "' OR '1'='1",
            "&&<<>>\"\"''",
            "plain text",
            "",
        ];
        for input in inputs {
            let escaped = escape_special_chars(input);
            let stripped = escaped
                .replace("&amp;", "")
                .replace("&lt;", "")
                .replace("&gt;", "")
                .replace("&quot;", "")
                .replace("&#039;", "");
            assert!(!stripped.contains(['<', '>', '&', '"', '\'']), "{input}");
        }
    }

    #[test]
    fn test_escape_twice_double_escapes() {
        let once = escape_special_chars("<b>");
        assert_eq!(escape_special_chars(&once), "&amp;lt;b&amp;gt;");
    }

    #[test]
    fn test_sanitize_html() {
        assert_eq!(sanitize_html("Hello World"), "Hello World");

        let sanitized = sanitize_html("<script>alert(\"xss\")</script>");
        assert!(!sanitized.contains("<script>"));
        assert!(sanitized.contains("&lt;"));
        assert!(sanitized.contains("&gt;"));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("a\" onload=\"x"), "a&quot; onload=&quot;x");
    }

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_url("https://github.com/aakash-01-1996"));
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://linkedin.com/in/aakashambodkar/"));
        assert!(is_valid_url("http://localhost:3000/projects"));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("javascript:alert(\"xss\")"));
        assert!(!is_valid_url("javascript:void(0)"));
        assert!(!is_valid_url("data:text/html,<script>alert(\"xss\")</script>"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url("/projects"));
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("contact@example.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("invalid.email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("test @example.com"));
        assert!(!is_valid_email("test@exa mple.com"));
        assert!(!is_valid_email("test@example.com\n"));
    }

    #[test]
    fn test_csrf_token_shape() {
        let token = generate_csrf_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_csrf_tokens_differ() {
        assert_ne!(generate_csrf_token(), generate_csrf_token());
    }
}
