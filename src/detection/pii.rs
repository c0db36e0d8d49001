//! PII detection for submitted content.
//!
//! Format-based recognition of:
//! - Email addresses
//! - Credit card numbers
//! - National ID numbers (SSN-shaped)
//! - Phone numbers
//! - IPv4 addresses
//!
//! Matched values never leave this module; callers only see types and counts.

use lazy_static::lazy_static;
use regex::{Captures, Match, Regex};

use crate::logging::structured::LogContext;
use crate::models::findings::{PiiFinding, PiiSummary, PiiType};

lazy_static! {
    /// Addresses like `name@host.tld`
    static ref EMAIL_PATTERN: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    /// 16-digit card numbers, optionally grouped by four
    static ref CC_PATTERN: Regex = Regex::new(
        r"\b(?:\d{4}[-\s]?){3}\d{4}\b"
    ).unwrap();

    /// National ID pattern (US SSN layout)
    static ref NATIONAL_ID_PATTERN: Regex = Regex::new(
        r"\b\d{3}-\d{2}-\d{4}\b"
    ).unwrap();

    /// NANP phone numbers with optional country code
    static ref PHONE_PATTERN: Regex = Regex::new(
        r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}"
    ).unwrap();

    /// Dotted-quad IPv4 addresses
    static ref IP_PATTERN: Regex = Regex::new(
        r"\b(?:\d{1,3}\.){3}\d{1,3}\b"
    ).unwrap();

    /// Detection order. Each pass runs on the output of the previous one, so
    /// a digit run claimed by a card number is not counted again as a phone.
    static ref DETECTION_ORDER: Vec<(PiiType, &'static Regex)> = vec![
        (PiiType::Email, &*EMAIL_PATTERN),
        (PiiType::CreditCard, &*CC_PATTERN),
        (PiiType::NationalId, &*NATIONAL_ID_PATTERN),
        (PiiType::Phone, &*PHONE_PATTERN),
        (PiiType::IpAddress, &*IP_PATTERN),
    ];
}

/// Numeric values must stand alone; a slice of a longer digit run (order
/// numbers, tracking codes) is not PII.
fn touches_digit(haystack: &str, m: &Match<'_>) -> bool {
    let before = haystack[..m.start()].chars().next_back();
    let after = haystack[m.end()..].chars().next();
    before.map_or(false, |c| c.is_ascii_digit()) || after.map_or(false, |c| c.is_ascii_digit())
}

/// Detect PII in `text`, returning only types and counts.
pub fn detect_pii(text: &str, ctx: &LogContext) -> PiiSummary {
    let (_, summary) = redact_pii(text, ctx);
    summary
}

/// Replace every PII instance with a placeholder token like `[EMAIL]`.
pub fn redact_pii(text: &str, ctx: &LogContext) -> (String, PiiSummary) {
    log::debug!("{} PII_SCAN_START", ctx);

    let mut redacted = text.to_string();
    let mut findings = Vec::new();

    for (pii_type, pattern) in DETECTION_ORDER.iter() {
        let accept = |m: &Match<'_>| *pii_type == PiiType::Email || !touches_digit(&redacted, m);
        let count = pattern.find_iter(&redacted).filter(|m| accept(m)).count();
        if count > 0 {
            redacted = pattern
                .replace_all(&redacted, |caps: &Captures<'_>| match caps.get(0) {
                    Some(m) if accept(&m) => pii_type.placeholder().to_string(),
                    Some(m) => m.as_str().to_string(),
                    None => String::new(),
                })
                .into_owned();
            findings.push(PiiFinding {
                pii_type: *pii_type,
                count,
            });
        }
    }

    let summary = PiiSummary::from_findings(findings);

    if summary.is_empty() {
        log::debug!("{} PII_SCAN_COMPLETE entities_found=0", ctx);
    } else {
        log::info!(
            "{} PII_DETECTED emails={} cards={} national_ids={} phones={} ips={} total={}",
            ctx,
            summary.count_of(PiiType::Email),
            summary.count_of(PiiType::CreditCard),
            summary.count_of(PiiType::NationalId),
            summary.count_of(PiiType::Phone),
            summary.count_of(PiiType::IpAddress),
            summary.total_count
        );
    }

    (redacted, summary)
}
