//! Risk scoring
//!
//! Five fixed rules evaluated in a fixed order. Each triggered rule adds its
//! contribution to the score and one reason string to the explanation list;
//! the order only affects how reasons are presented, not the sum.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::download::DownloadDescriptor;
use crate::history::{safe_download_count, HistoryEntry};

/// Scores at or above this are intercepted.
pub const RISK_THRESHOLD: i32 = 50;

/// Declared sizes below this (and above zero) look suspicious.
const SMALL_PAYLOAD_BYTES: u64 = 100_000;

/// Executable, script and archive extensions that warrant extra scrutiny.
const DANGEROUS_EXTENSIONS: &[&str] = &[
    ".exe", ".msi", ".bat", ".cmd", ".vbs", ".js", ".jar", ".scr", ".dll", ".pif", ".com", ".ps1",
    ".reg", ".vb", ".vbe", ".wsf", ".zip", ".rar", ".7z", ".iso",
];

/// Heuristic URL shapes: shortener hosts, generic download/share/cloud
/// subdomain prefixes, long labels under `.top`, and URLs ending in `.xyz`
/// or `.info`. Matched against the full URL string.
static SUSPICIOUS_URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"bit\.ly",
        r"tinyurl\.com",
        r"free\.host",
        r"download\d*\.",
        r"[\w-]{10,}\.top",
        r"\.xyz$",
        r"\.info$",
        r"cloud\d*\.",
        r"share\d*\.",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("suspicious URL pattern compiles"))
    .collect()
});

const REASON_DANGEROUS_EXTENSION: &str = "File type is potentially dangerous";
const REASON_UNTRUSTED_DOMAIN: &str = "Domain is not in your trusted list";
const REASON_SUSPICIOUS_URL: &str = "URL matches a suspicious pattern";
const REASON_SMALL_PAYLOAD: &str = "File size is unusually small";
const REASON_DOMAIN_REPUTATION: &str = "Domain frequently used for safe downloads";

/// Case-insensitive suffix match against the extension denylist.
pub fn has_dangerous_extension(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    DANGEROUS_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn is_suspicious_url(url: &str) -> bool {
    SUSPICIOUS_URL_PATTERNS.iter().any(|p| p.is_match(url))
}

/// Outcome of one assessment. Never stored; the score is signed and
/// unclamped, so mitigations can drive it below the sum of penalties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: i32,
    pub reasons: Vec<String>,
}

impl RiskAssessment {
    pub fn requires_interception(&self) -> bool {
        self.score >= RISK_THRESHOLD
    }
}

/// Scores one download against whitelist and history snapshots.
///
/// Pure and deterministic: same inputs, same score and reason list. `domain`
/// is the already-extracted hostname of the source URL; callers abandon the
/// event before scoring when extraction fails.
pub fn assess(
    descriptor: &DownloadDescriptor,
    domain: &str,
    trusted: &HashSet<String>,
    history: &[HistoryEntry],
) -> RiskAssessment {
    let mut score = 0;
    let mut reasons = Vec::new();

    if has_dangerous_extension(&descriptor.file_name) {
        score += 20;
        reasons.push(REASON_DANGEROUS_EXTENSION.to_string());
    }

    if !trusted.contains(domain) {
        score += 30;
        reasons.push(REASON_UNTRUSTED_DOMAIN.to_string());
    }

    if is_suspicious_url(&descriptor.url) {
        score += 20;
        reasons.push(REASON_SUSPICIOUS_URL.to_string());
    }

    if matches!(descriptor.total_bytes, Some(size) if size > 0 && size < SMALL_PAYLOAD_BYTES) {
        score += 20;
        reasons.push(REASON_SMALL_PAYLOAD.to_string());
    }

    if safe_download_count(history, domain) > 2 {
        score -= 20;
        reasons.push(REASON_DOMAIN_REPUTATION.to_string());
    }

    RiskAssessment { score, reasons }
}
