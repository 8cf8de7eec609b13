//! Careers-page classification for raw search results.
//!
//! Everything here is heuristic. A link is accepted when it is not hosted by
//! a third-party job board and its URL carries a careers marker; the company
//! name is a best-effort guess from the hostname.

use url::Url;

use super::models::CareerLink;

/// Third-party job boards. Their listings are not company careers pages.
const JOB_BOARD_DOMAINS: [&str; 4] = ["linkedin.com", "naukri.com", "indeed.com", "glassdoor.com"];

/// URL fragments that mark a careers page
const CAREER_MARKERS: [&str; 4] = ["careers", "jobs", "join-us", "hiring"];

/// Hostname labels skipped when guessing the company name
const GENERIC_LABELS: [&str; 4] = ["com", "in", "org", "net"];

pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Classify a search result. Returns `None` when the link is rejected.
pub fn classify(url: &str, title: &str) -> Option<CareerLink> {
    if url.is_empty() || is_job_board(url) || !has_career_marker(url) {
        return None;
    }

    Some(CareerLink {
        company_name: company_name_from_url(url),
        job_title_from_search: title.trim().to_string(),
        career_url: url.to_string(),
    })
}

pub fn is_job_board(url: &str) -> bool {
    let url = url.to_lowercase();
    JOB_BOARD_DOMAINS.iter().any(|domain| url.contains(domain))
}

pub fn has_career_marker(url: &str) -> bool {
    let url = url.to_lowercase();
    CAREER_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Guess a display name for the company behind `url`.
///
/// Takes the first hostname label (after a leading `www.`) that is not a
/// generic TLD-like token, capitalized. Falls back to the first label, and to
/// `"Unknown"` when the URL has no parseable host.
pub fn company_name_from_url(url: &str) -> String {
    let host = match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => host,
        None => return UNKNOWN_COMPANY.to_string(),
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').collect();

    let label = labels
        .iter()
        .find(|label| !GENERIC_LABELS.contains(*label))
        .or_else(|| labels.first())
        .copied()
        .unwrap_or_default();

    if label.is_empty() {
        return UNKNOWN_COMPANY.to_string();
    }

    capitalize(label)
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
