use regex::Regex;
use std::sync::OnceLock;

use super::ApiError;
use crate::constants::limits;

const MAX_DOMAIN_LENGTH: usize = 253;

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$")
            .expect("Invalid regex pattern defined in code")
    })
}

/// Returns the lowercased domain when it is a dotted hostname.
pub fn validate_domain(domain: &str) -> Result<String, ApiError> {
    let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();

    if domain.is_empty() {
        return Err(ApiError::validation("Domain cannot be empty"));
    }

    if domain.len() > MAX_DOMAIN_LENGTH || !domain_regex().is_match(&domain) {
        return Err(ApiError::validation(format!(
            "Invalid domain: '{domain}'. Expected a hostname such as example.com"
        )));
    }

    Ok(domain)
}

pub fn validate_query<'a>(field: &str, query: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > limits::MAX_QUERY_LENGTH {
        return Err(ApiError::validation(format!(
            "{field} must be {} characters or less",
            limits::MAX_QUERY_LENGTH
        )));
    }
    Ok(trimmed)
}

pub fn validate_phone(phone: &str) -> Result<&str, ApiError> {
    const MIN_DIGITS: usize = 7;
    const MAX_DIGITS: usize = 15;

    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Phone number cannot be empty"));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')' | '.'))
    {
        return Err(ApiError::validation(
            "Phone number can only contain digits, spaces, and + - ( ) .",
        ));
    }

    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return Err(ApiError::validation(format!(
            "Phone number must have between {MIN_DIGITS} and {MAX_DIGITS} digits"
        )));
    }

    Ok(trimmed)
}

/// Accepts absolute http(s) URLs only.
pub fn validate_image_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("No image URL provided"));
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| ApiError::validation(format!("Invalid image URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::validation(
            "Image URL must use http or https",
        ));
    }

    Ok(parsed.to_string())
}
