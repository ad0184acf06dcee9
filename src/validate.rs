//! Input validation for each payload kind.
//!
//! Checks run in a fixed order and stop at the first failure: required fields
//! first, then format checks in field declaration order.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::ValidationError;
use crate::payload::{ContactPayload, EmailPayload, SmsPayload, TextPayload, UrlPayload, WifiPayload};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+0-9 \-()]+$").expect("valid phone regex"));

/// Contact phone fields, checked in this order.
const CONTACT_PHONE_FIELDS: [(&str, fn(&ContactPayload) -> &str); 4] = [
    ("mobile", contact_mobile),
    ("phone", contact_phone),
    ("workPhone", contact_work_phone),
    ("fax", contact_fax),
];

fn contact_mobile(c: &ContactPayload) -> &str {
    &c.mobile
}

fn contact_phone(c: &ContactPayload) -> &str {
    &c.phone
}

fn contact_work_phone(c: &ContactPayload) -> &str {
    &c.work_phone
}

fn contact_fax(c: &ContactPayload) -> &str {
    &c.fax
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// True when the input opens with `scheme://`, i.e. the `://` comes before
/// any path, query or fragment delimiter.
fn has_explicit_scheme(input: &str) -> bool {
    match input.find("://") {
        Some(pos) => !input[..pos].contains(|c: char| matches!(c, '/' | '?' | '#')),
        None => false,
    }
}

/// Splits a camelCase field name into words: `workPhone` becomes `work Phone`.
pub fn humanize_field_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Validates a website address and returns it in normalized absolute form.
///
/// Input without a scheme is retried once with `https://` in front, so
/// `example.com` becomes `https://example.com/`.
pub fn validate_url(payload: &UrlPayload) -> Result<String, ValidationError> {
    let input = payload.url.trim();
    if input.is_empty() {
        return Err(ValidationError::missing("url", "Please enter a URL"));
    }

    if let Ok(url) = Url::parse(input) {
        return Ok(url.into());
    }

    // An explicit scheme that failed to parse will not be rescued by another one.
    if !has_explicit_scheme(input) {
        if let Ok(url) = Url::parse(&format!("https://{input}")) {
            return Ok(url.into());
        }
    }

    Err(ValidationError::invalid(
        "url",
        "Please enter a valid website URL",
    ))
}

pub fn validate_contact(payload: &ContactPayload) -> Result<(), ValidationError> {
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(ValidationError::missing(
            "firstName",
            "Please enter first and last name",
        ));
    }

    let email = payload.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        return Err(ValidationError::invalid(
            "email",
            "Please enter a valid email address",
        ));
    }

    for (field, get) in CONTACT_PHONE_FIELDS {
        let value = get(payload).trim();
        if !value.is_empty() && !is_valid_phone(value) {
            return Err(ValidationError::invalid(
                field,
                format!("Please enter a valid {} number", humanize_field_name(field)),
            ));
        }
    }

    Ok(())
}

pub fn validate_email(payload: &EmailPayload) -> Result<(), ValidationError> {
    let email = payload.email.trim();
    if email.is_empty() {
        return Err(ValidationError::missing(
            "email",
            "Please enter an email address",
        ));
    }
    if !is_valid_email(email) {
        return Err(ValidationError::invalid(
            "email",
            "Please enter a valid email address",
        ));
    }
    Ok(())
}

pub fn validate_sms(payload: &SmsPayload) -> Result<(), ValidationError> {
    let phone = payload.phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::missing("phone", "Please enter a phone number"));
    }
    if !is_valid_phone(phone) {
        return Err(ValidationError::invalid(
            "phone",
            "Please enter a valid phone number",
        ));
    }
    Ok(())
}

pub fn validate_text(payload: &TextPayload) -> Result<(), ValidationError> {
    if payload.text.trim().is_empty() {
        return Err(ValidationError::missing("text", "Please enter some text"));
    }
    Ok(())
}

pub fn validate_wifi(payload: &WifiPayload) -> Result<(), ValidationError> {
    if payload.ssid.trim().is_empty() {
        return Err(ValidationError::missing(
            "ssid",
            "Please enter a network name (SSID)",
        ));
    }
    if payload.encryption.requires_password() && payload.password.is_empty() {
        return Err(ValidationError::missing("password", "Please enter a password"));
    }
    Ok(())
}
