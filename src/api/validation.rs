use regex::Regex;
use std::sync::OnceLock;

use super::{ApiError, SurveyRequest};
use crate::constants::limits;
use crate::models::submission::NewSubmission;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"))
}

fn require_non_empty(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn check_free_text(value: Option<String>, field: &str) -> Result<Option<String>, ApiError> {
    match value {
        Some(text) => {
            if text.chars().count() > limits::MAX_FREE_TEXT_LEN {
                return Err(ApiError::validation(format!(
                    "{} must be {} characters or less",
                    field,
                    limits::MAX_FREE_TEXT_LEN
                )));
            }
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        None => Ok(None),
    }
}

/// Validates a raw survey payload into a `NewSubmission`.
///
/// The email is normalized to lowercase here so every later comparison
/// (duplicate checks, the unique assignment index) sees one canonical form.
pub fn validate_survey(request: SurveyRequest) -> Result<NewSubmission, ApiError> {
    let name = require_non_empty(&request.name, "Name")?;
    if name.chars().count() > limits::MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "Name must be {} characters or less",
            limits::MAX_NAME_LEN
        )));
    }

    let email = require_non_empty(&request.email, "Email")?.to_lowercase();
    if email.chars().count() > limits::MAX_EMAIL_LEN {
        return Err(ApiError::validation(format!(
            "Email must be {} characters or less",
            limits::MAX_EMAIL_LEN
        )));
    }
    if !email_regex().is_match(&email) {
        return Err(ApiError::validation("Email address is not valid"));
    }

    let age = require_non_empty(&request.age, "Age")?;
    let gender = require_non_empty(&request.gender, "Gender")?;
    let orientation = require_non_empty(&request.orientation, "Orientation")?;

    let identity: Vec<String> = request
        .identity
        .iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if identity.is_empty() {
        return Err(ApiError::validation(
            "At least one identity option must be selected",
        ));
    }

    let other_identity = check_free_text(request.other_identity, "Other identity")?;
    if identity.iter().any(|i| i.eq_ignore_ascii_case("other")) && other_identity.is_none() {
        return Err(ApiError::validation(
            "Other identity must be provided when 'other' is selected",
        ));
    }

    Ok(NewSubmission {
        name,
        email,
        contact: check_free_text(request.contact, "Contact")?,
        age,
        gender,
        orientation,
        ao3_content: check_free_text(request.ao3_content, "AO3 content")?,
        favorite_cp_tags: check_free_text(request.favorite_cp_tags, "Favorite CP tags")?,
        identity,
        other_identity,
        accept_follow_up: request.accept_follow_up,
    })
}

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    const MIN_LIMIT: u64 = 1;

    if !(MIN_LIMIT..=limits::MAX_LIST_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between {} and {}",
            limit,
            MIN_LIMIT,
            limits::MAX_LIST_LIMIT
        )));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SurveyRequest {
        SurveyRequest {
            name: "Xiao Li".to_string(),
            email: "Reader@Example.COM".to_string(),
            contact: None,
            age: "18-24".to_string(),
            gender: "female".to_string(),
            orientation: "bisexual".to_string(),
            ao3_content: Some("fluff, slow burn".to_string()),
            favorite_cp_tags: None,
            identity: vec!["reader".to_string()],
            other_identity: None,
            accept_follow_up: true,
        }
    }

    #[test]
    fn test_validate_survey_lowercases_email() {
        let submission = validate_survey(valid_request()).unwrap();
        assert_eq!(submission.email, "reader@example.com");
    }

    #[test]
    fn test_validate_survey_rejects_bad_email() {
        let mut request = valid_request();
        request.email = "not-an-email".to_string();
        assert!(validate_survey(request).is_err());

        let mut request = valid_request();
        request.email = "a b@example.com".to_string();
        assert!(validate_survey(request).is_err());
    }

    #[test]
    fn test_validate_survey_requires_name_and_demographics() {
        let mut request = valid_request();
        request.name = "   ".to_string();
        assert!(validate_survey(request).is_err());

        let mut request = valid_request();
        request.age = String::new();
        assert!(validate_survey(request).is_err());

        let mut request = valid_request();
        request.name = "x".repeat(101);
        assert!(validate_survey(request).is_err());
    }

    #[test]
    fn test_validate_survey_identity_rules() {
        let mut request = valid_request();
        request.identity = vec![];
        assert!(validate_survey(request).is_err());

        let mut request = valid_request();
        request.identity = vec!["other".to_string()];
        request.other_identity = None;
        assert!(validate_survey(request).is_err());

        let mut request = valid_request();
        request.identity = vec!["other".to_string()];
        request.other_identity = Some("artist".to_string());
        assert!(validate_survey(request).is_ok());
    }

    #[test]
    fn test_validate_survey_caps_free_text() {
        let mut request = valid_request();
        request.ao3_content = Some("x".repeat(2001));
        assert!(validate_survey(request).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(500).is_ok());
        assert!(validate_limit(1000).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1001).is_err());
    }
}
