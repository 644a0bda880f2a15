//! Input validation utilities
//!
//! Every function takes raw text as extracted by the HTTP layer and returns
//! the normalised value, or a [`DomainError::Validation`] carrying the
//! message shown to the user.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::error::{DomainError, DomainResult};
use crate::models::{Priority, TaskDraft};

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_TITLE_CHARS: usize = 3;

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a full name, returning it trimmed
pub fn validate_full_name(full_name: &str) -> DomainResult<String> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err(DomainError::validation("Nome completo é obrigatório!"));
    }

    Ok(full_name.to_string())
}

/// Validate an email, returning its normalised form
pub fn validate_email(email: &str) -> DomainResult<String> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(DomainError::validation("Email é obrigatório!"));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(&email) {
        return Err(DomainError::validation("Email inválido!"));
    }

    Ok(email)
}

/// Validate a `YYYY-MM-DD` birth date that lies before `now`
pub fn validate_birth_date(birth_date: &str, now: DateTime<Utc>) -> DomainResult<NaiveDate> {
    let invalid = || DomainError::validation("Data de nascimento inválida!");

    let date = NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc();
    if midnight >= now {
        return Err(invalid());
    }

    Ok(date)
}

/// Validate password length
pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(DomainError::validation(format!(
            "A senha deve ter pelo menos {MIN_PASSWORD_CHARS} caracteres!"
        )));
    }

    Ok(())
}

/// Validate a task title, returning it trimmed
pub fn validate_title(title: Option<&str>) -> DomainResult<String> {
    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(DomainError::validation("Título da tarefa é obrigatório!"));
    }

    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(DomainError::validation(format!(
            "Título deve ter pelo menos {MIN_TITLE_CHARS} caracteres!"
        )));
    }

    Ok(title.to_string())
}

/// Trim free-text detail; blank detail is absent
pub fn normalize_detail(detail: Option<&str>) -> Option<String> {
    detail
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}

/// Parse a priority, defaulting to low when missing or blank
pub fn parse_priority(priority: Option<&str>) -> DomainResult<Priority> {
    match priority.map(str::trim) {
        None | Some("") => Ok(Priority::default()),
        Some(priority) => priority.parse(),
    }
}

/// Validate the editable fields of a task
pub fn task_draft(
    title: Option<&str>,
    detail: Option<&str>,
    priority: Option<&str>,
) -> DomainResult<TaskDraft> {
    let title = validate_title(title)?;
    let priority = parse_priority(priority)?;

    Ok(TaskDraft {
        title,
        detail: normalize_detail(detail),
        priority,
    })
}
