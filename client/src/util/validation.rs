//! Client-side form validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Forms call these before any request is issued. A validator either returns
//! the trimmed request body ready to send, or a message to show inline; an
//! `Err` means no network call happens.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::config::MIN_PASSWORD_LEN;
use crate::net::types::{AddressInput, LoginRequest, PasswordChangeRequest, ProfileUpdateRequest, RegisterRequest};

pub const LOGIN_FIELDS_REQUIRED: &str = "Enter both email and password.";
pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub const EMAIL_INVALID: &str = "Please provide a valid email.";
pub const PHONE_REQUIRED: &str = "Phone number is required.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const CURRENT_PASSWORD_REQUIRED: &str = "Current password is required.";
pub const PASSWORD_MISMATCH: &str = "New password and confirmation do not match.";
pub const NEW_PASSWORD_TOO_SHORT: &str = "New password must be at least 6 characters.";
pub const BIRTHDAY_INVALID: &str = "Birthday must be a date (YYYY-MM-DD).";
pub const ADDRESS_FIELDS_REQUIRED: &str = "Title, street, city, province, and post code are required.";
pub const QUANTITY_TOO_LOW: &str = "Quantity must be at least 1.";

/// Loose shape check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(raw: &str) -> bool {
    let email = raw.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

/// # Errors
///
/// Returns `LOGIN_FIELDS_REQUIRED` when either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(LOGIN_FIELDS_REQUIRED);
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

/// Raw registration form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// # Errors
///
/// Returns the first failing field's message, checked top to bottom in form
/// order.
pub fn validate_registration(form: &RegistrationForm) -> Result<RegisterRequest, &'static str> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    let email = form.email.trim();
    let phone = form.phone.trim();
    if first_name.is_empty() {
        return Err(FIRST_NAME_REQUIRED);
    }
    if last_name.is_empty() {
        return Err(LAST_NAME_REQUIRED);
    }
    if !is_valid_email(email) {
        return Err(EMAIL_INVALID);
    }
    if phone.is_empty() {
        return Err(PHONE_REQUIRED);
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    Ok(RegisterRequest {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
        password: form.password.clone(),
    })
}

/// # Errors
///
/// Returns a message when the current password is missing, the confirmation
/// does not match, or the new password is too short.
pub fn validate_password_change(
    current: &str,
    new_password: &str,
    confirm: &str,
) -> Result<PasswordChangeRequest, &'static str> {
    if current.is_empty() {
        return Err(CURRENT_PASSWORD_REQUIRED);
    }
    if new_password != confirm {
        return Err(PASSWORD_MISMATCH);
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(NEW_PASSWORD_TOO_SHORT);
    }
    Ok(PasswordChangeRequest { current_password: current.to_owned(), new_password: new_password.to_owned() })
}

/// Convert a `YYYY-MM-DD` date input into the RFC 3339 midnight-UTC
/// timestamp the profile endpoint expects. Blank input means "unset".
///
/// # Errors
///
/// Returns `BIRTHDAY_INVALID` for anything that is not a plausible date.
pub fn normalize_birthday(raw: &str) -> Result<Option<String>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = raw.split('T').next().unwrap_or(raw);
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(BIRTHDAY_INVALID);
    };
    let valid = year.len() == 4
        && month.len() == 2
        && day.len() == 2
        && year.parse::<u16>().is_ok()
        && month.parse::<u8>().is_ok_and(|m| (1..=12).contains(&m))
        && day.parse::<u8>().is_ok_and(|d| (1..=31).contains(&d));
    if !valid {
        return Err(BIRTHDAY_INVALID);
    }
    Ok(Some(format!("{date}T00:00:00Z")))
}

/// # Errors
///
/// Returns a message when a name is blank or the birthday is malformed.
pub fn validate_profile_update(
    first_name: &str,
    last_name: &str,
    phone: &str,
    birthday: &str,
) -> Result<ProfileUpdateRequest, &'static str> {
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    if first_name.is_empty() {
        return Err(FIRST_NAME_REQUIRED);
    }
    if last_name.is_empty() {
        return Err(LAST_NAME_REQUIRED);
    }
    Ok(ProfileUpdateRequest {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        phone: phone.trim().to_owned(),
        birthday: normalize_birthday(birthday)?,
    })
}

/// # Errors
///
/// Returns `ADDRESS_FIELDS_REQUIRED` when a mandatory field is blank.
pub fn validate_address(input: &AddressInput) -> Result<AddressInput, &'static str> {
    let trimmed = AddressInput {
        title: input.title.trim().to_owned(),
        street: input.street.trim().to_owned(),
        additional: input.additional.trim().to_owned(),
        district_city: input.district_city.trim().to_owned(),
        province: input.province.trim().to_owned(),
        post_code: input.post_code.trim().to_owned(),
        is_default: input.is_default,
    };
    let required = [&trimmed.title, &trimmed.street, &trimmed.district_city, &trimmed.province, &trimmed.post_code];
    if required.iter().any(|field| field.is_empty()) {
        return Err(ADDRESS_FIELDS_REQUIRED);
    }
    Ok(trimmed)
}

/// Parse a quantity input. Values below one are rejected.
///
/// # Errors
///
/// Returns `QUANTITY_TOO_LOW` for zero, negatives, or non-numbers.
pub fn parse_quantity(raw: &str) -> Result<u64, &'static str> {
    match raw.trim().parse::<u64>() {
        Ok(qty) if qty >= 1 => Ok(qty),
        _ => Err(QUANTITY_TOO_LOW),
    }
}
