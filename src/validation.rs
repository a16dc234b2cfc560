//! Field validation for candidate payloads.
//!
//! Each field rule is one method on [`Validator`]; the service runs every
//! rule for a payload and reports all failures together as
//! [`ValidationErrors`], keyed by field name.

use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{MAX_AGE, MIN_AGE, PHONE_DIGITS};
use crate::core::{
    AgeInput, CandidateUpdate, Gender, NewCandidate, TextInput, ValidCandidate,
    ValidCandidateUpdate,
};

/// Outcome of a single field rule; the error is the user-facing message
pub type FieldResult<T> = std::result::Result<T, String>;

/// Per-field rules applied before anything reaches the store
pub trait Validator: Send + Sync {
    /// Returns the trimmed name
    fn validate_name(&self, name: &str) -> FieldResult<String>;

    fn validate_age(&self, age: &AgeInput) -> FieldResult<u8>;

    fn validate_gender(&self, gender: &str) -> FieldResult<Gender>;

    /// Returns the normalized (trimmed, lower-cased) address
    fn validate_email(&self, email: &str) -> FieldResult<String>;

    fn validate_phone_number(&self, phone_number: &str) -> FieldResult<String>;
}

/// Field name → messages, serialized as `{"email": ["..."]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Record the error of `result` under `field`, keeping the value on success
    fn check<T>(&mut self, field: &str, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Default rule set
pub struct FieldRules {
    name_pattern: Regex,
    email_pattern: Regex,
    phone_pattern: Regex,
}

impl FieldRules {
    pub fn new() -> Self {
        Self {
            name_pattern: Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern"),
            email_pattern: Regex::new(
                r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
            )
            .expect("valid email pattern"),
            phone_pattern: Regex::new(&format!(r"^[0-9]{{{}}}$", PHONE_DIGITS))
                .expect("valid phone pattern"),
        }
    }
}

impl Default for FieldRules {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for FieldRules {
    fn validate_name(&self, name: &str) -> FieldResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        if !self.name_pattern.is_match(trimmed) {
            return Err("Name should contain only letters and spaces".to_string());
        }
        Ok(trimmed.to_string())
    }

    fn validate_age(&self, age: &AgeInput) -> FieldResult<u8> {
        let age = age
            .as_integer()
            .ok_or_else(|| "Age must be a valid integer".to_string())?;
        if age < MIN_AGE as i64 {
            return Err(format!("Age must be at least {}", MIN_AGE));
        }
        if age > MAX_AGE as i64 {
            return Err(format!("Age cannot be more than {}", MAX_AGE));
        }
        Ok(age as u8)
    }

    fn validate_gender(&self, gender: &str) -> FieldResult<Gender> {
        Gender::from_code(gender)
            .ok_or_else(|| "Gender must be one of: M (Male), F (Female), O (Other)".to_string())
    }

    fn validate_email(&self, email: &str) -> FieldResult<String> {
        let trimmed = email.trim();
        if !self.email_pattern.is_match(trimmed) {
            return Err("Please enter a valid email address".to_string());
        }
        Ok(trimmed.to_lowercase())
    }

    fn validate_phone_number(&self, phone_number: &str) -> FieldResult<String> {
        if !self.phone_pattern.is_match(phone_number) {
            return Err(format!("Phone number must be exactly {} digits", PHONE_DIGITS));
        }
        Ok(phone_number.to_string())
    }
}

fn required<T>(errors: &mut ValidationErrors, field: &str, label: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, format!("{} is required", label));
    }
    value
}

/// Text view of a string field; objects, arrays and booleans are a field error
fn text<'a>(errors: &mut ValidationErrors, field: &str, value: &'a TextInput) -> Option<Cow<'a, str>> {
    let text = value.as_text();
    if text.is_none() {
        errors.add(field, "Not a valid string.");
    }
    text
}

/// Run every rule over a create payload
pub fn validate_new(
    validator: &dyn Validator,
    payload: &NewCandidate,
) -> std::result::Result<ValidCandidate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required(&mut errors, "name", "Name", payload.name.as_ref())
        .and_then(|v| text(&mut errors, "name", v))
        .and_then(|v| errors.check("name", validator.validate_name(&v)));
    let age = required(&mut errors, "age", "Age", payload.age.as_ref())
        .and_then(|v| errors.check("age", validator.validate_age(v)));
    let gender = required(&mut errors, "gender", "Gender", payload.gender.as_ref())
        .and_then(|v| text(&mut errors, "gender", v))
        .and_then(|v| errors.check("gender", validator.validate_gender(&v)));
    let email = required(&mut errors, "email", "Email", payload.email.as_ref())
        .and_then(|v| text(&mut errors, "email", v))
        .and_then(|v| errors.check("email", validator.validate_email(&v)));
    let phone_number =
        required(&mut errors, "phone_number", "Phone number", payload.phone_number.as_ref())
            .and_then(|v| text(&mut errors, "phone_number", v))
            .and_then(|v| errors.check("phone_number", validator.validate_phone_number(&v)));

    match (name, age, gender, email, phone_number) {
        (Some(name), Some(age), Some(gender), Some(email), Some(phone_number)) if errors.is_empty() => {
            Ok(ValidCandidate {
                name,
                age,
                gender,
                email,
                phone_number,
            })
        }
        _ => Err(errors),
    }
}

/// Run the rules for the fields present in an update payload
pub fn validate_update(
    validator: &dyn Validator,
    payload: &CandidateUpdate,
) -> std::result::Result<ValidCandidateUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let update = ValidCandidateUpdate {
        name: payload
            .name
            .as_ref()
            .and_then(|v| text(&mut errors, "name", v))
            .and_then(|v| errors.check("name", validator.validate_name(&v))),
        age: payload
            .age
            .as_ref()
            .and_then(|v| errors.check("age", validator.validate_age(v))),
        gender: payload
            .gender
            .as_ref()
            .and_then(|v| text(&mut errors, "gender", v))
            .and_then(|v| errors.check("gender", validator.validate_gender(&v))),
        email: payload
            .email
            .as_ref()
            .and_then(|v| text(&mut errors, "email", v))
            .and_then(|v| errors.check("email", validator.validate_email(&v))),
        phone_number: payload
            .phone_number
            .as_ref()
            .and_then(|v| text(&mut errors, "phone_number", v))
            .and_then(|v| errors.check("phone_number", validator.validate_phone_number(&v))),
    };

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}
