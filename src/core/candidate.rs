use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Gender choice stored with each candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Single-letter storage code
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
        }
    }

    /// Parse a storage code. Codes are case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            "O" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A stored candidate record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// Storage-assigned identifier
    pub id: i64,

    /// Full name, space-separated parts
    pub name: String,

    pub age: u8,

    pub gender: Gender,

    /// Always stored lower-cased
    pub email: String,

    /// Exactly ten digits
    pub phone_number: String,
}

impl Candidate {
    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        format!("{} (#{})", self.name, self.id)
    }

    /// Apply an already-validated update on top of this record
    pub fn merged(&self, update: ValidCandidateUpdate) -> Candidate {
        Candidate {
            id: self.id,
            name: update.name.unwrap_or_else(|| self.name.clone()),
            age: update.age.unwrap_or(self.age),
            gender: update.gender.unwrap_or(self.gender),
            email: update.email.unwrap_or_else(|| self.email.clone()),
            phone_number: update.phone_number.unwrap_or_else(|| self.phone_number.clone()),
        }
    }
}

/// Age as it arrives on the wire: integer, float or numeric string.
///
/// Any other JSON value lands in `Other` so that it is rejected by
/// validation instead of by the body decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl AgeInput {
    /// Integral value, if the input denotes one
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AgeInput::Int(i) => Some(*i),
            AgeInput::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            AgeInput::Float(_) => None,
            AgeInput::Text(s) => s.trim().parse::<i64>().ok(),
            AgeInput::Other(_) => None,
        }
    }
}

/// Free-text field as it arrives on the wire.
///
/// Numbers are accepted and read as their decimal text; anything else is
/// kept in `Other` and reported as a field error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl TextInput {
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            TextInput::Text(s) => Some(Cow::Borrowed(s)),
            TextInput::Number(n) => Some(Cow::Owned(n.to_string())),
            TextInput::Other(_) => None,
        }
    }
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        TextInput::Text(value.to_string())
    }
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        TextInput::Text(value)
    }
}

/// Create payload. Fields are optional so that a missing field is reported
/// as a validation message rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCandidate {
    #[serde(default)]
    pub name: Option<TextInput>,
    #[serde(default)]
    pub age: Option<AgeInput>,
    #[serde(default)]
    pub gender: Option<TextInput>,
    #[serde(default)]
    pub email: Option<TextInput>,
    #[serde(default)]
    pub phone_number: Option<TextInput>,
}

impl NewCandidate {
    /// Convenience constructor with every field present
    pub fn new(
        name: impl Into<String>,
        age: i64,
        gender: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(TextInput::Text(name.into())),
            age: Some(AgeInput::Int(age)),
            gender: Some(TextInput::Text(gender.into())),
            email: Some(TextInput::Text(email.into())),
            phone_number: Some(TextInput::Text(phone_number.into())),
        }
    }
}

/// Update payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateUpdate {
    #[serde(default)]
    pub name: Option<TextInput>,
    #[serde(default)]
    pub age: Option<AgeInput>,
    #[serde(default)]
    pub gender: Option<TextInput>,
    #[serde(default)]
    pub email: Option<TextInput>,
    #[serde(default)]
    pub phone_number: Option<TextInput>,
}

/// Fully validated create payload, ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCandidate {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub email: String,
    pub phone_number: String,
}

/// Validated update payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidCandidateUpdate {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code("F"), Some(Gender::Female));
        assert_eq!(Gender::from_code("f"), None);
        assert_eq!(Gender::Other.code(), "O");
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"M\"");
    }

    #[test]
    fn test_age_input_variants() {
        let age: AgeInput = serde_json::from_str("30").unwrap();
        assert_eq!(age.as_integer(), Some(30));

        let age: AgeInput = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(age.as_integer(), Some(42));

        let age: AgeInput = serde_json::from_str("30.0").unwrap();
        assert_eq!(age.as_integer(), Some(30));

        let age: AgeInput = serde_json::from_str("30.5").unwrap();
        assert_eq!(age.as_integer(), None);

        let age: AgeInput = serde_json::from_str("\"thirty\"").unwrap();
        assert_eq!(age.as_integer(), None);

        let age: AgeInput = serde_json::from_str("true").unwrap();
        assert_eq!(age, AgeInput::Other(serde_json::Value::Bool(true)));
        assert_eq!(age.as_integer(), None);

        let age: AgeInput = serde_json::from_str("[30]").unwrap();
        assert_eq!(age.as_integer(), None);
    }

    #[test]
    fn test_text_input_variants() {
        let text: TextInput = serde_json::from_str("\"Ann Lee\"").unwrap();
        assert_eq!(text.as_text().as_deref(), Some("Ann Lee"));

        let text: TextInput = serde_json::from_str("123").unwrap();
        assert_eq!(text.as_text().as_deref(), Some("123"));

        let text: TextInput = serde_json::from_str("{\"first\": \"Ann\"}").unwrap();
        assert_eq!(text.as_text(), None);
    }

    #[test]
    fn test_new_candidate_missing_fields() {
        let payload: NewCandidate = serde_json::from_str(r#"{"name": "Ann Lee"}"#).unwrap();
        assert_eq!(payload.name, Some(TextInput::from("Ann Lee")));
        assert!(payload.age.is_none());
        assert!(payload.email.is_none());
    }

    #[test]
    fn test_merged_keeps_untouched_fields() {
        let candidate = Candidate {
            id: 7,
            name: "Ann Lee".into(),
            age: 30,
            gender: Gender::Female,
            email: "ann@example.com".into(),
            phone_number: "0123456789".into(),
        };
        let merged = candidate.merged(ValidCandidateUpdate {
            age: Some(31),
            ..Default::default()
        });
        assert_eq!(merged.age, 31);
        assert_eq!(merged.name, "Ann Lee");
        assert_eq!(merged.id, 7);
    }
}
