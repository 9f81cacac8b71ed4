//! Verification policy configuration

use serde::Deserialize;
use std::collections::HashSet;

use crate::domain::verification::{
    DateInputPolicy, FieldStyle, FormField, BIRTHDATE_FIELD_ID, DEFAULT_MINIMUM_AGE,
    MAX_FIELD_LENGTH, MAX_SUPPLEMENTARY_FIELDS,
};

use super::error::ValidationError;

/// What happens to an applicant who is below the threshold
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnderageAction {
    /// Permanent removal
    #[default]
    Ban,
    /// Removal that allows rejoining
    Kick,
}

/// One operator-defined question shown after the birthdate
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SupplementaryFieldConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<u16>,
    #[serde(default)]
    pub max_length: Option<u16>,
    #[serde(default)]
    pub style: FieldStyle,
}

impl SupplementaryFieldConfig {
    pub fn to_form_field(&self) -> FormField {
        FormField {
            id: self.id.clone(),
            label: self.label.clone(),
            style: self.style,
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let id = self.id.trim();
        if id.is_empty() || id == BIRTHDATE_FIELD_ID {
            return Err(ValidationError::InvalidFieldId(self.id.clone()));
        }

        let within = |n: u16| (1..=MAX_FIELD_LENGTH).contains(&n);
        let min_ok = self.min_length.map_or(true, |n| n <= MAX_FIELD_LENGTH);
        let max_ok = self.max_length.map_or(true, within);
        let ordered = match (self.min_length, self.max_length) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        };
        if !(min_ok && max_ok && ordered) {
            return Err(ValidationError::InvalidFieldLength(self.id.clone()));
        }
        Ok(())
    }
}

/// Verification policy
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// Inclusive age threshold in years
    #[serde(default = "default_minimum_age")]
    pub minimum_age: f64,

    /// Accept only zero-padded `DD/MM/YYYY`
    #[serde(default = "default_strict_dates")]
    pub strict_dates: bool,

    #[serde(default)]
    pub underage_action: UnderageAction,

    /// How long an issued form stays submittable
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// Title of the verification form
    #[serde(default = "default_form_title")]
    pub form_title: String,

    #[serde(default = "default_supplementary_fields")]
    pub supplementary_fields: Vec<SupplementaryFieldConfig>,
}

impl VerificationConfig {
    pub fn date_policy(&self) -> DateInputPolicy {
        if self.strict_dates {
            DateInputPolicy::Strict
        } else {
            DateInputPolicy::Lenient
        }
    }

    pub fn form_fields(&self) -> Vec<FormField> {
        self.supplementary_fields
            .iter()
            .map(SupplementaryFieldConfig::to_form_field)
            .collect()
    }

    /// Validate verification policy
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.minimum_age.is_finite() || !(1.0..=150.0).contains(&self.minimum_age) {
            return Err(ValidationError::InvalidMinimumAge);
        }
        if self.session_ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.supplementary_fields.len() > MAX_SUPPLEMENTARY_FIELDS {
            return Err(ValidationError::TooManySupplementaryFields(
                MAX_SUPPLEMENTARY_FIELDS,
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.supplementary_fields {
            field.validate()?;
            if !seen.insert(field.id.as_str()) {
                return Err(ValidationError::InvalidFieldId(field.id.clone()));
            }
        }
        Ok(())
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            minimum_age: default_minimum_age(),
            strict_dates: default_strict_dates(),
            underage_action: UnderageAction::default(),
            session_ttl_secs: default_session_ttl(),
            form_title: default_form_title(),
            supplementary_fields: default_supplementary_fields(),
        }
    }
}

fn default_minimum_age() -> f64 {
    DEFAULT_MINIMUM_AGE
}

fn default_strict_dates() -> bool {
    true
}

fn default_session_ttl() -> u64 {
    900
}

fn default_form_title() -> String {
    "Age Verification".to_string()
}

fn default_supplementary_fields() -> Vec<SupplementaryFieldConfig> {
    vec![SupplementaryFieldConfig {
        id: "how-find".to_string(),
        label: "How did you find our server?".to_string(),
        required: true,
        min_length: None,
        max_length: Some(1024),
        style: FieldStyle::Paragraph,
    }]
}
