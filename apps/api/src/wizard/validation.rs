use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::models::HeardAboutUs;
use crate::wizard::FormValues;

pub const MOTIVATION_MIN_CHARS: usize = 50;
pub const INSIGHT_MIN_CHARS: usize = 30;

/// Fields that carry a validation rule. Optional fields (links, CV, technologies) are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Country,
    HeardAboutUs,
    HeardAboutUsOther,
    Motivation,
    ProudProject,
    DreamProject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value.trim())
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn long_enough(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Required fields for a wizard step. Step 1 adds `heardAboutUsOther` when
/// `heardAboutUs` is `other`; steps 2, 5 and 6 have none.
pub fn required_fields(step: u8, values: &FormValues) -> Vec<Field> {
    match step {
        1 => {
            let mut fields = vec![
                Field::Name,
                Field::Email,
                Field::Phone,
                Field::Country,
                Field::HeardAboutUs,
            ];
            if values.heard_about_us == HeardAboutUs::Other.as_str() {
                fields.push(Field::HeardAboutUsOther);
            }
            fields
        }
        3 => vec![Field::Motivation],
        4 => vec![Field::ProudProject, Field::DreamProject],
        _ => Vec::new(),
    }
}

/// Checks one field, returning the message shown next to it on failure.
pub fn validate_field(field: Field, values: &FormValues) -> Option<&'static str> {
    match field {
        Field::Name => (!present(&values.name)).then_some("Name is required"),
        Field::Email => {
            if !present(&values.email) {
                Some("Email is required")
            } else if !is_valid_email(&values.email) {
                Some("Invalid email address")
            } else {
                None
            }
        }
        Field::Phone => (!present(&values.phone)).then_some("Phone number is required"),
        Field::Country => (!present(&values.country)).then_some("Please select your country"),
        Field::HeardAboutUs => values
            .heard_about_us
            .trim()
            .parse::<HeardAboutUs>()
            .is_err()
            .then_some("Please tell us how you heard about us"),
        Field::HeardAboutUsOther => (values.heard_about_us == HeardAboutUs::Other.as_str()
            && !present(&values.heard_about_us_other))
        .then_some("Please specify how you heard about us"),
        Field::Motivation => {
            if !present(&values.motivation) {
                Some("Please share what motivates you")
            } else if !long_enough(&values.motivation, MOTIVATION_MIN_CHARS) {
                Some("Please provide a more detailed response (at least 50 characters)")
            } else {
                None
            }
        }
        Field::ProudProject | Field::DreamProject => {
            let value = if field == Field::ProudProject {
                &values.proud_project
            } else {
                &values.dream_project
            };
            if !present(value) {
                Some("Please provide an answer")
            } else if !long_enough(value, INSIGHT_MIN_CHARS) {
                Some("Please provide a more detailed response (at least 30 characters)")
            } else {
                None
            }
        }
    }
}

/// Validates every required field of a step, collecting all failures.
pub fn validate_step(step: u8, values: &FormValues) -> Vec<FieldError> {
    required_fields(step, values)
        .into_iter()
        .filter_map(|field| validate_field(field, values).map(|message| FieldError { field, message }))
        .collect()
}
