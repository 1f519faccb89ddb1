//! Application wizard: a linear six-step state machine over one shared set of form values.
//!
//! Steps: 1 basic info, 2 CV upload, 3 motivation, 4 insight, 5 technologies, 6 links.
//! `next` is gated by the step's required fields, `prev` never is, and `submit` is only
//! reachable from the last step.

pub mod catalog;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::models::{normalize_technologies, HeardAboutUs, NewApplication};
pub use validation::{Field, FieldError};

pub const FIRST_STEP: u8 = 1;
pub const TOTAL_STEPS: u8 = 6;

/// Accumulated answers. Text fields stay as raw strings until submission so that a
/// half-filled form survives step changes unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub heard_about_us: String,
    pub heard_about_us_other: String,
    pub cv_url: Option<String>,
    pub cv_file_name: Option<String>,
    pub motivation: String,
    pub proud_project: String,
    pub dream_project: String,
    pub technologies: Vec<String>,
    pub github_url: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
}

impl FormValues {
    /// Stores a single-valued field by its form key. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "name" => self.name = value,
            "email" => self.email = value.trim().to_string(),
            "phone" => self.phone = value,
            "country" => self.country = value,
            "heardAboutUs" => self.heard_about_us = value.trim().to_string(),
            "heardAboutUsOther" => self.heard_about_us_other = value,
            "cvUrl" => self.cv_url = non_empty(&value),
            "cvFileName" => self.cv_file_name = non_empty(&value),
            "motivation" => self.motivation = value,
            "proudProject" => self.proud_project = value,
            "dreamProject" => self.dream_project = value,
            "githubUrl" => self.github_url = value,
            "linkedinUrl" => self.linkedin_url = value,
            "portfolioUrl" => self.portfolio_url = value,
            _ => return false,
        }
        true
    }

    /// Every single-valued field as `(key, value)`, skipping unset CV fields.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("country", self.country.clone()),
            ("heardAboutUs", self.heard_about_us.clone()),
            ("heardAboutUsOther", self.heard_about_us_other.clone()),
            ("motivation", self.motivation.clone()),
            ("proudProject", self.proud_project.clone()),
            ("dreamProject", self.dream_project.clone()),
            ("githubUrl", self.github_url.clone()),
            ("linkedinUrl", self.linkedin_url.clone()),
            ("portfolioUrl", self.portfolio_url.clone()),
        ];
        if let (Some(url), Some(file_name)) = (&self.cv_url, &self.cv_file_name) {
            pairs.push(("cvUrl", url.clone()));
            pairs.push(("cvFileName", file_name.clone()));
        }
        pairs
    }

    pub fn toggle_technology(&mut self, tech: &str) {
        if let Some(pos) = self.technologies.iter().position(|t| t == tech) {
            self.technologies.remove(pos);
        } else {
            self.technologies.push(tech.to_string());
        }
    }

    /// URL and filename are only ever set together.
    pub fn attach_cv(&mut self, url: String, file_name: String) {
        self.cv_url = Some(url);
        self.cv_file_name = Some(file_name);
    }

    pub fn clear_cv(&mut self) {
        self.cv_url = None;
        self.cv_file_name = None;
    }

    /// Validates every step and builds the submission payload.
    pub fn to_new_application(&self) -> Result<NewApplication, Vec<FieldError>> {
        let errors: Vec<FieldError> = (FIRST_STEP..=TOTAL_STEPS)
            .flat_map(|step| validation::validate_step(step, self))
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let heard_about_us: HeardAboutUs = self.heard_about_us.parse().map_err(|_| {
            vec![FieldError {
                field: Field::HeardAboutUs,
                message: "Please tell us how you heard about us",
            }]
        })?;
        let heard_about_us_other = match heard_about_us {
            HeardAboutUs::Other => non_empty(&self.heard_about_us_other),
            _ => None,
        };
        let (cv_url, cv_file_name) = match (&self.cv_url, &self.cv_file_name) {
            (Some(url), Some(name)) => (Some(url.clone()), Some(name.clone())),
            _ => (None, None),
        };

        Ok(NewApplication {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            country: self.country.trim().to_string(),
            heard_about_us,
            heard_about_us_other,
            cv_url,
            cv_file_name,
            motivation: self.motivation.trim().to_string(),
            proud_project: self.proud_project.trim().to_string(),
            dream_project: self.dream_project.trim().to_string(),
            technologies: normalize_technologies(self.technologies.clone()),
            github_url: non_empty(&self.github_url),
            linkedin_url: non_empty(&self.linkedin_url),
            portfolio_url: non_empty(&self.portfolio_url),
        })
    }
}

impl From<&NewApplication> for FormValues {
    fn from(app: &NewApplication) -> Self {
        FormValues {
            name: app.name.clone(),
            email: app.email.clone(),
            phone: app.phone.clone(),
            country: app.country.clone(),
            heard_about_us: app.heard_about_us.as_str().to_string(),
            heard_about_us_other: app.heard_about_us_other.clone().unwrap_or_default(),
            cv_url: app.cv_url.clone(),
            cv_file_name: app.cv_file_name.clone(),
            motivation: app.motivation.clone(),
            proud_project: app.proud_project.clone(),
            dream_project: app.dream_project.clone(),
            technologies: app.technologies.clone(),
            github_url: app.github_url.clone().unwrap_or_default(),
            linkedin_url: app.linkedin_url.clone().unwrap_or_default(),
            portfolio_url: app.portfolio_url.clone().unwrap_or_default(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced(u8),
    Retreated(u8),
    Blocked,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("submit is only available on the last step")]
    NotTerminal,
    #[error("step {step} has invalid fields")]
    Invalid { step: u8 },
}

#[derive(Debug, Clone)]
pub struct Wizard {
    step: u8,
    values: FormValues,
    errors: Vec<FieldError>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::resume(FIRST_STEP, FormValues::default())
    }

    /// Rebuilds a wizard from a rendered page; out-of-range steps are clamped.
    pub fn resume(step: u8, values: FormValues) -> Self {
        Self {
            step: step.clamp(FIRST_STEP, TOTAL_STEPS),
            values,
            errors: Vec::new(),
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_terminal(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut FormValues {
        &mut self.values
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn next(&mut self) -> Transition {
        self.errors = validation::validate_step(self.step, &self.values);
        if !self.errors.is_empty() {
            return Transition::Blocked;
        }
        if self.step < TOTAL_STEPS {
            self.step += 1;
            Transition::Advanced(self.step)
        } else {
            Transition::Unchanged
        }
    }

    pub fn prev(&mut self) -> Transition {
        self.errors.clear();
        if self.step > FIRST_STEP {
            self.step -= 1;
            Transition::Retreated(self.step)
        } else {
            Transition::Unchanged
        }
    }

    /// Re-checks every step. On failure the wizard jumps to the first failing step and
    /// carries that step's errors.
    pub fn submit(&mut self) -> Result<NewApplication, SubmitBlocked> {
        if !self.is_terminal() {
            return Err(SubmitBlocked::NotTerminal);
        }
        for step in FIRST_STEP..=TOTAL_STEPS {
            let errors = validation::validate_step(step, &self.values);
            if !errors.is_empty() {
                self.step = step;
                self.errors = errors;
                return Err(SubmitBlocked::Invalid { step });
            }
        }
        self.errors.clear();
        self.values.to_new_application().map_err(|errors| {
            self.errors = errors;
            SubmitBlocked::Invalid { step: FIRST_STEP }
        })
    }
}
