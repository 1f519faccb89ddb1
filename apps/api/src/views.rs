//! Askama page models. Handlers build these from domain values; templates only read
//! fields.

use askama::Template;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Application, HeardAboutUs};
use crate::wizard::{catalog, Field, FormValues, Wizard, TOTAL_STEPS};

pub const SUBMIT_FAILED: &str = "Failed to submit application. Please try again.";
pub const UPLOAD_FAILED: &str = "Failed to upload file. Please try again.";

/// `%B %-d, %Y, %I:%M %p`, e.g. "March 5, 2025, 02:30 PM".
pub fn format_submitted(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y, %I:%M %p").to_string()
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessPage;

#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginPage;

// ────────────────────────────────────────────────────────────────────────────
// Wizard
// ────────────────────────────────────────────────────────────────────────────

pub struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub struct TechOption {
    pub name: &'static str,
    pub checked: bool,
}

pub struct TechGroup {
    pub category: &'static str,
    pub options: Vec<TechOption>,
}

/// Per-field messages, one slot per validated field.
#[derive(Default)]
pub struct FieldMessages {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub country: Option<&'static str>,
    pub heard_about_us: Option<&'static str>,
    pub heard_about_us_other: Option<&'static str>,
    pub motivation: Option<&'static str>,
    pub proud_project: Option<&'static str>,
    pub dream_project: Option<&'static str>,
}

impl FieldMessages {
    fn from_wizard(wizard: &Wizard) -> Self {
        Self {
            name: wizard.error_for(Field::Name),
            email: wizard.error_for(Field::Email),
            phone: wizard.error_for(Field::Phone),
            country: wizard.error_for(Field::Country),
            heard_about_us: wizard.error_for(Field::HeardAboutUs),
            heard_about_us_other: wizard.error_for(Field::HeardAboutUsOther),
            motivation: wizard.error_for(Field::Motivation),
            proud_project: wizard.error_for(Field::ProudProject),
            dream_project: wizard.error_for(Field::DreamProject),
        }
    }
}

fn step_heading(step: u8) -> (&'static str, &'static str) {
    match step {
        1 => (
            "Let's start with the basics",
            "Just a few details to get to know you",
        ),
        2 => ("Share your CV", "PDF or DOC format, please"),
        3 => (
            "What excites you most about building in tech?",
            "This is your chance to be cooler than you think you are.",
        ),
        4 => (
            "Tell us about your work",
            "Share your experiences and aspirations",
        ),
        5 => (
            "What technologies do you work with?",
            "Select the technologies you're familiar with (optional, but helpful)",
        ),
        _ => (
            "Where can we find your work?",
            "Links are optional, but they help us get to know you",
        ),
    }
}

/// Form keys rendered as visible inputs on a step; everything else rides along hidden.
fn editable_keys(step: u8) -> &'static [&'static str] {
    match step {
        1 => &[
            "name",
            "email",
            "phone",
            "country",
            "heardAboutUs",
            "heardAboutUsOther",
        ],
        3 => &["motivation"],
        4 => &["proudProject", "dreamProject"],
        6 => &["githubUrl", "linkedinUrl", "portfolioUrl"],
        _ => &[],
    }
}

#[derive(Template)]
#[template(path = "apply.html")]
pub struct ApplyPage {
    pub step: u8,
    pub total_steps: u8,
    pub progress_percent: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub is_first: bool,
    pub is_last: bool,
    pub values: FormValues,
    pub hidden: Vec<HiddenField>,
    pub hidden_technologies: Vec<String>,
    pub errors: FieldMessages,
    pub heard_options: Vec<SelectOption>,
    pub tech_groups: Vec<TechGroup>,
    pub selected_count: usize,
    pub upload_error: Option<String>,
    pub alert: Option<&'static str>,
}

impl ApplyPage {
    pub fn new(wizard: &Wizard) -> Self {
        let step = wizard.step();
        let values = wizard.values().clone();
        let (title, subtitle) = step_heading(step);

        let editable = editable_keys(step);
        let hidden = values
            .pairs()
            .into_iter()
            .filter(|(key, _)| !editable.contains(key))
            .map(|(name, value)| HiddenField { name, value })
            .collect();
        let hidden_technologies = if step == 5 {
            Vec::new()
        } else {
            values.technologies.clone()
        };

        let heard_options = HeardAboutUs::ALL
            .into_iter()
            .map(|option| SelectOption {
                value: option.as_str(),
                label: option.label(),
                selected: values.heard_about_us == option.as_str(),
            })
            .collect();

        let tech_groups = catalog::grouped()
            .into_iter()
            .map(|(category, names)| TechGroup {
                category,
                options: names
                    .into_iter()
                    .map(|name| TechOption {
                        name,
                        checked: values.technologies.iter().any(|t| t == name),
                    })
                    .collect(),
            })
            .collect();

        Self {
            step,
            total_steps: TOTAL_STEPS,
            progress_percent: u32::from(step) * 100 / u32::from(TOTAL_STEPS),
            title,
            subtitle,
            is_first: step == 1,
            is_last: wizard.is_terminal(),
            selected_count: values.technologies.len(),
            hidden,
            hidden_technologies,
            errors: FieldMessages::from_wizard(wizard),
            heard_options,
            tech_groups,
            values,
            upload_error: None,
            alert: None,
        }
    }

    pub fn with_upload_error(mut self, message: impl Into<String>) -> Self {
        self.upload_error = Some(message.into());
        self
    }

    pub fn with_alert(mut self, alert: &'static str) -> Self {
        self.alert = Some(alert);
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Admin
// ────────────────────────────────────────────────────────────────────────────

pub struct AdminRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cv_url: Option<String>,
    pub cv_file_name: String,
    pub status: &'static str,
    pub badge_class: &'static str,
    pub submitted: String,
    pub is_open: bool,
}

pub struct AdminDetail {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub heard_about_us: String,
    pub motivation: String,
    pub proud_project: String,
    pub dream_project: String,
    pub technologies: Vec<String>,
    pub cv_url: Option<String>,
    pub cv_file_name: String,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub status: &'static str,
    pub badge_class: &'static str,
    pub submitted: String,
}

impl From<&Application> for AdminDetail {
    fn from(app: &Application) -> Self {
        let d = &app.details;
        let heard_about_us = match (&d.heard_about_us, &d.heard_about_us_other) {
            (HeardAboutUs::Other, Some(other)) => format!("Other: {other}"),
            (source, _) => source.label().to_string(),
        };
        Self {
            name: d.name.clone(),
            email: d.email.clone(),
            phone: d.phone.clone(),
            country: d.country.clone(),
            heard_about_us,
            motivation: d.motivation.clone(),
            proud_project: d.proud_project.clone(),
            dream_project: d.dream_project.clone(),
            technologies: d.technologies.clone(),
            cv_url: d.cv_url.clone(),
            cv_file_name: d.cv_file_name.clone().unwrap_or_else(|| "CV".to_string()),
            github_url: d.github_url.clone(),
            linkedin_url: d.linkedin_url.clone(),
            portfolio_url: d.portfolio_url.clone(),
            status: app.status.as_str(),
            badge_class: app.status.badge_class(),
            submitted: format_submitted(&app.submitted_at),
        }
    }
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPage {
    pub username: String,
    pub count: usize,
    pub rows: Vec<AdminRow>,
    pub detail: Option<AdminDetail>,
}

impl AdminPage {
    /// `open` names the record whose detail panel is shown; unknown ids show none.
    pub fn new(username: String, applications: &[Application], open: Option<Uuid>) -> Self {
        let rows = applications
            .iter()
            .map(|app| AdminRow {
                id: app.id,
                name: app.details.name.clone(),
                email: app.details.email.clone(),
                phone: app.details.phone.clone(),
                cv_url: app.details.cv_url.clone(),
                cv_file_name: app
                    .details
                    .cv_file_name
                    .clone()
                    .unwrap_or_else(|| "CV".to_string()),
                status: app.status.as_str(),
                badge_class: app.status.badge_class(),
                submitted: format_submitted(&app.submitted_at),
                is_open: open == Some(app.id),
            })
            .collect();
        let detail = open
            .and_then(|id| applications.iter().find(|app| app.id == id))
            .map(AdminDetail::from);

        Self {
            username,
            count: applications.len(),
            rows,
            detail,
        }
    }
}
