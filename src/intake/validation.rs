use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use super::form::{CountryCodeChoice, IntakeForm};
use crate::models::catalog::{Console, RetroConsole, ShopCategory};
use crate::utils::{is_valid_email, normalize_email, validate_whatsapp_number};

/// Form fields in declaration order. Ordering decides which invalid field gets focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FullName,
    Email,
    WhatsappCountryCode,
    CustomCountryCode,
    WhatsappNumber,
    ShopCategories,
    SelectedConsoles,
    SelectedRetroConsoles,
    AcceptedTerms,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::FullName => "full_name",
            FormField::Email => "email",
            FormField::WhatsappCountryCode => "whatsapp_country_code",
            FormField::CustomCountryCode => "custom_country_code",
            FormField::WhatsappNumber => "whatsapp_number",
            FormField::ShopCategories => "shop_categories",
            FormField::SelectedConsoles => "selected_consoles",
            FormField::SelectedRetroConsoles => "selected_retro_consoles",
            FormField::AcceptedTerms => "accepted_terms",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Per-field validation failures, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: FormField, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
        self.0.sort_by_key(|e| e.field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// The field to scroll to and focus.
    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field.as_str(), e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// A form that passed validation, with normalized values ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProfile {
    pub full_name: String,
    pub email: Option<String>,
    pub whatsapp_country_code: String,
    pub custom_country_code: Option<String>,
    pub whatsapp_number: String,
    pub shop_categories: Vec<ShopCategory>,
    pub consoles: Vec<Console>,
    pub retro_consoles: Vec<RetroConsole>,
    pub terms_accepted: bool,
}

pub fn validate(form: &IntakeForm) -> Result<ValidProfile, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name_len = form.full_name.chars().count();
    if name_len < 2 {
        errors.push(FormField::FullName, "Name must be at least 2 characters");
    } else if name_len > 80 {
        errors.push(FormField::FullName, "Name must be less than 80 characters");
    }

    if !is_valid_email(&form.email) {
        errors.push(FormField::Email, "Please enter a valid email address");
    }

    if matches!(form.country_code(), CountryCodeChoice::Unselected) {
        errors.push(FormField::WhatsappCountryCode, "Country code is required");
    }

    if let Err(problem) = validate_whatsapp_number(form.whatsapp_number()) {
        errors.push(FormField::WhatsappNumber, problem.message());
    }

    let shop_categories = form.shop_categories();
    if shop_categories.is_empty() {
        errors.push(
            FormField::ShopCategories,
            "Please select at least one shopping category",
        );
    }

    if !form.accepted_terms {
        errors.push(
            FormField::AcceptedTerms,
            "You must accept the terms and conditions",
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidProfile {
        full_name: form.full_name.clone(),
        email: normalize_email(&form.email),
        whatsapp_country_code: form.country_code().value().to_string(),
        custom_country_code: form
            .country_code()
            .custom()
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        whatsapp_number: form.whatsapp_number().to_string(),
        shop_categories,
        consoles: form.selected_consoles(),
        retro_consoles: form.selected_retro_consoles(),
        terms_accepted: form.accepted_terms,
    })
}
