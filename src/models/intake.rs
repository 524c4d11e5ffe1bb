use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::{
    Console, DIAL_CODES, OTHER_COUNTRY_CODE, OptionItem, RetroConsole, ShopCategory,
};
use crate::intake::IntakeForm;

/// Intake form values as posted by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct IntakeRequest {
    #[schema(example = "Ana Gomez")]
    pub full_name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "+1 (246)")]
    pub whatsapp_country_code: String,
    pub custom_country_code: Option<String>,
    #[schema(example = "555-1234")]
    pub whatsapp_number: String,
    pub shop_categories: Vec<ShopCategory>,
    pub selected_consoles: Vec<Console>,
    pub selected_retro_consoles: Vec<RetroConsole>,
    pub accepted_terms: bool,
}

impl IntakeRequest {
    /// Replays the posted values onto a fresh form, in field order, so the
    /// same visibility rules apply as for interactive editing. Retro picks
    /// without the "retro" console, and consoles without a category, are dropped.
    pub fn to_form(&self, home_country_code: &str) -> IntakeForm {
        let mut form = IntakeForm::new(home_country_code);
        form.full_name = self.full_name.clone();
        form.email = self.email.clone();
        form.select_country_code(&self.whatsapp_country_code);
        if let Some(custom) = &self.custom_country_code {
            form.set_custom_country_code(custom);
        }
        form.set_whatsapp_number(&self.whatsapp_number);

        for category in ShopCategory::ALL {
            form.set_category(category, self.shop_categories.contains(&category));
        }
        for console in &self.selected_consoles {
            form.set_console(*console, true);
        }
        for retro in &self.selected_retro_consoles {
            form.set_retro_console(*retro, true);
        }

        form.accepted_terms = self.accepted_terms;
        form
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntakeResponse {
    pub customer_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntakeOptionsResponse {
    pub country_codes: Vec<OptionItem>,
    pub default_country_code: String,
    pub other_country_code: String,
    pub shop_categories: Vec<OptionItem>,
    pub default_shop_categories: Vec<ShopCategory>,
    pub consoles: Vec<OptionItem>,
    pub retro_consoles: Vec<OptionItem>,
}

impl IntakeOptionsResponse {
    pub fn new(home_country_code: &str) -> Self {
        let mut country_codes: Vec<OptionItem> = DIAL_CODES
            .iter()
            .map(|d| OptionItem::new(d.code, d.label))
            .collect();
        country_codes.push(OptionItem::new(OTHER_COUNTRY_CODE, "Other"));

        Self {
            country_codes,
            default_country_code: home_country_code.to_string(),
            other_country_code: OTHER_COUNTRY_CODE.to_string(),
            shop_categories: ShopCategory::ALL
                .iter()
                .map(|c| OptionItem::new(c.id(), c.label()))
                .collect(),
            default_shop_categories: vec![ShopCategory::VideoGames],
            consoles: Console::ALL
                .iter()
                .map(|c| OptionItem::new(c.id(), c.label()))
                .collect(),
            retro_consoles: RetroConsole::ALL
                .iter()
                .map(|c| OptionItem::new(c.id(), c.label()))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FormatNumberQuery {
    pub country_code: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormatNumberResponse {
    pub value: String,
    pub placeholder: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_replays_onto_form() {
        let request = IntakeRequest {
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            whatsapp_country_code: "other".into(),
            custom_country_code: Some("+351".into()),
            whatsapp_number: "912345678".into(),
            shop_categories: vec![ShopCategory::VideoGames],
            selected_consoles: vec![Console::Ps5, Console::Retro],
            selected_retro_consoles: vec![RetroConsole::Psp],
            accepted_terms: true,
        };
        let form = request.to_form("+1 (246)");
        assert_eq!(form.country_code().custom(), Some("+351"));
        assert_eq!(form.selected_consoles(), vec![Console::Ps5, Console::Retro]);
        assert_eq!(form.selected_retro_consoles(), vec![RetroConsole::Psp]);
    }

    #[test]
    fn test_request_drops_hidden_selections() {
        let request = IntakeRequest {
            shop_categories: vec![],
            selected_consoles: vec![Console::Ps5],
            selected_retro_consoles: vec![RetroConsole::Psp],
            ..Default::default()
        };
        let form = request.to_form("+1 (246)");
        assert!(form.shop_categories().is_empty());
        assert!(form.selected_consoles().is_empty());
        assert!(form.selected_retro_consoles().is_empty());

        let request = IntakeRequest {
            shop_categories: vec![ShopCategory::VideoGames],
            selected_consoles: vec![Console::Ps5],
            selected_retro_consoles: vec![RetroConsole::Psp],
            ..Default::default()
        };
        let form = request.to_form("+1 (246)");
        assert!(form.selected_retro_consoles().is_empty());
    }

    #[test]
    fn test_options_list_other_last() {
        let options = IntakeOptionsResponse::new("+1 (246)");
        assert_eq!(options.country_codes.first().unwrap().value, "+1 (246)");
        assert_eq!(options.country_codes.last().unwrap().value, "other");
        assert_eq!(options.consoles.len(), 8);
        assert_eq!(options.retro_consoles.len(), 6);
    }
}
