use std::collections::BTreeSet;

use crate::models::catalog::{
    Console, DialCode, OTHER_COUNTRY_CODE, RetroConsole, ShopCategory, find_dial_code,
};
use crate::utils::format_whatsapp_input;

/// Which dial code the customer picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryCodeChoice {
    Unselected,
    Listed(&'static DialCode),
    /// The "other" sentinel; only this phase carries a free-text code.
    Other { custom: String },
}

impl CountryCodeChoice {
    /// Value sent as `whatsapp_country_code`.
    pub fn value(&self) -> &str {
        match self {
            CountryCodeChoice::Unselected => "",
            CountryCodeChoice::Listed(dial) => dial.code,
            CountryCodeChoice::Other { .. } => OTHER_COUNTRY_CODE,
        }
    }

    pub fn custom(&self) -> Option<&str> {
        match self {
            CountryCodeChoice::Other { custom } => Some(custom.as_str()),
            _ => None,
        }
    }
}

/// Console selections. The retro catalog exists only while "retro" is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsolePhase {
    Current {
        consoles: BTreeSet<Console>,
    },
    /// `consoles` never holds `Console::Retro`; it is implied by this variant.
    WithRetro {
        consoles: BTreeSet<Console>,
        retro: BTreeSet<RetroConsole>,
    },
}

impl Default for ConsolePhase {
    fn default() -> Self {
        ConsolePhase::Current {
            consoles: BTreeSet::new(),
        }
    }
}

/// Shopping preferences. Console selection is only reachable through a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShoppingPhase {
    NoCategory,
    VideoGames(ConsolePhase),
}

impl Default for ShoppingPhase {
    fn default() -> Self {
        ShoppingPhase::VideoGames(ConsolePhase::default())
    }
}

/// Field values of the intake form while it is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    pub full_name: String,
    pub email: String,
    country_code: CountryCodeChoice,
    whatsapp_number: String,
    shopping: ShoppingPhase,
    pub accepted_terms: bool,
    home_country_code: String,
}

impl IntakeForm {
    /// Defaults: home dial code selected, video games pre-checked, terms unchecked.
    pub fn new(home_country_code: &str) -> Self {
        let country_code = match find_dial_code(home_country_code) {
            Some(dial) => CountryCodeChoice::Listed(dial),
            None => CountryCodeChoice::Unselected,
        };
        Self {
            full_name: String::new(),
            email: String::new(),
            country_code,
            whatsapp_number: String::new(),
            shopping: ShoppingPhase::default(),
            accepted_terms: false,
            home_country_code: home_country_code.to_string(),
        }
    }

    /// Clears every value and re-checks the default shopping category.
    pub fn reset(&mut self) {
        *self = Self::new(&self.home_country_code);
    }

    pub fn country_code(&self) -> &CountryCodeChoice {
        &self.country_code
    }

    pub fn whatsapp_number(&self) -> &str {
        &self.whatsapp_number
    }

    pub fn shopping(&self) -> &ShoppingPhase {
        &self.shopping
    }

    pub fn is_home_region(&self) -> bool {
        self.country_code.value() == self.home_country_code
    }

    /// Selecting "other" reveals the custom code pre-filled with `+`;
    /// any listed code drops it. Unknown values leave nothing selected.
    pub fn select_country_code(&mut self, value: &str) {
        self.country_code = if value == OTHER_COUNTRY_CODE {
            CountryCodeChoice::Other {
                custom: "+".to_string(),
            }
        } else {
            match find_dial_code(value) {
                Some(dial) => CountryCodeChoice::Listed(dial),
                None => CountryCodeChoice::Unselected,
            }
        };
    }

    /// Returns false when the custom field is not shown.
    pub fn set_custom_country_code(&mut self, value: &str) -> bool {
        match &mut self.country_code {
            CountryCodeChoice::Other { custom } => {
                *custom = value.to_string();
                true
            }
            _ => false,
        }
    }

    /// Keystroke input; formatted for the selected region.
    pub fn input_whatsapp_number(&mut self, raw: &str) {
        self.whatsapp_number = format_whatsapp_input(raw, self.is_home_region());
    }

    /// Stores a number exactly as given, for values that were not typed here.
    pub fn set_whatsapp_number(&mut self, value: &str) {
        self.whatsapp_number = value.to_string();
    }

    /// Unchecking a category clears the console selections that hang off it.
    pub fn set_category(&mut self, category: ShopCategory, checked: bool) {
        match (category, checked, &self.shopping) {
            (ShopCategory::VideoGames, true, ShoppingPhase::NoCategory) => {
                self.shopping = ShoppingPhase::VideoGames(ConsolePhase::default());
            }
            (ShopCategory::VideoGames, false, _) => {
                self.shopping = ShoppingPhase::NoCategory;
            }
            _ => {}
        }
    }

    /// Returns false when the console list is not shown.
    pub fn set_console(&mut self, console: Console, checked: bool) -> bool {
        let ShoppingPhase::VideoGames(phase) = &mut self.shopping else {
            return false;
        };

        if console == Console::Retro {
            *phase = match (std::mem::take(phase), checked) {
                (ConsolePhase::Current { consoles }, true) => ConsolePhase::WithRetro {
                    consoles,
                    retro: BTreeSet::new(),
                },
                (ConsolePhase::WithRetro { consoles, .. }, false) => {
                    ConsolePhase::Current { consoles }
                }
                (unchanged, _) => unchanged,
            };
            return true;
        }

        let consoles = match phase {
            ConsolePhase::Current { consoles } => consoles,
            ConsolePhase::WithRetro { consoles, .. } => consoles,
        };
        if checked {
            consoles.insert(console);
        } else {
            consoles.remove(&console);
        }
        true
    }

    /// Returns false when the retro list is not shown.
    pub fn set_retro_console(&mut self, console: RetroConsole, checked: bool) -> bool {
        match &mut self.shopping {
            ShoppingPhase::VideoGames(ConsolePhase::WithRetro { retro, .. }) => {
                if checked {
                    retro.insert(console);
                } else {
                    retro.remove(&console);
                }
                true
            }
            _ => false,
        }
    }

    pub fn shop_categories(&self) -> Vec<ShopCategory> {
        match self.shopping {
            ShoppingPhase::NoCategory => Vec::new(),
            ShoppingPhase::VideoGames(_) => vec![ShopCategory::VideoGames],
        }
    }

    /// Selected consoles in catalog order, `retro` included when checked.
    pub fn selected_consoles(&self) -> Vec<Console> {
        match &self.shopping {
            ShoppingPhase::NoCategory => Vec::new(),
            ShoppingPhase::VideoGames(ConsolePhase::Current { consoles }) => {
                consoles.iter().copied().collect()
            }
            ShoppingPhase::VideoGames(ConsolePhase::WithRetro { consoles, .. }) => {
                let mut all: Vec<Console> = consoles.iter().copied().collect();
                all.push(Console::Retro);
                all.sort();
                all
            }
        }
    }

    pub fn selected_retro_consoles(&self) -> Vec<RetroConsole> {
        match &self.shopping {
            ShoppingPhase::VideoGames(ConsolePhase::WithRetro { retro, .. }) => {
                retro.iter().copied().collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "+1 (246)";

    #[test]
    fn test_defaults() {
        let form = IntakeForm::new(HOME);
        assert_eq!(form.country_code().value(), HOME);
        assert_eq!(form.shop_categories(), vec![ShopCategory::VideoGames]);
        assert!(form.selected_consoles().is_empty());
        assert!(!form.accepted_terms);
    }

    #[test]
    fn test_other_country_code_prefills_plus_and_listed_code_clears_it() {
        let mut form = IntakeForm::new(HOME);
        assert!(!form.set_custom_country_code("+7"));

        form.select_country_code("other");
        assert_eq!(form.country_code().custom(), Some("+"));
        assert!(form.set_custom_country_code("+7"));
        assert_eq!(form.country_code().custom(), Some("+7"));
        assert_eq!(form.country_code().value(), "other");

        form.select_country_code("+44");
        assert_eq!(form.country_code().custom(), None);
    }

    #[test]
    fn test_home_region_number_is_grouped_while_typing() {
        let mut form = IntakeForm::new(HOME);
        for digit in "2461234567".chars() {
            let typed = format!("{}{}", form.whatsapp_number(), digit);
            form.input_whatsapp_number(&typed);
        }
        assert_eq!(form.whatsapp_number(), "246-1234");

        form.select_country_code("+44");
        form.input_whatsapp_number("0207-946-0000");
        assert_eq!(form.whatsapp_number(), "02079460000");
    }

    #[test]
    fn test_retro_catalog_only_while_retro_checked() {
        let mut form = IntakeForm::new(HOME);
        assert!(!form.set_retro_console(RetroConsole::Ps1, true));

        form.set_console(Console::Ps5, true);
        form.set_console(Console::Retro, true);
        assert!(form.set_retro_console(RetroConsole::Ps1, true));
        assert_eq!(form.selected_consoles(), vec![Console::Ps5, Console::Retro]);
        assert_eq!(form.selected_retro_consoles(), vec![RetroConsole::Ps1]);

        form.set_console(Console::Retro, false);
        assert_eq!(form.selected_consoles(), vec![Console::Ps5]);
        assert!(form.selected_retro_consoles().is_empty());
    }

    #[test]
    fn test_unchecking_category_clears_consoles() {
        let mut form = IntakeForm::new(HOME);
        form.set_console(Console::Retro, true);
        form.set_retro_console(RetroConsole::Psp, true);
        form.set_console(Console::Pc, true);

        form.set_category(ShopCategory::VideoGames, false);
        assert!(form.shop_categories().is_empty());
        assert!(form.selected_consoles().is_empty());
        assert!(form.selected_retro_consoles().is_empty());
        assert!(!form.set_console(Console::Ps4, true));

        form.set_category(ShopCategory::VideoGames, true);
        assert!(form.selected_consoles().is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = IntakeForm::new(HOME);
        form.full_name = "Ana".into();
        form.accepted_terms = true;
        form.set_category(ShopCategory::VideoGames, false);
        form.select_country_code("other");

        form.reset();
        assert_eq!(form, IntakeForm::new(HOME));
    }
}
