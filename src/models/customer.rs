use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CUSTOMERS_TABLE: &str = "customers";
pub const CUSTOMER_CONSOLES_TABLE: &str = "customer_consoles";
pub const CUSTOMER_CATEGORIES_TABLE: &str = "customer_shopping_categories";
pub const CUSTOMER_WHEEL_SPINS_TABLE: &str = "customer_wheel_spins";
pub const CUSTOMER_PRIZES_TABLE: &str = "customer_prizes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub whatsapp_country_code: String,
    pub whatsapp_number: String,
    #[serde(default)]
    pub custom_country_code: Option<String>,
    pub created_at: String,
}

impl Customer {
    pub const PROJECTION: &'static str =
        "id, full_name, email, whatsapp_country_code, whatsapp_number, created_at";

    /// Dial code and number as displayed, e.g. `+1 (246)555-1234`.
    pub fn whatsapp(&self) -> String {
        format!("{}{}", self.whatsapp_country_code, self.whatsapp_number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerConsole {
    pub id: String,
    pub customer_id: String,
    pub console_type: String,
    pub is_retro: bool,
}

impl CustomerConsole {
    pub const PROJECTION: &'static str = "id, customer_id, console_type, is_retro";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerShoppingCategory {
    pub id: String,
    pub customer_id: String,
    pub category: String,
}

impl CustomerShoppingCategory {
    pub const PROJECTION: &'static str = "id, customer_id, category";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerWheelSpin {
    pub id: String,
    pub customer_id: String,
    pub has_spun_wheel: bool,
    pub spun_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerPrize {
    pub id: String,
    pub customer_id: String,
    pub prize_type: String,
    pub prize_value: String,
    pub is_claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A customer joined with every row that belongs to it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerOverview {
    pub customer: Customer,
    pub consoles: Vec<CustomerConsole>,
    pub categories: Vec<CustomerShoppingCategory>,
    pub wheel_spin: Option<CustomerWheelSpin>,
    pub prizes: Vec<CustomerPrize>,
}
