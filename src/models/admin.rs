use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::catalog::{PRIZE_CATALOG, PrizeOption};
use super::customer::{Customer, CustomerOverview, CustomerPrize, CustomerWheelSpin};
use crate::dashboard::{DashboardFilter, WheelSpinFilter};

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CustomerFilterQuery {
    /// Case-insensitive match on name or WhatsApp number
    pub search: Option<String>,
    /// Shopping category id, or `all`
    pub category: Option<String>,
    /// Console id from either catalog, or `all`
    pub console: Option<String>,
    pub wheel_spin: Option<WheelSpinFilter>,
}

impl From<CustomerFilterQuery> for DashboardFilter {
    fn from(query: CustomerFilterQuery) -> Self {
        DashboardFilter::new(query.search, query.category, query.console, query.wheel_spin)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerListResponse {
    pub total: usize,
    pub filtered: usize,
    pub items: Vec<CustomerOverview>,
}

/// Editable subset of a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerEdit {
    #[schema(example = "Ana Gomez")]
    pub full_name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "555-1234")]
    pub whatsapp_number: String,
}

impl From<&Customer> for CustomerEdit {
    fn from(customer: &Customer) -> Self {
        Self {
            full_name: customer.full_name.clone(),
            email: customer.email.clone().unwrap_or_default(),
            whatsapp_number: customer.whatsapp_number.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WheelSpinToggleRequest {
    pub has_spun_wheel: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WheelSpinToggleResponse {
    pub wheel_spin: CustomerWheelSpin,
    pub prizes: Vec<CustomerPrize>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrizeToggleRequest {
    #[schema(example = "$10 voucher")]
    pub prize_value: String,
    pub checked: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrizeOptionItem {
    pub prize_type: String,
    pub value: String,
    pub label: String,
}

impl From<&PrizeOption> for PrizeOptionItem {
    fn from(prize: &PrizeOption) -> Self {
        Self {
            prize_type: prize.prize_type.to_string(),
            value: prize.value.to_string(),
            label: prize.label.to_string(),
        }
    }
}

pub fn prize_options() -> Vec<PrizeOptionItem> {
    PRIZE_CATALOG.iter().map(Into::into).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_customers: usize,
    pub total_console_rows: usize,
    pub total_category_rows: usize,
    pub spun_wheel: usize,
    pub filtered_customers: usize,
    pub active_filters: String,
}
