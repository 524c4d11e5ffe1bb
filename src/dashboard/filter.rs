use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::state::DashboardState;
use crate::models::Customer;

/// Value that switches a filter dimension off.
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WheelSpinFilter {
    #[default]
    All,
    Spun,
    NotSpun,
}

impl WheelSpinFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            WheelSpinFilter::All => "all",
            WheelSpinFilter::Spun => "spun",
            WheelSpinFilter::NotSpun => "not_spun",
        }
    }
}

/// Search term plus the three filter dimensions. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    pub search: String,
    pub category: Option<String>,
    pub console: Option<String>,
    pub wheel_spin: WheelSpinFilter,
}

fn choice(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != ALL)
}

impl DashboardFilter {
    pub fn new(
        search: Option<String>,
        category: Option<String>,
        console: Option<String>,
        wheel_spin: Option<WheelSpinFilter>,
    ) -> Self {
        Self {
            search: search.unwrap_or_default(),
            category: choice(category),
            console: choice(console),
            wheel_spin: wheel_spin.unwrap_or_default(),
        }
    }

    /// True when at least one filter dimension is not "all".
    pub fn has_active_filters(&self) -> bool {
        self.category.is_some() || self.console.is_some() || self.wheel_spin != WheelSpinFilter::All
    }

    /// e.g. `Category: video_games Console: ps5 Wheel: spun`, or `None`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(category) = &self.category {
            parts.push(format!("Category: {category}"));
        }
        if let Some(console) = &self.console {
            parts.push(format!("Console: {console}"));
        }
        if self.wheel_spin != WheelSpinFilter::All {
            parts.push(format!("Wheel: {}", self.wheel_spin.as_str()));
        }
        if parts.is_empty() {
            "None".to_string()
        } else {
            parts.join(" ")
        }
    }
}

type Predicate<'a> = Box<dyn Fn(&Customer) -> bool + 'a>;

/// Active predicates in evaluation order. Search is always present;
/// each filter dimension adds one predicate unless it is "all".
fn predicates<'a>(state: &'a DashboardState, filter: &'a DashboardFilter) -> Vec<Predicate<'a>> {
    let term = filter.search.to_lowercase();
    let mut list: Vec<Predicate<'a>> = vec![Box::new(move |c: &Customer| {
        c.full_name.to_lowercase().contains(&term)
            || c.whatsapp_number.to_lowercase().contains(&term)
    })];

    if let Some(category) = filter.category.as_deref() {
        list.push(Box::new(move |c: &Customer| {
            state
                .categories_for(&c.id)
                .any(|cat| cat.category == category)
        }));
    }

    if let Some(console) = filter.console.as_deref() {
        list.push(Box::new(move |c: &Customer| {
            state
                .consoles_for(&c.id)
                .any(|cc| cc.console_type == console)
        }));
    }

    match filter.wheel_spin {
        WheelSpinFilter::All => {}
        WheelSpinFilter::Spun => list.push(Box::new(move |c: &Customer| state.has_spun_wheel(&c.id))),
        WheelSpinFilter::NotSpun => {
            list.push(Box::new(move |c: &Customer| !state.has_spun_wheel(&c.id)))
        }
    }

    list
}

/// Customers matching every active predicate, in list order.
pub fn filter_customers<'a>(
    state: &'a DashboardState,
    filter: &DashboardFilter,
) -> Vec<&'a Customer> {
    let checks = predicates(state, filter);
    state
        .customers
        .iter()
        .filter(|customer| checks.iter().all(|check| check(*customer)))
        .collect()
}
