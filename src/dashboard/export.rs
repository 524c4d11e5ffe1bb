use super::filter::{DashboardFilter, WheelSpinFilter};
use super::state::DashboardState;
use crate::models::{Customer, ShopCategory};
use crate::utils::CsvRecord;

pub const CUSTOMER_COLUMNS: [&str; 10] = [
    "Full Name",
    "Email",
    "WhatsApp",
    "Video Games",
    "Consoles",
    "Spun Wheel",
    "Wheel Spin Date",
    "Prizes Won",
    "Prize Count",
    "Created",
];

pub const PRIZE_WINNER_COLUMNS: [&str; 6] = [
    "Full Name",
    "Email",
    "WhatsApp",
    "All Prizes Won",
    "Prize Count",
    "Created",
];

/// One row per given customer, with console/category/wheel/prize columns derived from `state`.
pub fn customer_rows(state: &DashboardState, customers: &[&Customer]) -> Vec<CsvRecord> {
    customers
        .iter()
        .map(|customer| {
            let video_games: Vec<&str> = state
                .categories_for(&customer.id)
                .filter(|c| c.category == ShopCategory::VideoGames.id())
                .map(|c| c.category.as_str())
                .collect();
            let consoles: Vec<&str> = state
                .consoles_for(&customer.id)
                .map(|c| c.console_type.as_str())
                .collect();
            let wheel_spin = state.wheel_spin_for(&customer.id);
            let spun = wheel_spin.map(|ws| ws.has_spun_wheel).unwrap_or(false);
            let spun_on = wheel_spin
                .and_then(|ws| ws.spun_at)
                .map(|at| at.format("%-m/%-d/%Y").to_string())
                .unwrap_or_default();
            let prizes: Vec<&str> = state
                .prizes_for(&customer.id)
                .map(|p| p.prize_value.as_str())
                .collect();

            CsvRecord::new()
                .field("Full Name", &customer.full_name)
                .field("Email", customer.email.as_deref().unwrap_or_default())
                .field("WhatsApp", customer.whatsapp())
                .field("Video Games", video_games.join(", "))
                .field("Consoles", consoles.join(", "))
                .field("Spun Wheel", if spun { "Yes" } else { "No" })
                .field("Wheel Spin Date", spun_on)
                .field("Prizes Won", prizes.join(", "))
                .field("Prize Count", prizes.len())
                .field("Created", &customer.created_at)
        })
        .collect()
}

/// Every customer holding at least one prize, regardless of the active filters.
pub fn prize_winner_rows(state: &DashboardState) -> Vec<CsvRecord> {
    state
        .customers
        .iter()
        .filter_map(|customer| {
            let prizes: Vec<&str> = state
                .prizes_for(&customer.id)
                .map(|p| p.prize_value.as_str())
                .collect();
            if prizes.is_empty() {
                return None;
            }
            Some(
                CsvRecord::new()
                    .field("Full Name", &customer.full_name)
                    .field("Email", customer.email.as_deref().unwrap_or_default())
                    .field("WhatsApp", customer.whatsapp())
                    .field("All Prizes Won", prizes.join(", "))
                    .field("Prize Count", prizes.len())
                    .field("Created", &customer.created_at),
            )
        })
        .collect()
}

/// `<base>[-filtered][-<category>][-<console>][-<wheelstatus>][-search-<term>].csv`
pub fn export_filename(base: &str, filter: &DashboardFilter) -> String {
    let mut filename = base.to_string();

    if filter.has_active_filters() || !filter.search.is_empty() {
        filename.push_str("-filtered");
        if let Some(category) = &filter.category {
            filename.push_str(&format!("-{category}"));
        }
        if let Some(console) = &filter.console {
            filename.push_str(&format!("-{console}"));
        }
        if filter.wheel_spin != WheelSpinFilter::All {
            filename.push_str(&format!("-{}", filter.wheel_spin.as_str()));
        }
        if !filter.search.is_empty() {
            filename.push_str(&format!("-search-{}", filter.search));
        }
    }

    filename.push_str(".csv");
    filename
}
