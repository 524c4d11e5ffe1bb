use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    Customer, CustomerConsole, CustomerOverview, CustomerPrize, CustomerShoppingCategory,
    CustomerWheelSpin, PrizeOption,
};

/// Local copy of every collection the dashboard works on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub customers: Vec<Customer>,
    pub consoles: Vec<CustomerConsole>,
    pub categories: Vec<CustomerShoppingCategory>,
    pub wheel_spins: Vec<CustomerWheelSpin>,
    pub prizes: Vec<CustomerPrize>,
}

/// Ids for rows created locally before the next reload brings the real ones.
fn local_id() -> String {
    format!("local-{}", Uuid::new_v4())
}

impl DashboardState {
    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    pub fn consoles_for<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> impl Iterator<Item = &'a CustomerConsole> + 'a {
        self.consoles
            .iter()
            .filter(move |c| c.customer_id == customer_id)
    }

    pub fn categories_for<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> impl Iterator<Item = &'a CustomerShoppingCategory> + 'a {
        self.categories
            .iter()
            .filter(move |c| c.customer_id == customer_id)
    }

    pub fn wheel_spin_for(&self, customer_id: &str) -> Option<&CustomerWheelSpin> {
        self.wheel_spins
            .iter()
            .find(|ws| ws.customer_id == customer_id)
    }

    pub fn has_spun_wheel(&self, customer_id: &str) -> bool {
        self.wheel_spin_for(customer_id)
            .map(|ws| ws.has_spun_wheel)
            .unwrap_or(false)
    }

    pub fn prizes_for<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> impl Iterator<Item = &'a CustomerPrize> + 'a {
        self.prizes
            .iter()
            .filter(move |p| p.customer_id == customer_id)
    }

    pub fn overview(&self, customer: &Customer) -> CustomerOverview {
        CustomerOverview {
            customer: customer.clone(),
            consoles: self.consoles_for(&customer.id).cloned().collect(),
            categories: self.categories_for(&customer.id).cloned().collect(),
            wheel_spin: self.wheel_spin_for(&customer.id).cloned(),
            prizes: self.prizes_for(&customer.id).cloned().collect(),
        }
    }

    pub fn replace_customer(&mut self, updated: Customer) -> bool {
        match self.customers.iter_mut().find(|c| c.id == updated.id) {
            Some(existing) => {
                *existing = updated;
                true
            }
            None => false,
        }
    }

    /// Upserts the customer's wheel-spin row. Turning it off also drops
    /// every prize of that customer.
    pub fn apply_wheel_spin(
        &mut self,
        customer_id: &str,
        has_spun: bool,
        now: DateTime<Utc>,
    ) -> CustomerWheelSpin {
        let spun_at = has_spun.then_some(now);

        let spin = match self
            .wheel_spins
            .iter_mut()
            .find(|ws| ws.customer_id == customer_id)
        {
            Some(existing) => {
                existing.has_spun_wheel = has_spun;
                existing.spun_at = spun_at;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let created = CustomerWheelSpin {
                    id: local_id(),
                    customer_id: customer_id.to_string(),
                    has_spun_wheel: has_spun,
                    spun_at,
                    created_at: now,
                    updated_at: now,
                };
                self.wheel_spins.push(created.clone());
                created
            }
        };

        if !has_spun {
            self.prizes.retain(|p| p.customer_id != customer_id);
        }
        spin
    }

    /// Adds the prize unless the customer already holds that value.
    pub fn add_prize(&mut self, customer_id: &str, prize: &PrizeOption, now: DateTime<Utc>) {
        let held = self
            .prizes_for(customer_id)
            .any(|p| p.prize_value == prize.value);
        if held {
            return;
        }
        self.prizes.push(CustomerPrize {
            id: local_id(),
            customer_id: customer_id.to_string(),
            prize_type: prize.prize_type.to_string(),
            prize_value: prize.value.to_string(),
            is_claimed: false,
            claimed_at: None,
            created_at: now,
        });
    }

    pub fn remove_prize(&mut self, customer_id: &str, prize_value: &str) {
        self.prizes
            .retain(|p| !(p.customer_id == customer_id && p.prize_value == prize_value));
    }

    pub fn spun_count(&self) -> usize {
        self.wheel_spins
            .iter()
            .filter(|ws| ws.has_spun_wheel)
            .count()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
    }

    pub fn customer(id: &str, name: &str, number: &str) -> Customer {
        Customer {
            id: id.to_string(),
            full_name: name.to_string(),
            email: Some(format!("{id}@example.com")),
            whatsapp_country_code: "+1 (246)".to_string(),
            whatsapp_number: number.to_string(),
            custom_country_code: None,
            created_at: "2025-03-01T10:00:00+00:00".to_string(),
        }
    }

    pub fn console(customer_id: &str, console_type: &str) -> CustomerConsole {
        CustomerConsole {
            id: format!("{customer_id}-{console_type}"),
            customer_id: customer_id.to_string(),
            console_type: console_type.to_string(),
            is_retro: crate::models::RetroConsole::from_id(console_type).is_some(),
        }
    }

    pub fn category(customer_id: &str, category: &str) -> CustomerShoppingCategory {
        CustomerShoppingCategory {
            id: format!("{customer_id}-{category}"),
            customer_id: customer_id.to_string(),
            category: category.to_string(),
        }
    }

    /// Ana (ps5, video games, spun, one prize), Ben (ps4 + ps1, video games),
    /// Cleo (no rows at all).
    pub fn sample_state() -> DashboardState {
        let mut state = DashboardState {
            customers: vec![
                customer("c1", "Ana Gomez", "555-1234"),
                customer("c2", "Ben Carter", "555-9876"),
                customer("c3", "Cleo Banks", "444-1111"),
            ],
            consoles: vec![console("c1", "ps5"), console("c2", "ps4"), console("c2", "ps1")],
            categories: vec![category("c1", "video_games"), category("c2", "video_games")],
            wheel_spins: Vec::new(),
            prizes: Vec::new(),
        };
        state.apply_wheel_spin("c1", true, at(2));
        state.add_prize("c1", &crate::models::PRIZE_CATALOG[0], at(2));
        state
    }
}
