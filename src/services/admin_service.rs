use chrono::Utc;
use futures_util::future::try_join3;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ExportConfig;
use crate::dashboard::{
    DashboardFilter, DashboardState, customer_rows, export_filename, filter_customers,
    prize_winner_rows,
};
use crate::error::{AppError, AppResult};
use crate::gateway::{DataGateway, Mutation, Order, eq, select};
use crate::models::*;
use crate::utils::{to_csv, validate_whatsapp_number};

pub const WHEEL_SPIN_PROCEDURE: &str = "update_wheel_spin_status";
pub const PRIZE_PROCEDURE: &str = "update_customer_prize";

/// A generated CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}

/// Admin dashboard: loads every collection once, serves filtered views from
/// memory and applies local changes only after the matching remote call succeeded.
#[derive(Clone)]
pub struct AdminService {
    gateway: Arc<dyn DataGateway>,
    state: Arc<RwLock<DashboardState>>,
    export: ExportConfig,
}

impl AdminService {
    pub fn new(gateway: Arc<dyn DataGateway>, export: ExportConfig) -> Self {
        Self {
            gateway,
            state: Arc::new(RwLock::new(DashboardState::default())),
            export,
        }
    }

    /// Fetches all five collections in parallel.
    ///
    /// Customers, consoles and categories are required: if any of them fails
    /// the load is aborted and the previous state is kept. Wheel spins and
    /// prizes may not be provisioned yet, so their failures load as empty.
    pub async fn load(&self) -> AppResult<()> {
        let gateway = self.gateway.as_ref();

        let (primary, wheel_spins, prizes) = tokio::join!(
            try_join3(
                select::<Customer>(
                    gateway,
                    CUSTOMERS_TABLE,
                    Customer::PROJECTION,
                    Some(Order::desc("created_at")),
                ),
                select::<CustomerConsole>(
                    gateway,
                    CUSTOMER_CONSOLES_TABLE,
                    CustomerConsole::PROJECTION,
                    None
                ),
                select::<CustomerShoppingCategory>(
                    gateway,
                    CUSTOMER_CATEGORIES_TABLE,
                    CustomerShoppingCategory::PROJECTION,
                    None,
                ),
            ),
            select::<CustomerWheelSpin>(gateway, CUSTOMER_WHEEL_SPINS_TABLE, "*", None),
            select::<CustomerPrize>(gateway, CUSTOMER_PRIZES_TABLE, "*", None),
        );

        let (customers, consoles, categories) = primary.map_err(|e| {
            log::error!("Error fetching dashboard data: {e}");
            e
        })?;

        let wheel_spins = wheel_spins.unwrap_or_else(|e| {
            log::warn!("Wheel spins table may not exist yet: {e}");
            Vec::new()
        });
        let prizes = prizes.unwrap_or_else(|e| {
            log::warn!("Prizes table may not exist yet: {e}");
            Vec::new()
        });

        log::info!(
            "Dashboard loaded: {} customers, {} consoles, {} categories, {} wheel spins, {} prizes",
            customers.len(),
            consoles.len(),
            categories.len(),
            wheel_spins.len(),
            prizes.len()
        );

        *self.state.write().await = DashboardState {
            customers,
            consoles,
            categories,
            wheel_spins,
            prizes,
        };
        Ok(())
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub async fn list_customers(&self, filter: &DashboardFilter) -> CustomerListResponse {
        let state = self.state.read().await;
        let items: Vec<CustomerOverview> = filter_customers(&state, filter)
            .into_iter()
            .map(|customer| state.overview(customer))
            .collect();

        CustomerListResponse {
            total: state.customers.len(),
            filtered: items.len(),
            items,
        }
    }

    pub async fn stats(&self, filter: &DashboardFilter) -> DashboardStats {
        let state = self.state.read().await;
        DashboardStats {
            total_customers: state.customers.len(),
            total_console_rows: state.consoles.len(),
            total_category_rows: state.categories.len(),
            spun_wheel: state.spun_count(),
            filtered_customers: filter_customers(&state, filter).len(),
            active_filters: filter.summary(),
        }
    }

    /// Values that seed the inline editor.
    pub async fn edit_seed(&self, customer_id: &str) -> AppResult<CustomerEdit> {
        let state = self.state.read().await;
        state
            .customer(customer_id)
            .map(CustomerEdit::from)
            .ok_or_else(|| AppError::NotFound(format!("Customer {customer_id} not found")))
    }

    /// Saves name, email and phone. The local record changes only after the update succeeded.
    pub async fn update_customer(
        &self,
        customer_id: &str,
        edit: CustomerEdit,
    ) -> AppResult<Customer> {
        let mut updated = self
            .state
            .read()
            .await
            .customer(customer_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Customer {customer_id} not found")))?;

        validate_whatsapp_number(&edit.whatsapp_number)
            .map_err(|problem| AppError::ValidationError(problem.message().to_string()))?;

        let email = Some(edit.email.trim().to_string()).filter(|e| !e.is_empty());
        let payload = json!({
            "full_name": edit.full_name,
            "email": email,
            "whatsapp_number": edit.whatsapp_number,
        });

        self.gateway
            .mutate(
                CUSTOMERS_TABLE,
                Mutation::Update {
                    filters: vec![eq("id", customer_id)],
                    payload,
                },
            )
            .await
            .map_err(|e| {
                log::error!("Error updating customer {customer_id}: {e}");
                e
            })?;

        updated.full_name = edit.full_name;
        updated.email = email;
        updated.whatsapp_number = edit.whatsapp_number;
        self.state.write().await.replace_customer(updated.clone());
        Ok(updated)
    }

    /// Records whether the customer spun the wheel. Turning it off removes their prizes.
    pub async fn set_wheel_spin(
        &self,
        customer_id: &str,
        has_spun: bool,
    ) -> AppResult<WheelSpinToggleResponse> {
        self.ensure_customer(customer_id).await?;

        self.gateway
            .call(
                WHEEL_SPIN_PROCEDURE,
                json!({
                    "p_customer_id": customer_id,
                    "p_has_spun_wheel": has_spun,
                }),
            )
            .await
            .map_err(|e| {
                log::error!("Error updating wheel spin status for {customer_id}: {e}");
                e
            })?;

        let mut state = self.state.write().await;
        let wheel_spin = state.apply_wheel_spin(customer_id, has_spun, Utc::now());
        let prizes = state.prizes_for(customer_id).cloned().collect();
        Ok(WheelSpinToggleResponse { wheel_spin, prizes })
    }

    /// Checks or unchecks one catalog prize for the customer.
    pub async fn set_prize(
        &self,
        customer_id: &str,
        prize_value: &str,
        checked: bool,
    ) -> AppResult<Vec<CustomerPrize>> {
        let prize = find_prize(prize_value)
            .ok_or_else(|| AppError::ValidationError(format!("Unknown prize: {prize_value}")))?;
        self.ensure_customer(customer_id).await?;

        if checked {
            if !self.state.read().await.has_spun_wheel(customer_id) {
                return Err(AppError::ValidationError(
                    "Prizes can only be recorded after the customer spun the wheel".to_string(),
                ));
            }
            self.gateway
                .call(
                    PRIZE_PROCEDURE,
                    json!({
                        "p_customer_id": customer_id,
                        "p_prize_type": prize.prize_type,
                        "p_prize_value": prize.value,
                    }),
                )
                .await
                .map_err(|e| {
                    log::error!("Error adding prize {prize_value} for {customer_id}: {e}");
                    e
                })?;
            self.state
                .write()
                .await
                .add_prize(customer_id, prize, Utc::now());
        } else {
            self.gateway
                .mutate(
                    CUSTOMER_PRIZES_TABLE,
                    Mutation::Delete {
                        filters: vec![eq("customer_id", customer_id), eq("prize_value", prize.value)],
                    },
                )
                .await
                .map_err(|e| {
                    log::error!("Error removing prize {prize_value} for {customer_id}: {e}");
                    e
                })?;
            self.state.write().await.remove_prize(customer_id, prize.value);
        }

        Ok(self
            .state
            .read()
            .await
            .prizes_for(customer_id)
            .cloned()
            .collect())
    }

    /// CSV of the currently filtered customers.
    pub async fn export_customers(&self, filter: &DashboardFilter) -> CsvExport {
        let state = self.state.read().await;
        let customers = filter_customers(&state, filter);
        let rows = customer_rows(&state, &customers);
        CsvExport {
            filename: export_filename(&self.export.customers_file_base, filter),
            content: to_csv(&rows),
            rows: rows.len(),
        }
    }

    /// CSV of every customer holding at least one prize.
    pub async fn export_prize_winners(&self) -> CsvExport {
        let state = self.state.read().await;
        let rows = prize_winner_rows(&state);
        CsvExport {
            filename: self.export.prize_winners_file.clone(),
            content: to_csv(&rows),
            rows: rows.len(),
        }
    }

    async fn ensure_customer(&self, customer_id: &str) -> AppResult<()> {
        if self.state.read().await.customer(customer_id).is_none() {
            return Err(AppError::NotFound(format!(
                "Customer {customer_id} not found"
            )));
        }
        Ok(())
    }
}
