use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

use super::{DataGateway, Filters, Mutation, Order};
use crate::config::SupabaseConfig;
use crate::error::{AppError, AppResult};

/// Error body returned by the REST layer on a failed request.
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Client handle bound to one project. Built at most once per gateway.
#[derive(Debug)]
struct RestHandle {
    http: Client,
    rest_url: String,
}

impl RestHandle {
    fn connect(config: &SupabaseConfig) -> Result<Self, String> {
        let url = config
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or("Missing SUPABASE_URL")?;
        let key = config
            .anon_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or("Missing SUPABASE_ANON_KEY")?;

        let mut headers = HeaderMap::new();
        let api_key =
            HeaderValue::from_str(key).map_err(|e| format!("Invalid SUPABASE_ANON_KEY: {e}"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| format!("Invalid SUPABASE_ANON_KEY: {e}"))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .user_agent("play-backend/gateway")
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", url.trim_end_matches('/')),
        })
    }
}

/// Gateway to the hosted database's REST and RPC endpoints.
///
/// Construct one at startup and share it (`Arc<dyn DataGateway>`). The
/// underlying connection handle is created on first use and reused for the
/// life of the process; if the URL or key is missing, that first use and
/// every later one fails with [`AppError::ConfigError`] without touching
/// the network.
pub struct SupabaseGateway {
    config: SupabaseConfig,
    handle: OnceLock<Result<RestHandle, String>>,
}

impl SupabaseGateway {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            handle: OnceLock::new(),
        }
    }

    /// Forces construction of the handle so configuration problems surface at startup.
    pub fn ensure_configured(&self) -> AppResult<()> {
        self.handle().map(|_| ())
    }

    fn handle(&self) -> AppResult<&RestHandle> {
        self.handle
            .get_or_init(|| RestHandle::connect(&self.config))
            .as_ref()
            .map_err(|msg| AppError::ConfigError(msg.clone()))
    }

    fn filter_params(filters: &Filters) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{value}")))
            .collect()
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(match serde_json::from_str::<RestErrorBody>(&text) {
            Ok(body) => {
                let mut message = body
                    .message
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
                if let Some(details) = body.details.filter(|d| !d.is_empty()) {
                    message = format!("{message} ({details})");
                }
                if let Some(hint) = body.hint.filter(|h| !h.is_empty()) {
                    log::debug!("Remote hint: {hint}");
                }
                AppError::remote(message, body.code)
            }
            Err(_) => AppError::remote(
                format!("HTTP {}: {}", status.as_u16(), text.trim()),
                Some(status.as_u16().to_string()),
            ),
        })
    }
}

#[async_trait]
impl DataGateway for SupabaseGateway {
    async fn query(
        &self,
        table: &str,
        projection: &str,
        order: Option<Order>,
    ) -> AppResult<Vec<Value>> {
        let handle = self.handle()?;
        let url = format!("{}/{}", handle.rest_url, table);

        let mut params = vec![("select".to_string(), projection.to_string())];
        if let Some(order) = order {
            let direction = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
        }

        let response = handle.http.get(&url).query(&params).send().await?;
        let rows: Vec<Value> = Self::check(response).await?.json().await?;
        Ok(rows)
    }

    async fn mutate(&self, table: &str, mutation: Mutation) -> AppResult<()> {
        let handle = self.handle()?;
        let url = format!("{}/{}", handle.rest_url, table);

        let request = match mutation {
            Mutation::Insert { payload } => handle.http.post(&url).json(&payload),
            Mutation::Update { filters, payload } => handle
                .http
                .patch(&url)
                .query(&Self::filter_params(&filters))
                .json(&payload),
            Mutation::Delete { filters } => handle
                .http
                .delete(&url)
                .query(&Self::filter_params(&filters)),
        };

        let response = request
            .header("Prefer", "return=minimal")
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn call(&self, procedure: &str, args: Value) -> AppResult<Value> {
        let handle = self.handle()?;
        let url = format!("{}/rpc/{}", handle.rest_url, procedure);

        let response = handle.http.post(&url).json(&args).send().await?;
        let response = Self::check(response).await?;

        // void procedures answer with an empty body
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::eq;

    fn config(url: Option<&str>, key: Option<&str>) -> SupabaseConfig {
        SupabaseConfig {
            url: url.map(str::to_string),
            anon_key: key.map(str::to_string),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_missing_url_fails_before_network() {
        let gateway = SupabaseGateway::new(config(None, Some("key")));
        let err = gateway.query("customers", "*", None).await.unwrap_err();
        assert!(matches!(err, AppError::ConfigError(ref m) if m.contains("SUPABASE_URL")));
        // still failing on later calls
        let err = gateway
            .call("update_wheel_spin_status", Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let gateway = SupabaseGateway::new(config(Some("https://x.supabase.co"), Some("  ")));
        let err = gateway
            .mutate(
                "customer_prizes",
                Mutation::Delete {
                    filters: vec![eq("customer_id", "1")],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(ref m) if m.contains("SUPABASE_ANON_KEY")));
    }

    #[test]
    fn test_handle_is_built_once() {
        let gateway = SupabaseGateway::new(config(Some("https://x.supabase.co/"), Some("key")));
        assert!(gateway.ensure_configured().is_ok());
        let first = gateway.handle().unwrap() as *const RestHandle;
        let second = gateway.handle().unwrap() as *const RestHandle;
        assert_eq!(first, second);
        assert_eq!(gateway.handle().unwrap().rest_url, "https://x.supabase.co/rest/v1");
    }

    #[test]
    fn test_filter_params_use_eq_operator() {
        let params = SupabaseGateway::filter_params(&vec![
            eq("customer_id", "abc"),
            eq("prize_value", "$10 voucher"),
        ]);
        assert_eq!(
            params,
            vec![
                ("customer_id".to_string(), "eq.abc".to_string()),
                ("prize_value".to_string(), "eq.$10 voucher".to_string()),
            ]
        );
    }
}
