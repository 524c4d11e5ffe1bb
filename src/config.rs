use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_HOME_COUNTRY_CODE: &str = "+1 (246)";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the hosted database. Both values are optional
/// here; the gateway reports their absence as a configuration error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default = "default_home_country_code")]
    pub home_country_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_customers_file_base")]
    pub customers_file_base: String,
    #[serde(default = "default_prize_winners_file")]
    pub prize_winners_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_home_country_code() -> String {
    DEFAULT_HOME_COUNTRY_CODE.to_string()
}

fn default_customers_file_base() -> String {
    "play-barbados-customers".to_string()
}

fn default_prize_winners_file() -> String {
    "play-barbados-all-prize-winners.csv".to_string()
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            home_country_code: default_home_country_code(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            customers_file_base: default_customers_file_base(),
            prize_winners_file: default_prize_winners_file(),
        }
    }
}

/// Empty strings count as "not set" so a blank env var cannot mask a missing value.
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Without a config file everything comes from the environment and defaults
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::from_toml_str(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Config {
                    server: ServerConfig {
                        host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    supabase: SupabaseConfig::default(),
                    intake: IntakeConfig::default(),
                    export: ExportConfig::default(),
                    cors: CorsConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Cannot read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Config =
            toml::from_str(raw).map_err(|e| format!("Failed to parse config file: {e}"))?;
        Ok(config)
    }

    /// Environment variables win over file values, even when the file exists.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("SUPABASE_URL") {
            self.supabase.url = non_empty(v);
        }
        if let Ok(v) = env::var("SUPABASE_ANON_KEY") {
            self.supabase.anon_key = non_empty(v);
        }
        if let Ok(v) = env::var("SUPABASE_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            self.supabase.timeout_secs = n;
        }
        if let Ok(v) = env::var("INTAKE_HOME_COUNTRY_CODE")
            && let Some(code) = non_empty(v)
        {
            self.intake.home_country_code = code;
        }
        if let Ok(v) = env::var("EXPORT_CUSTOMERS_FILE_BASE")
            && let Some(base) = non_empty(v)
        {
            self.export.customers_file_base = base;
        }
        if let Ok(v) = env::var("EXPORT_PRIZE_WINNERS_FILE")
            && let Some(name) = non_empty(v)
        {
            self.export.prize_winners_file = name;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = split_origins(&v);
        }
    }
}
