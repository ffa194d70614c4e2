//! MARTA feed configuration

use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_HOST: &str = "http://developer.itsmarta.com";
const TRAIN_ARRIVALS_PATH: &str = "/RealtimeTrain/RestServiceNextTrain/GetRealtimeArrivals";
const BUS_ARRIVALS_PATH: &str = "/BRDRestService/RestBusRealTimeService/GetAllBus";
const BUS_ROUTE_PATH: &str = "/BRDRestService/RestBusRealTimeService/GetBusByRoute";

/// Configuration for the MARTA real-time feeds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MartaConfig {
    /// Rail arrivals endpoint (the API key is appended as a query parameter)
    #[serde(default = "default_train_arrivals_url")]
    pub train_arrivals_url: String,

    /// All-buses endpoint
    #[serde(default = "default_bus_arrivals_url")]
    pub bus_arrivals_url: String,

    /// Per-route bus endpoint (the route is appended as a path segment)
    #[serde(default = "default_bus_route_url")]
    pub bus_route_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_train_arrivals_url() -> String {
    format!("{DEFAULT_HOST}{TRAIN_ARRIVALS_PATH}")
}

fn default_bus_arrivals_url() -> String {
    format!("{DEFAULT_HOST}{BUS_ARRIVALS_PATH}")
}

fn default_bus_route_url() -> String {
    format!("{DEFAULT_HOST}{BUS_ROUTE_PATH}")
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("integration_marta/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for MartaConfig {
    fn default() -> Self {
        Self {
            train_arrivals_url: default_train_arrivals_url(),
            bus_arrivals_url: default_bus_arrivals_url(),
            bus_route_url: default_bus_route_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl MartaConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Point all three feeds at another host, keeping the upstream paths
    ///
    /// `host` is a scheme and authority such as `http://127.0.0.1:8080`.
    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        let host = host.trim_end_matches('/');
        self.train_arrivals_url = format!("{host}{TRAIN_ARRIVALS_PATH}");
        self.bus_arrivals_url = format!("{host}{BUS_ARRIVALS_PATH}");
        self.bus_route_url = format!("{host}{BUS_ROUTE_PATH}");
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is not an absolute http(s) URL or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("train_arrivals_url", &self.train_arrivals_url),
            ("bus_arrivals_url", &self.bus_arrivals_url),
            ("bus_route_url", &self.bus_route_url),
        ] {
            if value.is_empty() {
                return Err(format!("{name} must not be empty"));
            }
            let url = Url::parse(value).map_err(|e| format!("{name} is not a valid URL: {e}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!("{name} must use http or https"));
            }
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MartaConfig::default();
        assert_eq!(
            config.train_arrivals_url,
            "http://developer.itsmarta.com/RealtimeTrain/RestServiceNextTrain/GetRealtimeArrivals"
        );
        assert_eq!(
            config.bus_arrivals_url,
            "http://developer.itsmarta.com/BRDRestService/RestBusRealTimeService/GetAllBus"
        );
        assert_eq!(
            config.bus_route_url,
            "http://developer.itsmarta.com/BRDRestService/RestBusRealTimeService/GetBusByRoute"
        );
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.starts_with("integration_marta/"));
    }

    #[test]
    fn test_testing_config() {
        let config = MartaConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_host() {
        let config = MartaConfig::default().with_host("http://127.0.0.1:9000/");
        assert_eq!(
            config.bus_route_url,
            "http://127.0.0.1:9000/BRDRestService/RestBusRealTimeService/GetBusByRoute"
        );
        assert!(config.train_arrivals_url.starts_with("http://127.0.0.1:9000/RealtimeTrain"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_success() {
        assert!(MartaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_url() {
        let config = MartaConfig {
            bus_arrivals_url: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("bus_arrivals_url"));
    }

    #[test]
    fn test_validation_relative_url() {
        let config = MartaConfig {
            bus_route_url: "/GetBusByRoute".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_non_http_scheme() {
        let config = MartaConfig {
            train_arrivals_url: "ftp://developer.itsmarta.com/trains".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = MartaConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_toml_section() {
        let config: MartaConfig = toml::from_str(
            r#"
            bus_route_url = "https://feeds.example.org/bus/route"
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.bus_route_url, "https://feeds.example.org/bus/route");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.bus_arrivals_url, default_bus_arrivals_url());
        assert_eq!(config.user_agent, default_user_agent());
    }
}
