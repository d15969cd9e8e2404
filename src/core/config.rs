//! Configuration for the dashboard
//!
//! Everything the dashboard needs to know before it starts lives in
//! [`AppConfig`]: the REST endpoint, the headers attached to each request,
//! the marker icon policy and the view defaults. The endpoint is baked in at
//! build time from `STATIONMAP_ENDPOINT` and the same variable can override it
//! at run time through [`AppConfig::from_env`].

use crate::constants::*;
use crate::core::geo::{LatLng, Point};
use crate::layers::icon::TemperatureThresholds;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Top-level dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the station collection, expected to end with `/`
    pub endpoint: String,
    /// Tag stamped on every payload the dashboard sends
    pub client_tag: String,
    pub http: HttpConfig,
    pub markers: MarkerConfig,
    pub view: ViewConfig,
}

impl AppConfig {
    /// Endpoint chosen at build time, or the local default
    pub fn build_time_endpoint() -> &'static str {
        option_env!("STATIONMAP_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Defaults, with the endpoint overridden by `STATIONMAP_ENDPOINT` when set
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            log::info!("endpoint overridden from {}: {}", ENDPOINT_ENV, endpoint);
            config.endpoint = endpoint;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Rejects settings the dashboard cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Config("endpoint must not be empty".to_string()));
        }
        if !self.endpoint.ends_with('/') {
            log::warn!(
                "endpoint {} does not end with '/', station ids will be appended directly",
                self.endpoint
            );
        }
        let thresholds = &self.markers.thresholds;
        if thresholds.cold_below > thresholds.hot_above {
            return Err(Error::Config(format!(
                "cold threshold {} is above hot threshold {}",
                thresholds.cold_below, thresholds.hot_above
            )));
        }
        if self.markers.icon_size <= 0.0 || self.markers.selected_icon_size <= 0.0 {
            return Err(Error::Config("icon sizes must be positive".to_string()));
        }
        if !self.view.fallback_center.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "fallback center {:?}",
                self.view.fallback_center
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::build_time_endpoint().to_string(),
            client_tag: DEFAULT_CLIENT_TAG.to_string(),
            http: HttpConfig::default(),
            markers: MarkerConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

/// Headers and transport settings for the HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub allow_origin: String,
    pub trace_header: String,
    pub trace_value: String,
    /// Per-request timeout; `None` keeps the transport default
    pub timeout_ms: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
            trace_header: TRACE_HEADER.to_string(),
            trace_value: TRACE_HEADER_VALUE.to_string(),
            timeout_ms: None,
        }
    }
}

/// Marker icon policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub thresholds: TemperatureThresholds,
    pub icon_size: f32,
    pub selected_icon_size: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            thresholds: TemperatureThresholds::default(),
            icon_size: MARKER_ICON_SIZE,
            selected_icon_size: MARKER_ICON_SIZE_SELECTED,
        }
    }
}

/// Map view defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub fallback_center: LatLng,
    pub fallback_zoom: f64,
    pub initial_zoom: f64,
    pub fit_padding: f64,
    pub size: Point,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fallback_center: LatLng::from(FALLBACK_CENTER),
            fallback_zoom: FALLBACK_ZOOM,
            initial_zoom: INITIAL_ZOOM,
            fit_padding: FIT_PADDING,
            size: Point::new(1200.0, 800.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert!(!config.endpoint.is_empty());
        assert_eq!(config.client_tag, "Natalia");
        assert_eq!(config.http.allow_origin, "*");
        assert_eq!(config.http.trace_header, "xhr-name");
        assert_eq!(config.http.timeout_ms, None);
        assert_eq!(config.view.fallback_center, LatLng::new(28.626137, 79.821603));
        assert_eq!(config.view.fallback_zoom, 11.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let empty = AppConfig::default().with_endpoint("  ");
        assert!(matches!(empty.validate(), Err(Error::Config(_))));

        let mut inverted = AppConfig::default();
        inverted.markers.thresholds = TemperatureThresholds::new(30.0, 10.0);
        assert!(matches!(inverted.validate(), Err(Error::Config(_))));

        let mut tiny = AppConfig::default();
        tiny.markers.icon_size = 0.0;
        assert!(tiny.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"endpoint": "http://stations.test/api/"}"#).unwrap();

        assert_eq!(config.endpoint, "http://stations.test/api/");
        assert_eq!(config.client_tag, "Natalia");
        assert_eq!(config.markers, MarkerConfig::default());
    }
}
