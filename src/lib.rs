//! # stationmap
//!
//! Weather station dashboard core.
//!
//! Stations are fetched from a REST endpoint and shown as markers on a map.
//! The library holds everything that is not pixels: the station data model,
//! the HTTP client wrapper and data-access service, field validators, the
//! marker icon policy, viewport fitting, the popup view-model, notifications
//! and the [`MapView`] state machine that ties them together. A host (see the
//! `stationmap-app` crate) only draws what the view exposes and forwards user
//! input back into it.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::AppConfig,
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use data::{
    http::HttpClient,
    request::{StationRequest, StationResponse},
    service::{StationApi, StationService},
    station::{DtoStation, Station, StationId},
};

pub use layers::{
    icon::{MarkerIcon, TemperatureBand, TemperatureThresholds},
    manager::MarkerLayer,
    marker::Marker,
};

pub use ui::{
    form::{FormErrors, StationForm},
    map_view::{MapView, PendingRequest, Ticket},
    notification::{Notification, NotificationIcon, NotificationQueue},
    popup::{PopupAction, StationPopup},
    state::{FormKind, ViewState},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
