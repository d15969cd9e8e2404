//! Prelude module for common stationmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use stationmap::prelude::*;`

pub use crate::core::{
    config::{AppConfig, HttpConfig, MarkerConfig, ViewConfig},
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use crate::data::{
    http::HttpClient,
    request::{StationRequest, StationResponse},
    service::{StationApi, StationService},
    station::{DtoStation, Station, StationId},
};

pub use crate::layers::{
    icon::{MarkerIcon, TemperatureBand, TemperatureThresholds},
    manager::MarkerLayer,
    marker::Marker,
};

pub use crate::ui::{
    form::{FieldError, FormErrors, FormField, StationForm},
    map_view::{MapView, PendingRequest, Ticket},
    notification::{Notification, NotificationIcon, NotificationId, NotificationQueue},
    popup::{PopupAction, StationPopup},
    state::{FormKind, ViewState},
    validators::ValidationError,
};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::{Completion, RequestRunner};

pub use crate::{Error, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
