//! Core constants for the station dashboard.
//! Keeping them in a single place makes it easier to tweak dashboard-wide magic numbers.

/// Default square tile size in pixels, used by the Web Mercator projection.
pub const TILE_SIZE: f64 = 256.0;

/// Endpoint used when none is configured at build or run time.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/stations/";

/// Environment variable that overrides the endpoint (build time and run time).
pub const ENDPOINT_ENV: &str = "STATIONMAP_ENDPOINT";

/// Client tag stamped on every create/update payload.
pub const DEFAULT_CLIENT_TAG: &str = "Natalia";

/// Headers sent with every request.
pub const ALLOW_ORIGIN_HEADER: &str = "access-control-allow-origin";
pub const DEFAULT_ALLOW_ORIGIN: &str = "*";
pub const TRACE_HEADER: &str = "xhr-name";
pub const TRACE_HEADER_VALUE: &str = "consultar registros";

/// Below this temperature a station is drawn with the cold icon.
pub const COLD_BELOW: f64 = 15.0;

/// Above this temperature a station is drawn with the hot icon.
pub const HOT_ABOVE: f64 = 25.0;

/// Marker icon edge length in pixels.
pub const MARKER_ICON_SIZE: f32 = 25.0;

/// Marker icon edge length when selected.
pub const MARKER_ICON_SIZE_SELECTED: f32 = 55.0;

/// Where the map looks when there is nothing to show.
pub const FALLBACK_CENTER: (f64, f64) = (28.626137, 79.821603);
pub const FALLBACK_ZOOM: f64 = 11.0;

/// Zoom used before the first fit.
pub const INITIAL_ZOOM: f64 = 16.0;

/// Zoom limits of the slippy map.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Screen padding kept around markers when fitting the view.
pub const FIT_PADDING: f64 = 20.0;

/// Accepted ranges for form input.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
pub const TEMPERATURE_RANGE: (f64, f64) = (-100.0, 100.0);

/// Notification texts.
pub const MSG_INCOMPLETE_FORM: &str = "Please fill in every field correctly.";
pub const MSG_REQUEST_OK: &str = "Your request was completed successfully.";
pub const MSG_REQUEST_FAILED: &str = "There was a problem with the request. Please try again.";
pub const MSG_CONFIRM_DELETE: &str = "Are you sure you want to delete this station?";
pub const CONFIRM_BUTTON_TEXT: &str = "Understood";
pub const CONFIRM_BUTTON_COLOR: &str = "#28ae60";
