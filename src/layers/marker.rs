use crate::core::{
    config::MarkerConfig,
    geo::{LatLng, Point},
    viewport::Viewport,
};
use crate::data::station::{Station, StationId};
use crate::layers::icon::MarkerIcon;

/// Visual representation of one station
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    station_id: StationId,
    position: LatLng,
    temperature: f64,
    icon: MarkerIcon,
}

impl Marker {
    pub fn new(station: &Station, selected: bool, config: &MarkerConfig) -> Self {
        Self {
            station_id: station.id.clone(),
            position: station.position(),
            temperature: station.temperature,
            icon: MarkerIcon::for_temperature(station.temperature, selected, config),
        }
    }

    pub fn station_id(&self) -> &StationId {
        &self.station_id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn icon(&self) -> &MarkerIcon {
        &self.icon
    }

    pub fn is_selected(&self) -> bool {
        self.icon.selected
    }

    /// Swaps between the normal and the enlarged icon of the same band
    pub fn set_selected(&mut self, selected: bool, config: &MarkerConfig) {
        self.icon = MarkerIcon::for_temperature(self.temperature, selected, config);
    }

    /// Whether `pixel` falls on the icon, which is centred on the position
    pub fn hit(&self, viewport: &Viewport, pixel: &Point) -> bool {
        let center = viewport.lat_lng_to_pixel(&self.position);
        let half = f64::from(self.icon.size) / 2.0;
        (pixel.x - center.x).abs() <= half && (pixel.y - center.y).abs() <= half
    }
}
