use crate::core::{
    config::MarkerConfig,
    geo::{LatLngBounds, Point},
    viewport::Viewport,
};
use crate::data::station::{Station, StationId};
use crate::layers::marker::Marker;
use crate::prelude::HashMap;

/// Markers keyed by station id
///
/// A marker is only ever reached through its station's id, so inserting or
/// removing one station never disturbs the others.
pub struct MarkerLayer {
    /// All markers indexed by station id
    markers: HashMap<StationId, Marker>,
    /// Insertion order, used for drawing (later markers on top)
    order: Vec<StationId>,
    config: MarkerConfig,
}

impl MarkerLayer {
    pub fn new(config: MarkerConfig) -> Self {
        Self {
            markers: HashMap::default(),
            order: Vec::new(),
            config,
        }
    }

    /// Adds or replaces the marker for `station`; a replaced marker keeps its slot
    pub fn insert(&mut self, station: &Station, selected: bool) {
        let marker = Marker::new(station, selected, &self.config);
        if self.markers.insert(station.id.clone(), marker).is_none() {
            self.order.push(station.id.clone());
        }
    }

    pub fn remove(&mut self, id: &StationId) -> Option<Marker> {
        let removed = self.markers.remove(id);
        if removed.is_some() {
            self.order.retain(|existing| existing != id);
        }
        removed
    }

    pub fn get(&self, id: &StationId) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn contains(&self, id: &StationId) -> bool {
        self.markers.contains_key(id)
    }

    /// Drops every marker and creates one per station
    pub fn rebuild(&mut self, stations: &[Station], selected: Option<&StationId>) {
        self.clear();
        for station in stations {
            self.insert(station, selected == Some(&station.id));
        }
    }

    /// Enlarges the marker of `selected` and shrinks every other one
    pub fn set_selected(&mut self, selected: Option<&StationId>) {
        for (id, marker) in self.markers.iter_mut() {
            let wanted = selected == Some(id);
            if marker.is_selected() != wanted {
                marker.set_selected(wanted, &self.config);
            }
        }
    }

    /// Markers in drawing order
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.order.iter().filter_map(|id| self.markers.get(id))
    }

    /// Bounding box of all markers, `None` when the layer is empty
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.iter().map(|marker| marker.position()))
    }

    /// Topmost marker under `pixel`
    pub fn hit_test(&self, viewport: &Viewport, pixel: &Point) -> Option<&StationId> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.markers.get(id))
            .find(|marker| marker.hit(viewport, pixel))
            .map(|marker| marker.station_id())
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new(MarkerConfig::default())
    }
}
