use crate::constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator latitude limit
const MAX_LATITUDE: f64 = 85.0511287798;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center: Self::clamp_center(center),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    /// Moves to `center` at `zoom` in one step
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = Self::clamp_center(center);
        self.set_zoom(zoom);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// World size in pixels at the given zoom
    fn world_size(zoom: f64) -> f64 {
        TILE_SIZE * 2_f64.powf(zoom)
    }

    /// Projects a LatLng to world pixel coordinates (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let scale = Self::world_size(zoom.unwrap_or(self.zoom));
        let lat = lat_lng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
        Point::new(x, y)
    }

    /// Inverse of [`Viewport::project`]
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let scale = Self::world_size(zoom.unwrap_or(self.zoom));

        let lng = pixel.x / scale * 360.0 - 180.0;
        let n = PI - 2.0 * PI * pixel.y / scale;
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let offset = self
            .project(lat_lng, None)
            .subtract(&self.project(&self.center, None));
        Point::new(offset.x + self.size.x / 2.0, offset.y + self.size.y / 2.0)
    }

    /// Converts container pixel coordinates back to a geographical coordinate
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let offset = Point::new(pixel.x - self.size.x / 2.0, pixel.y - self.size.y / 2.0);
        let world = self.project(&self.center, None).add(&offset);
        self.unproject(&world, None)
    }

    /// Shifts the center by `delta` screen pixels
    pub fn pan(&mut self, delta: Point) {
        let world = self.project(&self.center, None).add(&delta);
        self.center = Self::clamp_center(self.unproject(&world, None));
    }

    /// Zooms by `delta` levels, keeping `focus` (a container pixel) fixed on screen
    pub fn zoom_by(&mut self, delta: f64, focus: Option<Point>) {
        let anchor = focus.map(|pixel| (pixel, self.pixel_to_lat_lng(&pixel)));
        self.set_zoom(self.zoom + delta);

        if let Some((pixel, lat_lng)) = anchor {
            let moved = self.lat_lng_to_pixel(&lat_lng);
            self.pan(moved.subtract(&pixel));
        }
    }

    /// Geographical bounds of the visible area
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&self.size);
        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Centers on `bounds` at the highest zoom that still shows all of it
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) {
        let available = Point::new(
            (self.size.x - 2.0 * padding).max(1.0),
            (self.size.y - 2.0 * padding).max(1.0),
        );

        let mut best_zoom = self.min_zoom;
        for test_zoom in (self.min_zoom.ceil() as i32)..=(self.max_zoom.floor() as i32) {
            let zoom = test_zoom as f64;
            let nw = self.project(&bounds.north_west(), Some(zoom));
            let se = self.project(&bounds.south_east(), Some(zoom));

            if (se.x - nw.x).abs() <= available.x && (se.y - nw.y).abs() <= available.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        log::debug!("fit bounds {:?} -> zoom {}", bounds, best_zoom);
        self.set_view(bounds.center(), best_zoom);
    }

    fn clamp_center(center: LatLng) -> LatLng {
        LatLng::new(
            center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            center.lng.clamp(-180.0, 180.0),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(LatLng::new(40.7128, -74.0060), 25.0, Point::new(800.0, 600.0));

        assert_eq!(viewport.zoom, MAX_ZOOM);
        assert_eq!(viewport.center.lat, 40.7128);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let viewport = Viewport::new(LatLng::new(10.0, 20.0), 5.0, Point::new(512.0, 512.0));

        let center_pixel = viewport.lat_lng_to_pixel(&LatLng::new(10.0, 20.0));
        assert!((center_pixel.x - 256.0).abs() < 1e-6);
        assert!((center_pixel.y - 256.0).abs() < 1e-6);

        let back = viewport.pixel_to_lat_lng(&Point::new(100.0, 400.0));
        let again = viewport.lat_lng_to_pixel(&back);
        assert!((again.x - 100.0).abs() < 1e-6);
        assert!((again.y - 400.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(512.0, 512.0));

        viewport.pan(Point::new(10.0, 10.0));
        assert!(viewport.center.lng > 0.0);
        assert!(viewport.center.lat < 0.0);
    }

    #[test]
    fn test_zoom_by_keeps_focus() {
        let mut viewport = Viewport::new(LatLng::new(45.0, 10.0), 6.0, Point::new(800.0, 600.0));
        let focus = Point::new(600.0, 150.0);
        let before = viewport.pixel_to_lat_lng(&focus);

        viewport.zoom_by(1.0, Some(focus));

        assert_eq!(viewport.zoom, 7.0);
        let after = viewport.lat_lng_to_pixel(&before);
        assert!((after.x - focus.x).abs() < 1e-6);
        assert!((after.y - focus.y).abs() < 1e-6);
    }

    #[test]
    fn test_fit_bounds_shows_every_corner() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 16.0, Point::new(800.0, 600.0));
        let bounds = LatLngBounds::new(LatLng::new(4.5, -74.2), LatLng::new(6.3, -73.0));

        viewport.fit_bounds(&bounds, 20.0);

        assert_eq!(viewport.center, bounds.center());
        assert!(viewport.zoom < 16.0);
        let visible = viewport.bounds();
        assert!(visible.contains(&bounds.south_west));
        assert!(visible.contains(&bounds.north_east));
    }

    #[test]
    fn test_fit_bounds_single_point_uses_max_zoom() {
        let mut viewport = Viewport::default();
        let point = LatLng::new(10.0, 20.0);

        viewport.fit_bounds(&LatLngBounds::new(point, point), 20.0);

        assert_eq!(viewport.zoom, MAX_ZOOM);
        assert_eq!(viewport.center, point);
    }
}
