use crate::constants::{COLD_BELOW, HOT_ABOVE};
use crate::core::config::MarkerConfig;
use serde::{Deserialize, Serialize};

/// Temperatures splitting the three marker colours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureThresholds {
    /// Strictly below this is cold
    pub cold_below: f64,
    /// Strictly above this is hot
    pub hot_above: f64,
}

impl TemperatureThresholds {
    pub fn new(cold_below: f64, hot_above: f64) -> Self {
        Self {
            cold_below,
            hot_above,
        }
    }
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self::new(COLD_BELOW, HOT_ABOVE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    Cold,
    Neutral,
    Hot,
}

impl TemperatureBand {
    /// Both thresholds belong to the neutral band
    pub fn classify(temperature: f64, thresholds: &TemperatureThresholds) -> Self {
        if temperature < thresholds.cold_below {
            TemperatureBand::Cold
        } else if temperature > thresholds.hot_above {
            TemperatureBand::Hot
        } else {
            TemperatureBand::Neutral
        }
    }

    fn asset_stem(&self) -> &'static str {
        match self {
            TemperatureBand::Cold => "marker_blue",
            TemperatureBand::Neutral => "marker_green",
            TemperatureBand::Hot => "marker_red",
        }
    }

    /// Display colour as RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            TemperatureBand::Cold => [41, 121, 255],
            TemperatureBand::Neutral => [40, 174, 96],
            TemperatureBand::Hot => [231, 76, 60],
        }
    }
}

impl std::fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemperatureBand::Cold => write!(f, "cold"),
            TemperatureBand::Neutral => write!(f, "neutral"),
            TemperatureBand::Hot => write!(f, "hot"),
        }
    }
}

/// The icon a marker is drawn with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerIcon {
    pub band: TemperatureBand,
    pub selected: bool,
    /// Edge length of the square icon in pixels
    pub size: f32,
}

impl MarkerIcon {
    pub fn for_temperature(temperature: f64, selected: bool, config: &MarkerConfig) -> Self {
        Self {
            band: TemperatureBand::classify(temperature, &config.thresholds),
            selected,
            size: if selected {
                config.selected_icon_size
            } else {
                config.icon_size
            },
        }
    }

    /// Image path of the icon, e.g. `assets/image/marker_red_selected.png`
    pub fn asset_path(&self) -> String {
        let suffix = if self.selected { "_selected" } else { "" };
        format!("assets/image/{}{}.png", self.band.asset_stem(), suffix)
    }

    pub fn color(&self) -> [u8; 3] {
        self.band.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        let thresholds = TemperatureThresholds::default();

        assert_eq!(TemperatureBand::classify(-3.0, &thresholds), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::classify(14.99, &thresholds), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::classify(15.0, &thresholds), TemperatureBand::Neutral);
        assert_eq!(TemperatureBand::classify(20.0, &thresholds), TemperatureBand::Neutral);
        assert_eq!(TemperatureBand::classify(25.0, &thresholds), TemperatureBand::Neutral);
        assert_eq!(TemperatureBand::classify(25.01, &thresholds), TemperatureBand::Hot);
        assert_eq!(TemperatureBand::classify(41.0, &thresholds), TemperatureBand::Hot);
    }

    #[test]
    fn test_every_temperature_lands_in_the_right_band() {
        let thresholds = TemperatureThresholds::default();
        for tenth in -500..=600 {
            let t = tenth as f64 / 10.0;
            let expected = if t < 15.0 {
                TemperatureBand::Cold
            } else if t > 25.0 {
                TemperatureBand::Hot
            } else {
                TemperatureBand::Neutral
            };
            assert_eq!(TemperatureBand::classify(t, &thresholds), expected, "t = {}", t);
        }
    }

    #[test]
    fn test_selected_icon_is_enlarged_variant() {
        let config = MarkerConfig::default();
        let normal = MarkerIcon::for_temperature(30.0, false, &config);
        let selected = MarkerIcon::for_temperature(30.0, true, &config);

        assert_eq!(normal.band, selected.band);
        assert_eq!(normal.size, 25.0);
        assert_eq!(selected.size, 55.0);
        assert_eq!(normal.asset_path(), "assets/image/marker_red.png");
        assert_eq!(selected.asset_path(), "assets/image/marker_red_selected.png");
        assert_eq!(
            MarkerIcon::for_temperature(2.0, false, &config).asset_path(),
            "assets/image/marker_blue.png"
        );
    }
}
