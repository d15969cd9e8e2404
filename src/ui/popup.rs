use crate::core::config::MarkerConfig;
use crate::data::station::Station;
use crate::layers::icon::TemperatureBand;

/// What the user asked for from inside the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Edit,
    Delete,
    Close,
}

/// Details of the selected station
///
/// Holds nothing of its own: it borrows the station and is rebuilt whenever
/// the parent view decides the popup is visible.
#[derive(Debug, Clone, Copy)]
pub struct StationPopup<'a> {
    station: &'a Station,
    band: TemperatureBand,
}

impl<'a> StationPopup<'a> {
    pub fn new(station: &'a Station, config: &MarkerConfig) -> Self {
        Self {
            station,
            band: TemperatureBand::classify(station.temperature, &config.thresholds),
        }
    }

    pub fn station(&self) -> &'a Station {
        self.station
    }

    pub fn title(&self) -> &'a str {
        &self.station.ubication
    }

    pub fn band(&self) -> TemperatureBand {
        self.band
    }

    /// Label/value pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.station.ubication.clone()),
            ("Temperature", format!("{} °C", self.station.temperature)),
            ("Latitude", format!("{:.6}", self.station.latitude)),
            ("Longitude", format!("{:.6}", self.station.longitude)),
        ]
    }

    #[cfg(feature = "egui")]
    pub fn show(&self, ui: &mut egui::Ui) -> Option<PopupAction> {
        let [r, g, b] = self.band.color();
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::from_rgb(r, g, b), "⏺");
            ui.strong(self.title());
        });
        ui.separator();

        egui::Grid::new(("station_popup", self.station.id.as_str()))
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for (label, value) in self.rows() {
                    ui.label(label);
                    ui.label(value);
                    ui.end_row();
                }
            });

        ui.separator();
        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button("Edit").clicked() {
                action = Some(PopupAction::Edit);
            }
            if ui.button("Delete").clicked() {
                action = Some(PopupAction::Delete);
            }
            if ui.button("Close").clicked() {
                action = Some(PopupAction::Close);
            }
        });
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::station::StationId;

    #[test]
    fn test_rows_describe_station() {
        let station = Station {
            id: StationId::new("5"),
            ubication: "Laguna".to_string(),
            latitude: 4.5,
            longitude: -74.25,
            temperature: 27.5,
            client: None,
        };
        let popup = StationPopup::new(&station, &MarkerConfig::default());

        assert_eq!(popup.title(), "Laguna");
        assert_eq!(popup.band(), TemperatureBand::Hot);
        assert_eq!(
            popup.rows(),
            vec![
                ("Name", "Laguna".to_string()),
                ("Temperature", "27.5 °C".to_string()),
                ("Latitude", "4.500000".to_string()),
                ("Longitude", "-74.250000".to_string()),
            ]
        );
    }
}
