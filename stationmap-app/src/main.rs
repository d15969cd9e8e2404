use std::sync::Arc;
use std::time::Duration;

use stationmap::{
    constants::MSG_CONFIRM_DELETE,
    prelude::{
        AppConfig, Completion, FormField, FormKind, MapView, Notification, PendingRequest,
        Point, PopupAction, RequestRunner, StationService, ViewState,
    },
};

/// Desktop dashboard for the weather station service
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stationmap::init_logging();

    let config = AppConfig::from_env()?;
    log::info!("using station endpoint {}", config.endpoint);

    let service = StationService::from_config(&config)?;
    let runner = RequestRunner::current(Arc::new(service))?;

    let size = config.view.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([size.x as f32, size.y as f32])
            .with_title("Stationmap - Weather Stations"),
        ..Default::default()
    };

    eframe::run_native(
        "stationmap-app",
        options,
        Box::new(move |cc| Box::new(StationMapApp::new(cc, config, runner))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

struct StationMapApp {
    view: MapView,
    runner: RequestRunner,
    /// Requests spawned and not yet completed
    outstanding: usize,
}

impl StationMapApp {
    fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, runner: RequestRunner) -> Self {
        let mut app = Self {
            view: MapView::new(config),
            runner,
            outstanding: 0,
        };
        let pending = app.view.begin_load();
        app.submit(pending);
        app
    }

    fn submit(&mut self, pending: PendingRequest) {
        self.outstanding += 1;
        self.runner.submit(pending);
    }

    fn drain_completions(&mut self) {
        for Completion { pending, result } in self.runner.poll() {
            self.outstanding = self.outstanding.saturating_sub(1);
            if let Some(next) = self.view.complete(&pending, result) {
                self.submit(next);
            }
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            let idle = !self.view.state().is_loading() && self.view.state().form().is_none();
            if ui.add_enabled(idle, egui::Button::new("Add station")).clicked() {
                self.view.open_create_form();
            }
            let loading = self.view.state().is_loading();
            if ui.add_enabled(!loading, egui::Button::new("Reload")).clicked() {
                let pending = self.view.reload();
                self.submit(pending);
            }
            if ui.button("Center on stations").clicked() {
                self.view.fit_to_markers();
            }

            ui.separator();
            if self.view.state().is_loading() {
                ui.spinner();
                ui.label("Loading stations...");
            } else {
                ui.label(format!("{} stations", self.view.stations().len()));
            }
            if self.view.is_busy() {
                ui.spinner();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let viewport = self.view.viewport();
                ui.label(format!(
                    "Center: {:.4}, {:.4} | Zoom: {:.2}",
                    viewport.center.lat, viewport.center.lng, viewport.zoom
                ));
            });
        });
    }

    fn map_canvas(&mut self, ui: &mut egui::Ui, interactive: bool) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.view
            .set_viewport_size(Point::new(rect.width() as f64, rect.height() as f64));

        let to_local = |pos: egui::Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

        if interactive {
            if response.hovered() {
                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll.abs() > 0.1 {
                    let focus = response.hover_pos().map(to_local);
                    self.view.viewport_mut().zoom_by(scroll as f64 * 0.002, focus);
                }
            }
            if response.dragged() {
                let delta = response.drag_delta();
                self.view
                    .viewport_mut()
                    .pan(Point::new(-delta.x as f64, -delta.y as f64));
            }
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if self.view.select_at(to_local(pos)).is_none() {
                        self.view.close_popup();
                    }
                }
            }
        }

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(230, 230, 230));

        let viewport = self.view.viewport();
        let (selected, plain): (Vec<_>, Vec<_>) =
            self.view.markers().iter().partition(|m| m.is_selected());
        for marker in plain.into_iter().chain(selected) {
            let pixel = viewport.lat_lng_to_pixel(&marker.position());
            let center = rect.min + egui::vec2(pixel.x as f32, pixel.y as f32);
            if !rect.expand(marker.icon().size).contains(center) {
                continue;
            }
            let [r, g, b] = marker.icon().color();
            let radius = marker.icon().size / 2.0;
            painter.circle_filled(center, radius, egui::Color32::from_rgb(r, g, b));
            painter.circle_stroke(
                center,
                radius,
                egui::Stroke::new(if marker.is_selected() { 3.0 } else { 1.0 }, egui::Color32::WHITE),
            );
        }
    }

    fn popup_window(&mut self, ctx: &egui::Context, enabled: bool) {
        let action = self.view.popup().and_then(|popup| {
            egui::Window::new(popup.title())
                .id(egui::Id::new("station_popup"))
                .collapsible(false)
                .resizable(false)
                .enabled(enabled)
                .show(ctx, |ui| popup.show(ui))
                .and_then(|r| r.inner)
                .flatten()
        });

        match action {
            Some(PopupAction::Edit) => {
                self.view.open_update_form();
            }
            Some(PopupAction::Delete) => {
                self.view.request_delete();
            }
            Some(PopupAction::Close) => self.view.close_popup(),
            None => {}
        }
    }

    fn form_window(&mut self, ctx: &egui::Context, kind: &FormKind, enabled: bool) {
        let create = matches!(kind, FormKind::Create { .. });
        let title = if create { "New station" } else { "Edit station" };
        let busy = self.view.is_busy();
        let errors = self.view.form_errors().cloned();
        let error_color = egui::Color32::from_rgb(231, 76, 60);

        let mut submit = false;
        let mut delete = false;
        let mut cancel = false;

        let form = if create {
            self.view.create_form_mut()
        } else {
            self.view.update_form_mut()
        };
        egui::Window::new(title)
            .id(egui::Id::new("station_form"))
            .collapsible(false)
            .resizable(false)
            .enabled(enabled)
            .show(ctx, |ui| {
                egui::Grid::new("station_form_grid")
                    .num_columns(2)
                    .show(ui, |ui| {
                        let fields = [
                            (FormField::Name, &mut form.name),
                            (FormField::Temperature, &mut form.temperature),
                            (FormField::Latitude, &mut form.latitude),
                            (FormField::Longitude, &mut form.longitude),
                        ];
                        for (field, value) in fields {
                            ui.label(field.label());
                            ui.text_edit_singleline(value);
                            ui.end_row();
                            if let Some(errors) = &errors {
                                for error in errors.for_field(field) {
                                    ui.label("");
                                    ui.colored_label(error_color, error.to_string());
                                    ui.end_row();
                                }
                            }
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    let label = if create { "Create" } else { "Save" };
                    if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                        submit = true;
                    }
                    if !create && ui.add_enabled(!busy, egui::Button::new("Delete")).clicked() {
                        delete = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    if busy {
                        ui.spinner();
                    }
                });
            });

        if submit {
            let pending = if create {
                self.view.submit_create()
            } else {
                self.view.submit_update()
            };
            if let Some(pending) = pending {
                self.submit(pending);
            }
        }
        if delete {
            self.view.request_delete();
        }
        if cancel {
            self.view.cancel_form();
        }
    }

    fn confirm_delete_window(&mut self, ctx: &egui::Context, enabled: bool) {
        let mut confirm = false;
        let mut cancel = false;

        egui::Window::new("Delete station")
            .id(egui::Id::new("confirm_delete"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .enabled(enabled)
            .show(ctx, |ui| {
                ui.label(MSG_CONFIRM_DELETE);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if confirm {
            if let Some(pending) = self.view.confirm_delete() {
                self.submit(pending);
            }
        } else if cancel {
            self.view.cancel_delete();
        }
    }

    fn notification_window(&mut self, ctx: &egui::Context, notification: &Notification) {
        let mut dismissed = false;
        let [r, g, b] = notification.icon.color();
        let confirm_fill = hex_color(notification.confirm_color).unwrap_or(egui::Color32::DARK_GREEN);

        egui::Window::new("Notice")
            .id(egui::Id::new("notification"))
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(notification.icon.symbol())
                            .size(32.0)
                            .color(egui::Color32::from_rgb(r, g, b)),
                    );
                    ui.label(notification.message.as_str());
                    ui.add_space(8.0);
                    let button = egui::Button::new(
                        egui::RichText::new(notification.confirm_text).color(egui::Color32::WHITE),
                    )
                    .fill(confirm_fill);
                    if ui.add(button).clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.view.notifications_mut().dismiss();
        }
    }
}

/// Parses `#rrggbb`
fn hex_color(hex: &str) -> Option<egui::Color32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(egui::Color32::from_rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

impl eframe::App for StationMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_completions();

        let notification = self.view.notifications().current().cloned();
        let interactive = notification.is_none();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_enabled_ui(interactive, |ui| self.top_bar(ui));
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.map_canvas(ui, interactive));

        match self.view.state().clone() {
            ViewState::FormOpen(kind) => self.form_window(ctx, &kind, interactive),
            ViewState::ConfirmDelete(_) => {
                self.popup_window(ctx, false);
                self.confirm_delete_window(ctx, interactive);
            }
            ViewState::StationSelected(_) => self.popup_window(ctx, interactive),
            ViewState::Loading | ViewState::Idle => {}
        }

        if let Some(notification) = notification {
            self.notification_window(ctx, &notification);
        }

        if self.outstanding > 0 {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#28ae60"), Some(egui::Color32::from_rgb(0x28, 0xae, 0x60)));
        assert_eq!(hex_color("28ae60"), Some(egui::Color32::from_rgb(0x28, 0xae, 0x60)));
        assert_eq!(hex_color("#fff"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
        assert_eq!(hex_color("#+28ae6"), None);
    }
}
