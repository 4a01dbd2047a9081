use eframe::egui::{
    self,
    containers,
};

use super::actions::{
    ActionQueue,
    UiAction,
};

pub struct StoreStatus {
    pub loaded: bool,
    pub writable: bool,
    pub busy: bool,
}

pub struct TopBar;

impl TopBar {
    pub fn show(ctx: &egui::Context, status: &StoreStatus, actions: &mut ActionQueue) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.add_enabled(!status.busy, egui::Button::new("Reload Vocabulary")).clicked() {
                        actions.push(UiAction::Reload);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Settings", |ui| {
                    if ui.button("Spreadsheet Settings").clicked() {
                        actions.push(UiAction::OpenSettings);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicators(ui, status);
                });
            });
        });
    }

    fn show_status_indicators(ui: &mut egui::Ui, status: &StoreStatus) {
        let indicator = |ui: &mut egui::Ui, label: &str, ok: bool, tooltip: &str| {
            let color = if ok {
                egui::Color32::from_rgb(0, 200, 0)
            } else {
                egui::Color32::from_rgb(200, 80, 80)
            };
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 2.0;
                ui.small(label).on_hover_text(tooltip);
                ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
            });
        };

        let write_tooltip =
            if status.writable { "Changes are saved to the sheet" } else { "Local-only mode" };
        indicator(ui, "Sync", status.writable, write_tooltip);

        ui.add_space(3.0);

        let read_tooltip = if status.loaded { "Vocabulary loaded" } else { "No vocabulary loaded" };
        indicator(ui, "Sheet", status.loaded, read_tooltip);
    }
}
