use eframe::egui;

use crate::core::DeckSettings;

/// Edits the spreadsheet id, update endpoint and timeout.
pub struct SettingsModal {
    open: bool,
    original: DeckSettings,
    temp: DeckSettings,
    timeout_input: String,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self {
            open: false,
            original: DeckSettings::default(),
            temp: DeckSettings::default(),
            timeout_input: String::new(),
        }
    }

    pub fn open_settings(&mut self, current: DeckSettings) {
        self.timeout_input = current.request_timeout_secs.to_string();
        self.original = current.clone();
        self.temp = current;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn parsed_timeout(&self) -> Option<u64> {
        self.timeout_input.trim().parse::<u64>().ok().filter(|secs| (1..=120).contains(secs))
    }

    fn is_dirty(&self) -> bool {
        self.temp.sheet_id != self.original.sheet_id
            || self.temp.update_url != self.original.update_url
            || self.parsed_timeout() != Some(self.original.request_timeout_secs)
    }

    /// Returns the new settings when the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<DeckSettings> {
        if !self.open {
            return None;
        }

        let mut result: Option<DeckSettings> = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(480.0);
            ui.heading("Spreadsheet Settings");
            ui.add_space(10.0);

            egui::Grid::new("settings_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Spreadsheet id");
                ui.add(egui::TextEdit::singleline(&mut self.temp.sheet_id).desired_width(300.0));
                ui.end_row();

                ui.label("Update endpoint");
                ui.add(egui::TextEdit::singleline(&mut self.temp.update_url).desired_width(300.0));
                ui.end_row();

                ui.label("Timeout (s)");
                ui.add(egui::TextEdit::singleline(&mut self.timeout_input).desired_width(60.0));
                ui.end_row();
            });

            ui.add_space(5.0);

            if self.temp.update_endpoint().is_none() {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::YELLOW, "⚠");
                    ui.label("No usable update endpoint: changes will be kept locally only.");
                });
            }
            if self.parsed_timeout().is_none() {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, "⚠");
                    ui.label("Timeout must be between 1 and 120 seconds.");
                });
            }

            ui.separator();

            ui.horizontal(|ui| {
                let can_save = self.is_dirty() && self.parsed_timeout().is_some();
                if ui.add_enabled(can_save, egui::Button::new("Save and Reload")).clicked() {
                    if let Some(timeout) = self.parsed_timeout() {
                        let mut settings = self.temp.clone();
                        settings.request_timeout_secs = timeout;
                        result = Some(settings);
                        ui.close();
                    }
                }
                if ui.button("Cancel").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
