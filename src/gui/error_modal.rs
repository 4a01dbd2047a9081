use eframe::egui;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

#[derive(Default, Clone)]
pub struct ErrorData {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
    pub severity: Severity,
}

/// Surfaces failed loads and writes, and the one-time local-only warning.
pub struct ErrorModal {
    open: bool,
    data: ErrorData,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self { open: false, data: ErrorData::default() }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show_error(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) {
        self.open_with(title, message, details, Severity::Error);
    }

    pub fn show_warning(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.open_with(title, message, None, Severity::Warning);
    }

    fn open_with(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
        severity: Severity,
    ) {
        self.data = ErrorData { title: title.into(), message: message.into(), details, severity };
        self.open = true;
    }

    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        if !self.open {
            return false;
        }

        let (icon_color, icon) = match self.data.severity {
            Severity::Error => (egui::Color32::RED, "⚠"),
            Severity::Warning => (egui::Color32::YELLOW, "ℹ"),
        };

        let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
            ui.set_width(420.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icon).size(24.0).color(icon_color));
                ui.label(egui::RichText::new(&self.data.title).size(18.0).strong());
            });

            ui.add_space(10.0);
            ui.label(egui::RichText::new(&self.data.message).size(14.0));

            if let Some(details) = &self.data.details {
                ui.add_space(10.0);
                ui.collapsing("Technical Details", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut details.as_str())
                            .desired_width(f32::INFINITY)
                            .desired_rows(3)
                            .code_editor(),
                    );
                });
            }

            ui.add_space(15.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
            self.data = ErrorData::default();
            return true;
        }

        false
    }
}

impl Default for ErrorModal {
    fn default() -> Self {
        Self::new()
    }
}
