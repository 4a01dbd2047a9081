use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::core::{
    Category,
    CategoryCounts,
};

pub fn category_menu(
    ui: &mut egui::Ui,
    theme: &Theme,
    counts: &CategoryCounts,
    total: usize,
    actions: &mut ActionQueue,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(theme.heading(ui.ctx(), "Choose what to study").size(26.0));
        ui.add_space(6.0);
        ui.label(theme.muted(ui.ctx(), &format!("{total} words in the sheet")));
        ui.add_space(24.0);

        for category in Category::ALL {
            let count = counts.get(category);
            let text = egui::RichText::new(format!("{}  ({count})", category.label())).size(18.0);
            let button = egui::Button::new(text).min_size(egui::vec2(240.0, 44.0));
            if ui.add(button).clicked() {
                actions.push(UiAction::EnterCategory(category));
            }
            ui.add_space(8.0);
        }

        if total == 0 {
            ui.add_space(16.0);
            if ui.button("Reload vocabulary").clicked() {
                actions.push(UiAction::Reload);
            }
        }
    });
}
