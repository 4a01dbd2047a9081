use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::{
    core::{
        Category,
        Flag,
        VocabItem,
    },
    deck::FlowState,
};

pub struct CardView<'a> {
    pub state: FlowState,
    pub category: Category,
    pub item: Option<&'a VocabItem>,
    pub queue_len: usize,
    pub busy: bool, // an update is in flight
    pub shortcuts: bool,
}

pub fn card_view(ui: &mut egui::Ui, theme: &Theme, view: &CardView<'_>, actions: &mut ActionQueue) {
    ui.horizontal(|ui| {
        if ui.button("⬅ Menu").clicked() {
            actions.push(UiAction::ExitCategory);
        }
        ui.label(theme.heading(ui.ctx(), view.category.label()));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(theme.muted(ui.ctx(), &format!("{} in queue", view.queue_len)));
        });
    });
    ui.separator();

    match (view.state, view.item) {
        (FlowState::Front, Some(item)) => front(ui, theme, item, actions),
        (FlowState::Back, Some(item)) => back(ui, theme, view, item, actions),
        _ => empty(ui, theme, view.category, actions),
    }

    if view.shortcuts {
        keyboard_shortcuts(ui, view, actions);
    }
}

fn term_heading(ui: &mut egui::Ui, theme: &Theme, item: &VocabItem) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&item.term).size(96.0).strong());
        ui.label(
            egui::RichText::new(item.tone.glyph())
                .size(48.0)
                .color(theme.tone(ui.ctx(), item.tone)),
        );
    });
}

fn front(ui: &mut egui::Ui, theme: &Theme, item: &VocabItem, actions: &mut ActionQueue) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        term_heading(ui, theme, item);
        ui.add_space(30.0);
        let reveal = egui::Button::new(egui::RichText::new("Show answer").size(18.0))
            .min_size(egui::vec2(200.0, 40.0));
        if ui.add(reveal).clicked() {
            actions.push(UiAction::Reveal);
        }
    });
}

fn back(
    ui: &mut egui::Ui,
    theme: &Theme,
    view: &CardView<'_>,
    item: &VocabItem,
    actions: &mut ActionQueue,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        term_heading(ui, theme, item);
        ui.label(egui::RichText::new(&item.phonetic_hint).size(28.0).color(theme.cyan(ui.ctx())));
        ui.add_space(6.0);
        ui.label(egui::RichText::new(&item.translation).size(22.0));
        ui.add_space(30.0);

        let ctx = ui.ctx().clone();
        let (green, orange, red) = (theme.green(&ctx), theme.orange(&ctx), theme.red(&ctx));

        ui.horizontal(|ui| {
            let enabled = !view.busy;
            let mut classify =
                |ui: &mut egui::Ui, label: &str, color: egui::Color32, flag: Flag, value: bool| {
                    let button = egui::Button::new(egui::RichText::new(label).size(16.0).color(color))
                        .min_size(egui::vec2(130.0, 36.0));
                    if ui.add_enabled(enabled, button).clicked() {
                        actions.push(UiAction::Classify { flag, value });
                    }
                };

            match view.category {
                Category::Daily => {
                    classify(ui, "Too easy", green, Flag::TooEasy, true);
                    classify(ui, "To learn", orange, Flag::ToLearn, true);
                }
                Category::TooEasy => {
                    classify(ui, "Not so easy", red, Flag::TooEasy, false);
                    classify(ui, "To learn", orange, Flag::ToLearn, true);
                }
                Category::ToLearn => {
                    classify(ui, "Learned", green, Flag::ToLearn, false);
                    classify(ui, "Too easy", green, Flag::TooEasy, true);
                }
            }

            let next = egui::Button::new("Next ➡").min_size(egui::vec2(100.0, 36.0));
            if ui.add_enabled(enabled, next).clicked() {
                actions.push(UiAction::Next);
            }
        });
    });
}

fn empty(ui: &mut egui::Ui, theme: &Theme, category: Category, actions: &mut ActionQueue) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(theme.heading(ui.ctx(), "Nothing left here").size(24.0));
        ui.add_space(6.0);
        ui.label(theme.muted(ui.ctx(), &format!("No words are in \"{}\" right now.", category.label())));
        ui.add_space(20.0);
        if ui.button("Back to menu").clicked() {
            actions.push(UiAction::ExitCategory);
        }
    });
}

fn keyboard_shortcuts(ui: &egui::Ui, view: &CardView<'_>, actions: &mut ActionQueue) {
    let (space, escape) =
        ui.input(|i| (i.key_pressed(egui::Key::Space), i.key_pressed(egui::Key::Escape)));

    if escape {
        actions.push(UiAction::ExitCategory);
    } else if space {
        match view.state {
            FlowState::Front => actions.push(UiAction::Reveal),
            FlowState::Back if !view.busy => actions.push(UiAction::Next),
            _ => {}
        }
    }
}
