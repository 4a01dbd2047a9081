use eframe::egui::{
    self,
    Color32,
    RichText,
    Stroke,
    Visuals,
};

use crate::core::ToneMarker;

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Theme {
    pub fn dracula() -> Self {
        Theme { dark: Palette::dracula(), light: Palette::dracula_light() }
    }

    fn palette(&self, ctx: &egui::Context) -> &Palette {
        match ctx.style().visuals.dark_mode {
            true => &self.dark,
            false => &self.light,
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).purple)
    }

    pub fn muted(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).comment)
    }

    pub fn red(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).red
    }

    pub fn green(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).green
    }

    pub fn orange(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).orange
    }

    pub fn cyan(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).cyan
    }

    /// Colour of the tone glyph on the front of a card.
    pub fn tone(&self, ctx: &egui::Context, tone: ToneMarker) -> Color32 {
        let palette = self.palette(ctx);
        match tone {
            ToneMarker::Level => palette.red,
            ToneMarker::Rising => palette.orange,
            ToneMarker::Dipping => palette.green,
            ToneMarker::Falling => palette.cyan,
            ToneMarker::Neutral | ToneMarker::Unknown => palette.comment,
        }
    }
}

#[derive(Clone)]
struct Palette {
    background: Color32,
    foreground: Color32,
    selection: Color32,
    comment: Color32,
    red: Color32,
    orange: Color32,
    green: Color32,
    purple: Color32,
    cyan: Color32,
    background_darker: Color32,
    background_dark: Color32,
    background_light: Color32,
}

impl Palette {
    //Colors from:
    //https://github.com/ShabbirHasan1/egui_dracula/blob/master/src/lib.rs
    fn dracula() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            comment: Color32::from_rgb(0x62, 0x72, 0xa4),
            red: Color32::from_rgb(0xff, 0x55, 0x55),
            orange: Color32::from_rgb(0xff, 0xb8, 0x6c),
            green: Color32::from_rgb(0x50, 0xfa, 0x7b),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(139, 233, 253),
            background_darker: Color32::from_rgb(25, 26, 33),
            background_dark: Color32::from_rgb(33, 35, 53),
            background_light: Color32::from_rgb(52, 54, 66),
        }
    }

    fn dracula_light() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 242),
            foreground: Color32::from_rgb(40, 42, 54),
            selection: Color32::from_rgb(200, 200, 220),
            comment: Color32::from_rgb(120, 130, 160),
            red: Color32::from_rgb(200, 80, 80),
            orange: Color32::from_rgb(220, 150, 90),
            green: Color32::from_rgb(60, 160, 95),
            purple: Color32::from_rgb(150, 120, 220),
            cyan: Color32::from_rgb(60, 150, 200),
            background_darker: Color32::from_rgb(235, 235, 230),
            background_dark: Color32::from_rgb(245, 245, 240),
            background_light: Color32::from_rgb(255, 255, 250),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn set_theme_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (mut visuals, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    visuals.override_text_color = Some(palette.foreground);
    visuals.widgets.inactive.bg_fill = palette.background_light;
    visuals.widgets.inactive.weak_bg_fill = palette.background_light;
    visuals.widgets.hovered.bg_fill = palette.selection;
    visuals.widgets.hovered.weak_bg_fill = palette.selection;
    visuals.widgets.hovered.bg_stroke = Stroke { color: palette.cyan, ..visuals.widgets.hovered.bg_stroke };
    visuals.widgets.active.bg_fill = palette.selection;
    visuals.selection.bg_fill = palette.selection;
    visuals.hyperlink_color = palette.cyan;
    visuals.extreme_bg_color = palette.background_darker;
    visuals.error_fg_color = palette.red;
    visuals.warn_fg_color = palette.orange;
    visuals.window_fill = palette.background;
    visuals.panel_fill = palette.background_dark;

    ctx.set_visuals_of(variant, visuals);
}
