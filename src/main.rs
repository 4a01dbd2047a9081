use hanzideck::{
    core::{
        settings::SETTINGS_FILE,
        DeckSettings,
    },
    gui::DeckApp,
    persistence::load_json_or_default,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hanzideck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = load_json_or_default::<DeckSettings>(SETTINGS_FILE).with_env_overrides();
    info!(sheet_configured = settings.has_sheet(), "starting hanzideck");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Hanzi Deck")
            .with_inner_size([720.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "hanzideck",
        options,
        Box::new(|cc| Ok(Box::new(DeckApp::new(cc, settings)?))),
    )
}
