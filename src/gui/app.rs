use std::{
    fs,
    sync::Arc,
    time::Duration,
};

use eframe::egui;
use rand::{
    rngs::StdRng,
    SeedableRng,
};
use tracing::{
    debug,
    error,
    info,
    warn,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    card_view::{
        card_view,
        CardView,
    },
    category_menu::category_menu,
    error_modal::ErrorModal,
    message_overlay::MessageOverlay,
    settings::SettingsModal,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        StoreStatus,
        TopBar,
    },
};
use crate::{
    core::{
        settings::SETTINGS_FILE,
        Category,
        DeckError,
        DeckSettings,
        TaskManager,
        TaskResult,
    },
    deck::{
        ClassifyOutcome,
        FlowState,
        ReviewFlow,
        UpdateReconciler,
        VocabRepository,
        WriteMode,
    },
    persistence::save_json,
    store::{
        RemoteStore,
        SheetStore,
    },
};

pub struct DeckApp {
    // Configuration
    settings: DeckSettings,

    // Study state
    repo: VocabRepository,
    flow: ReviewFlow,
    reconciler: UpdateReconciler,
    rng: StdRng,
    loaded: bool,
    loading: bool,

    // UI State
    theme: Theme,
    actions: ActionQueue,
    message_overlay: MessageOverlay,
    error_modal: ErrorModal,
    settings_modal: SettingsModal,

    // External Services
    store: Option<Arc<SheetStore>>,
    task_manager: TaskManager,
}

impl DeckApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: DeckSettings,
    ) -> Result<Self, DeckError> {
        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, &theme);
        cc.egui_ctx.set_theme(match settings.dark_mode {
            true => egui::Theme::Dark,
            false => egui::Theme::Light,
        });
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        if let Some(path) = &settings.font_path {
            setup_fonts(&cc.egui_ctx, path);
        }

        let mut app = Self {
            settings,
            repo: VocabRepository::empty(),
            flow: ReviewFlow::new(),
            reconciler: UpdateReconciler::new(),
            rng: StdRng::from_os_rng(),
            loaded: false,
            loading: false,
            theme,
            actions: ActionQueue::new(),
            message_overlay: MessageOverlay::new(),
            error_modal: ErrorModal::new(),
            settings_modal: SettingsModal::new(),
            store: None,
            task_manager: TaskManager::new()?,
        };

        app.connect_store();
        app.reload();
        Ok(app)
    }

    fn connect_store(&mut self) {
        self.store = match SheetStore::new(&self.settings) {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                error!(error = %e, "could not build the HTTP client");
                self.error_modal.show_error("Network unavailable", e.to_string(), None);
                None
            }
        };

        if self.settings.update_endpoint().is_none() {
            warn!("no update endpoint configured; classifications will stay local");
        }
    }

    fn can_write(&self) -> bool {
        self.store.as_ref().is_some_and(|store| store.can_write())
    }

    /// Starts a fresh load. A load already running is superseded, not waited for.
    fn reload(&mut self) {
        if !self.settings.has_sheet() {
            self.error_modal.show_warning(
                "No spreadsheet configured",
                "Set the spreadsheet id under Settings to load your vocabulary.",
            );
            return;
        }
        let Some(store) = self.store.clone() else {
            return;
        };

        info!(sheet = %self.settings.sheet_id, "loading vocabulary");
        self.loading = true;
        self.message_overlay.set_message("Loading vocabulary...");
        self.task_manager.load_vocabulary(store);
    }

    fn handle_task_results(&mut self) {
        for result in self.task_manager.poll_results() {
            match result {
                TaskResult::VocabularyLoaded { result: Ok(rows), .. } => {
                    self.repo = VocabRepository::load(rows);
                    self.flow.exit_category();
                    self.loaded = true;
                    self.loading = false;
                }
                TaskResult::VocabularyLoaded { result: Err(e), .. } => {
                    error!(error = %e, "vocabulary load failed");
                    self.repo = VocabRepository::empty();
                    self.flow.exit_category();
                    self.loaded = false;
                    self.loading = false;
                    self.error_modal.show_error(
                        "Could not load vocabulary",
                        "The spreadsheet could not be read. You can retry from the File menu.",
                        Some(e.to_string()),
                    );
                }
                TaskResult::FlagUpdated { pending, result } => {
                    let outcome = self.reconciler.complete(
                        pending,
                        result,
                        &mut self.repo,
                        &mut self.flow,
                        &mut self.rng,
                    );
                    self.handle_outcome(outcome);
                }
            }
        }

        if !self.loading && !self.reconciler.is_in_flight() {
            self.message_overlay.clear_message();
        }
    }

    fn handle_outcome(&mut self, outcome: ClassifyOutcome) {
        match outcome {
            ClassifyOutcome::Applied => {}
            ClassifyOutcome::AppliedLocally { first_warning } => {
                if first_warning {
                    self.error_modal.show_warning(
                        "Saving locally only",
                        "No update endpoint is configured, so changes are kept in this session \
                         only and will not reach the spreadsheet.",
                    );
                }
            }
            ClassifyOutcome::Failed(e) => {
                let title = if e.is_transport() {
                    "Could not reach the spreadsheet"
                } else {
                    "The spreadsheet refused the change"
                };
                self.error_modal.show_error(
                    title,
                    "The card was left unchanged. Try again, or press Next to skip it.",
                    Some(e.to_string()),
                );
            }
        }
    }

    fn apply_actions(&mut self) {
        let actions: Vec<UiAction> = self.actions.drain().collect();
        for action in actions {
            debug!(?action, "ui action");
            match action {
                UiAction::EnterCategory(category) => {
                    self.flow.enter_category(&self.repo, category, &mut self.rng);
                }
                UiAction::Reveal => {
                    self.flow.reveal();
                }
                UiAction::Classify { flag, value } => {
                    let can_write = self.can_write();
                    let pending =
                        match self.reconciler.begin(&self.repo, &self.flow, flag, value, can_write) {
                            Ok(pending) => pending,
                            Err(e) => {
                                debug!(error = %e, "classification refused");
                                continue;
                            }
                        };

                    match (pending.mode, self.store.clone()) {
                        (WriteMode::Remote, Some(store)) => {
                            self.message_overlay.set_message("Saving...");
                            self.task_manager.submit_update(store, pending);
                        }
                        _ => {
                            let outcome = self.reconciler.complete(
                                pending,
                                Ok(()),
                                &mut self.repo,
                                &mut self.flow,
                                &mut self.rng,
                            );
                            self.handle_outcome(outcome);
                        }
                    }
                }
                UiAction::Next => {
                    // Never move past a card whose update has not settled.
                    if !self.reconciler.is_in_flight() {
                        self.flow.next(&self.repo, &mut self.rng);
                    }
                }
                UiAction::ExitCategory => self.flow.exit_category(),
                UiAction::Reload => self.reload(),
                UiAction::OpenSettings => self.settings_modal.open_settings(self.settings.clone()),
            }
        }
    }

    fn apply_settings(&mut self, settings: DeckSettings) {
        if let Err(e) = save_json(&settings, SETTINGS_FILE) {
            error!(error = %e, "failed to save settings");
            self.error_modal.show_error("Could not save settings", e.to_string(), None);
        }
        self.settings = settings;
        self.connect_store();
        self.reload();
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_task_results();

        let status = StoreStatus {
            loaded: self.loaded,
            writable: self.can_write(),
            busy: self.loading,
        };
        TopBar::show(ctx, &status, &mut self.actions);

        let modal_open = self.error_modal.is_open() || self.settings_modal.is_open();

        egui::CentralPanel::default().show(ctx, |ui| match self.flow.state() {
            FlowState::Menu => {
                let counts = self.repo.counts();
                category_menu(ui, &self.theme, &counts, self.repo.len(), &mut self.actions);
            }
            state => {
                let session = self.flow.session();
                let view = CardView {
                    state,
                    category: session.map(|s| s.category).unwrap_or(Category::Daily),
                    item: self.flow.current_item(&self.repo),
                    queue_len: session.map(|s| s.queue.len()).unwrap_or_default(),
                    busy: self.reconciler.is_in_flight(),
                    shortcuts: !modal_open,
                };
                card_view(ui, &self.theme, &view, &mut self.actions);
            }
        });

        self.message_overlay.show(ctx, &self.theme);
        self.error_modal.show(ctx);
        if let Some(settings) = self.settings_modal.show(ctx) {
            self.apply_settings(settings);
        }

        self.apply_actions();

        if self.loading || self.reconciler.is_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Registers a user-supplied font ahead of egui's defaults so hanzi render.
fn setup_fonts(ctx: &egui::Context, path: &str) {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path, error = %e, "could not read font; hanzi may not render");
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("deck_font".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, "deck_font".to_owned());
    fonts.families.entry(egui::FontFamily::Monospace).or_default().push("deck_font".to_owned());
    ctx.set_fonts(fonts);
}
