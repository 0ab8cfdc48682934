//! Main application UI.
//! Landing screen for picking a document and generating a deck, workspace
//! screen for studying it card by card.

use chrono::{Datelike, Local};
use eframe::egui;
use flashcards_gen::client::GenerationClient;
use flashcards_gen::error::GenerateError;
use flashcards_gen::export::json::{default_export_name, export_json_to_path, import_json};
use flashcards_gen::models::session::RESET_PROMPT;
use flashcards_gen::models::{CardFace, Deck, DeckSession, Mode, ResetRequest, TransitionTimer};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(241, 109, 52);
const NAVY: egui::Color32 = egui::Color32::from_rgb(22, 30, 84);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
const MUTED: egui::Color32 = egui::Color32::from_rgb(100, 116, 139);

pub struct FlashcardsApp {
    session: DeckSession,
    timer: TransitionTimer,
    client: GenerationClient,
    generation_receiver: Option<Receiver<Result<Deck, GenerateError>>>,

    pending_reset: Option<ResetRequest>,

    show_result_dialog: bool,
    result_message: String,
}

/// Display name of a path, without its directories
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for FlashcardsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_generation();
        self.poll_transition(ctx);

        self.render_navbar(ctx);
        self.render_footer(ctx);
        match self.session.mode() {
            Mode::Browsing => self.render_workspace(ctx),
            Mode::Empty | Mode::Loading => self.render_landing(ctx),
        }

        // New File confirmation
        if let Some(request) = self.pending_reset {
            egui::Window::new("New File")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(RESET_PROMPT);
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.session.resolve_reset(request, false);
                            self.pending_reset = None;
                        }

                        if ui.button("Yes").clicked() {
                            if self.session.resolve_reset(request, true) {
                                self.timer.cancel();
                                info!("Deck cleared");
                            }
                            self.pending_reset = None;
                        }
                    });
                });
        }

        if self.show_result_dialog {
            egui::Window::new("Save Deck")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }
    }
}

impl FlashcardsApp {
    pub fn new(client: GenerationClient) -> Self {
        Self {
            session: DeckSession::new(),
            timer: TransitionTimer::default(),
            client,
            generation_receiver: None,
            pending_reset: None,
            show_result_dialog: false,
            result_message: String::new(),
        }
    }

    /// Uploads the selected file on a worker thread; the result arrives through a channel
    fn start_generation(&mut self, ctx: &egui::Context) {
        let Some(path) = self.session.begin_generation() else {
            return;
        };
        info!(
            "Generating flashcards from {} via {}",
            path.display(),
            self.client.upload_url()
        );

        let (sender, receiver) = mpsc::channel();
        self.generation_receiver = Some(receiver);

        let client = self.client.clone();
        let ctx_clone = ctx.clone();
        thread::spawn(move || {
            let result = client.generate(&path);
            let _ = sender.send(result);
            ctx_clone.request_repaint();
        });
    }

    fn poll_generation(&mut self) {
        let polled = match &self.generation_receiver {
            Some(receiver) => receiver.try_recv(),
            None => return,
        };

        let result = match polled {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                Err(GenerateError::network("generation worker stopped"))
            }
        };
        self.generation_receiver = None;

        match &result {
            Ok(deck) => info!("Generated {} flashcards", deck.len()),
            Err(GenerateError::NetworkError { detail }) => warn!("Generation failed: {detail}"),
            Err(e) => warn!("Generation failed: {e}"),
        }
        self.session.finish_generation(result);
    }

    /// Completes a card move once its delay has passed
    fn poll_transition(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(pending) = self.timer.take_due(now) {
            self.session.complete_move(pending);
        }
        if let Some(remaining) = self.timer.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn go_next(&mut self) {
        if let Some(pending) = self.session.next() {
            self.timer.schedule(pending, Instant::now());
        }
    }

    fn go_prev(&mut self) {
        if let Some(pending) = self.session.prev() {
            self.timer.schedule(pending, Instant::now());
        }
    }

    fn render_navbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Flashcards").heading().strong().color(NAVY));
                ui.label(egui::RichText::new("Gen").heading().strong().color(ACCENT));

                let Some(deck) = self.session.deck() else {
                    return;
                };
                let deck_label = match self.session.file() {
                    Some(path) => file_label(path),
                    None => deck.name().to_string(),
                };

                let mut action_save = false;
                let mut action_reset = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("New File").clicked() {
                        action_reset = true;
                    }
                    if ui.button("Save Deck").clicked() {
                        action_save = true;
                    }
                    ui.label(egui::RichText::new(deck_label).color(NAVY));
                });

                if action_save {
                    self.handle_export();
                }
                if action_reset {
                    self.pending_reset = self.session.request_reset();
                }
            });
        });
    }

    fn render_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "© {} FlashcardsGen AI. Built for smarter learning.",
                        Local::now().year()
                    ))
                    .small()
                    .color(MUTED),
                );
            });
        });
    }

    /// Renders the upload screen: file picker, error line and generate button
    fn render_landing(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(egui::RichText::new("Turn PDFs into").size(28.0).strong().color(NAVY));
                ui.label(egui::RichText::new("Knowledge instantly.").size(28.0).strong().color(ACCENT));
                ui.add_space(10.0);
                ui.label(
                    "Upload your study notes, textbooks, or research papers and let our AI generate rigorous flashcards for you.",
                );
                ui.add_space(20.0);

                let is_loading = self.session.is_loading();
                let mut action_pick = false;
                let mut action_generate = false;
                let mut action_open = false;

                ui.group(|ui| {
                    ui.set_min_width(320.0);
                    ui.vertical_centered(|ui| {
                        match self.session.file() {
                            Some(path) => {
                                ui.label(egui::RichText::new(file_label(path)).strong().color(NAVY));
                                ui.label(egui::RichText::new("Ready to process").small().color(MUTED));
                            }
                            None => {
                                ui.label(egui::RichText::new("Click to Browse PDF").strong().color(NAVY));
                                ui.label(egui::RichText::new("Max file size 10MB").small().color(MUTED));
                            }
                        }
                        if ui
                            .add_enabled(!is_loading, egui::Button::new("Browse..."))
                            .clicked()
                        {
                            action_pick = true;
                        }
                    });
                });

                ui.add_space(10.0);
                if let Some(message) = self.session.error_message() {
                    ui.label(egui::RichText::new(message).color(ERROR_RED));
                    ui.add_space(10.0);
                }

                if is_loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Generating...");
                    });
                } else {
                    let can_generate = self.session.file().is_some();
                    if ui
                        .add_enabled(can_generate, egui::Button::new("Generate Flashcards").fill(ACCENT))
                        .clicked()
                    {
                        action_generate = true;
                    }
                    ui.add_space(10.0);
                    if ui.link("Open a saved deck").clicked() {
                        action_open = true;
                    }
                }

                // Execute deferred actions
                if action_pick {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("PDF files", &["pdf"])
                        .pick_file()
                    {
                        self.session.select_file(path);
                    }
                }
                if action_generate {
                    self.start_generation(ui.ctx());
                }
                if action_open {
                    self.handle_import();
                }
            });
        });
    }

    /// Renders the study screen: progress, the card itself and navigation
    fn render_workspace(&mut self, ctx: &egui::Context) {
        // Keyboard shortcuts mirror the buttons
        let (key_next, key_prev, key_flip) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::Space),
            )
        });

        let mut action_flip = key_flip;
        let mut action_next = key_next;
        let mut action_prev = key_prev;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(deck) = self.session.deck() else {
                return;
            };
            let Some(card) = self.session.current_card() else {
                return;
            };
            let index = self.session.current_index();
            let total = deck.len();

            ui.add(egui::ProgressBar::new(self.session.progress()).desired_height(6.0));
            ui.add_space(20.0);

            let face = self.session.face();
            let card_frame = egui::Frame::group(ui.style())
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_min_size(egui::vec2(ui.available_width(), 260.0));
                    ui.vertical_centered(|ui| match face {
                        CardFace::Front => {
                            ui.label(egui::RichText::new(format!("Question {}", index + 1)).small().color(MUTED));
                            ui.add_space(20.0);
                            ui.label(egui::RichText::new(&card.question).size(20.0).color(NAVY));
                        }
                        CardFace::Back => {
                            ui.label(egui::RichText::new("Answer").small().color(ACCENT));
                            ui.add_space(10.0);
                            egui::ScrollArea::vertical()
                                .id_salt("answer_scroll")
                                .max_height(220.0)
                                .show(ui, |ui| {
                                    ui.label(egui::RichText::new(&card.answer).size(16.0));
                                });
                        }
                    });
                });
            if card_frame
                .response
                .interact(egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .clicked()
            {
                action_flip = true;
            }

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.session.can_prev(), egui::Button::new("  ←  "))
                    .clicked()
                {
                    action_prev = true;
                }
                ui.label(format!("{} / {}", index + 1, total));
                if ui
                    .add_enabled(self.session.can_next(), egui::Button::new("  →  ").fill(ACCENT))
                    .clicked()
                {
                    action_next = true;
                }
            });

            ui.add_space(10.0);
            ui.label(egui::RichText::new("Click card to flip • Use arrows to navigate").small().color(MUTED));
        });

        // Execute deferred actions
        if action_flip {
            self.session.flip();
        }
        if action_next {
            self.go_next();
        }
        if action_prev {
            self.go_prev();
        }
    }

    /// Handles deck export to JSON file
    fn handle_export(&mut self) {
        let Some(deck) = self.session.deck() else {
            return;
        };
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(default_export_name(deck, Local::now()))
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            self.result_message = match export_json_to_path(deck, &path) {
                Ok(()) => format!("Deck '{}' saved with {} cards!", deck.name(), deck.len()),
                Err(e) => {
                    warn!("Export failed: {e}");
                    format!("Save failed: {e}")
                }
            };
            self.show_result_dialog = true;
        }
    }

    /// Handles opening a previously saved deck
    fn handle_import(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            match import_json(&path) {
                Ok(deck) => {
                    self.timer.cancel();
                    self.session.load_deck(deck);
                }
                Err(e) => {
                    warn!("Import failed: {e}");
                    self.session.report_error(format!("Could not open deck: {e}"));
                }
            }
        }
    }
}
