//! Pure rendering of the session state. Decision logic stays in
//! `client_core`; this layer only displays phases and dispatches commands.

use std::time::Duration;

use client_core::{UploadFile, VerificationResult};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{confidence_color, format_faithfulness, status_label, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    query_text: String,
    query_pending: bool,
    result: Option<VerificationResult>,
    document_count: usize,
    uploading: bool,
    upload_error: Option<String>,
    show_upload_panel: bool,
    backend_ready: bool,
    status_line: String,
}

impl DesktopGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            query_text: String::new(),
            query_pending: false,
            result: None,
            document_count: 0,
            uploading: false,
            upload_error: None,
            show_upload_panel: false,
            backend_ready: false,
            status_line: String::new(),
        }
    }

    fn drain_backend_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => self.backend_ready = true,
                UiEvent::BackendStartupFailed(message) => self.status_line = message,
                UiEvent::QueryPending => {
                    self.query_pending = true;
                    self.result = None;
                }
                UiEvent::QuerySettled(result) => {
                    self.query_pending = false;
                    self.result = Some(result);
                }
                UiEvent::DocumentCount(count) => self.document_count = count,
                UiEvent::UploadStarted => self.uploading = true,
                UiEvent::UploadFinished => {
                    self.uploading = false;
                    self.upload_error = None;
                    self.show_upload_panel = false;
                }
                UiEvent::UploadFailed(message) => {
                    self.uploading = false;
                    self.upload_error = Some(message);
                }
            }
        }
    }

    /// Single submission path shared by the Verify button and the Enter key.
    /// Blank and already-pending submissions are rejected by the client.
    fn submit_query(&mut self) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitQuery {
                text: self.query_text.clone(),
            },
            &mut self.status_line,
        );
    }

    fn pick_and_upload_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF documents", &["pdf"])
            .pick_file()
        else {
            // Dialog dismissed without a selection: nothing to do.
            return;
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.upload_error = Some(format!("Could not read {}: {err}", path.display()));
                return;
            }
        };
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        let mut file = UploadFile::new(filename, bytes);
        file.mime_type = mime_guess::from_path(&path).first_raw().map(str::to_string);

        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::UploadDocument { file },
            &mut self.status_line,
        );
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("VeriRag");
            ui.separator();
            ui.label(format!("{} Documents", self.document_count));
            if ui.button("Upload PDF").clicked() {
                self.show_upload_panel = !self.show_upload_panel;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(status_label(self.backend_ready, self.query_pending));
                if self.query_pending || self.uploading {
                    ui.spinner();
                }
            });
        });
    }

    fn upload_panel(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.strong("Upload PDF Document");
            if self.uploading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Processing document...");
                });
            } else if ui.button("Choose file...").clicked() {
                self.pick_and_upload_file();
            }
        });
    }

    fn upload_error_banner(&mut self, ui: &mut egui::Ui, message: &str) {
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::LIGHT_RED, format!("Upload failed: {message}"));
            if ui.button("Dismiss").clicked() {
                self.upload_error = None;
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::AcknowledgeUploadError,
                    &mut self.status_line,
                );
            }
        });
    }

    fn query_row(&mut self, ui: &mut egui::Ui) {
        let mut submit = false;
        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.query_text)
                    .hint_text("Ask your library a question...")
                    .desired_width(ui.available_width() - 110.0),
            );
            if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            let label = if self.query_pending { "Thinking..." } else { "Verify" };
            if ui
                .add_enabled(!self.query_pending, egui::Button::new(label))
                .clicked()
            {
                submit = true;
            }
        });
        if submit {
            self.submit_query();
        }
    }

    fn result_card(&self, ui: &mut egui::Ui, result: &VerificationResult) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.small("VERIFIED RESPONSE");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(
                        confidence_color(result.confidence()),
                        format_faithfulness(result.faithfulness_score),
                    );
                    ui.small("Faithfulness:");
                });
            });
            ui.separator();
            ui.label(&result.answer);

            if let Some(explanation) = &result.explanation {
                ui.add_space(8.0);
                ui.group(|ui| {
                    ui.small("VERIFICATION DETAILS");
                    ui.label(explanation);
                });
            }

            // Sentinel citations ("None", "System Error") come back as None
            // here and therefore never render.
            if let Some(citation) = result.citation() {
                ui.add_space(8.0);
                ui.group(|ui| {
                    ui.small("LIBRARIAN'S PROOF");
                    ui.label(format!("\"{citation}\""));
                });
            }
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_backend_events();
        // Keep polling for backend events even without input.
        ctx.request_repaint_after(Duration::from_millis(150));

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.status_line.is_empty() {
                ui.colored_label(egui::Color32::LIGHT_RED, &self.status_line);
                ui.add_space(8.0);
            }

            if self.show_upload_panel {
                self.upload_panel(ui);
                ui.add_space(8.0);
            }
            if let Some(message) = self.upload_error.clone() {
                self.upload_error_banner(ui, &message);
                ui.add_space(8.0);
            }

            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.heading("RAG that doesn't make things up.");
                ui.label("Verify the faithfulness of your AI Librarian.");
            });
            ui.add_space(12.0);

            self.query_row(ui);

            if let Some(result) = self.result.clone() {
                ui.add_space(16.0);
                self.result_card(ui, &result);
            }
        });
    }
}
