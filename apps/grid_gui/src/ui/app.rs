use chrono::{DateTime, SecondsFormat, Utc};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::Color,
    protocol::{GridCommand, GridSnapshot},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const CELL_SIZE: f32 = 64.0;
const CELL_SPACING: f32 = 8.0;
const DEBUG_HISTORY_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub(crate) fn cell_fill(color: Color) -> egui::Color32 {
    let [r, g, b] = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}

/// Commands produced by one frame of pointer input on cell `index`. A double
/// click arrives together with its second click, so both are routed, click
/// first.
pub(crate) fn cell_commands(index: usize, clicked: bool, double_clicked: bool) -> Vec<GridCommand> {
    let index = index as i64;
    let mut commands = Vec::with_capacity(2);
    if clicked {
        commands.push(GridCommand::Click { index });
    }
    if double_clicked {
        commands.push(GridCommand::DoubleClick { index });
    }
    commands
}

fn format_timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn debug_lines(snapshot: &GridSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("Created: {}", format_timestamp(Some(snapshot.created_at))),
        format!("Last action at: {}", format_timestamp(snapshot.last_action_at)),
        format!("Reset at: {}", format_timestamp(snapshot.last_reset_at)),
        format!("Fingerprint: {}", snapshot.fingerprint),
    ];
    let skip = snapshot.history.len().saturating_sub(DEBUG_HISTORY_ROWS);
    for entry in snapshot.history.iter().skip(skip) {
        lines.push(format!(
            "{}  {}  actions={} checksum={}",
            format_timestamp(Some(entry.at)),
            entry.action,
            entry.action_count,
            entry.checksum
        ));
    }
    lines
}

pub struct GridApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    snapshot: Option<GridSnapshot>,
    status: String,
    status_banner: Option<StatusBanner>,
    show_debug: bool,
}

impl GridApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            snapshot: None,
            status: "Starting grid worker...".to_string(),
            status_banner: None,
            show_debug: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Snapshot(snapshot) => {
                    self.status.clear();
                    self.snapshot = Some(*snapshot);
                }
                UiEvent::Error(err) => self.show_error(err),
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        tracing::warn!(
            category = ?err.category(),
            context = ?err.context(),
            message = err.message(),
            "grid command failed"
        );
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: format!("{}: {}", err_label(err.category()), err.message()),
        });
    }

    fn send(&mut self, cmd: BackendCommand) {
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            let err = UiError::from_message(UiErrorContext::General, self.status.clone());
            self.show_error(err);
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_cells(&mut self, ui: &mut egui::Ui, snapshot: &GridSnapshot) {
        let border = egui::Color32::from_rgb(156, 163, 175);
        let mut queued = Vec::new();

        egui::Grid::new(("grid_cells", snapshot.session.to_string()))
            .spacing(egui::vec2(CELL_SPACING, CELL_SPACING))
            .show(ui, |ui| {
                for (index, color) in snapshot.cells.iter().enumerate() {
                    let (rect, response) =
                        ui.allocate_exact_size(egui::vec2(CELL_SIZE, CELL_SIZE), egui::Sense::click());
                    ui.painter().rect(
                        rect,
                        12.0,
                        cell_fill(*color),
                        egui::Stroke::new(1.0, border),
                        egui::StrokeKind::Inside,
                    );
                    queued.extend(cell_commands(
                        index,
                        response.clicked(),
                        response.double_clicked(),
                    ));
                    response
                        .on_hover_cursor(egui::CursorIcon::PointingHand)
                        .on_hover_text(format!("Cell {}", index + 1));

                    if (index + 1) % snapshot.columns.max(1) == 0 {
                        ui.end_row();
                    }
                }
            });

        for command in queued {
            self.send(BackendCommand::Grid(command));
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        let ready = self.snapshot.is_some();
        ui.horizontal(|ui| {
            let randomize = egui::Button::new(
                egui::RichText::new("Randomize").color(egui::Color32::WHITE),
            )
            .fill(egui::Color32::from_rgb(59, 130, 246))
            .corner_radius(12.0);
            if ui.add_enabled(ready, randomize).clicked() {
                self.send(BackendCommand::Grid(GridCommand::Randomize));
            }

            let reset =
                egui::Button::new(egui::RichText::new("Reset").color(egui::Color32::WHITE))
                    .fill(egui::Color32::from_rgb(239, 68, 68))
                    .corner_radius(12.0);
            if ui.add_enabled(ready, reset).clicked() {
                self.send(BackendCommand::Grid(GridCommand::Reset));
            }

            if ui
                .add(egui::Button::new("Toggle debug").corner_radius(12.0))
                .clicked()
            {
                self.show_debug = !self.show_debug;
            }
        });
    }

    fn show_footer(ui: &mut egui::Ui, snapshot: &GridSnapshot) {
        let weak = ui.visuals().weak_text_color();
        ui.label(egui::RichText::new(format!("Session ID: {}", snapshot.session)).small().color(weak));
        ui.label(egui::RichText::new(format!("Grid Checksum: {}", snapshot.checksum)).small().color(weak));
        ui.label(egui::RichText::new(format!("Actions: {}", snapshot.action_count)).small().color(weak));
        let last = snapshot
            .last_action
            .map(|a| a.to_string())
            .unwrap_or_else(|| "none".to_string());
        ui.label(egui::RichText::new(format!("Last action: {last}")).small().color(weak));
    }

    fn show_debug_panel(ui: &mut egui::Ui, snapshot: &GridSnapshot) {
        egui::Frame::group(ui.style())
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Debug").strong());
                ui.small(format!(
                    "Rendered at: {}",
                    format_timestamp(Some(Utc::now()))
                ));
                for line in debug_lines(snapshot) {
                    ui.monospace(line);
                }
            });
    }
}

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading("Color Chaos Grid");
                ui.add_space(16.0);
            });

            self.show_status_banner(ui);

            match self.snapshot.clone() {
                Some(snapshot) => {
                    self.show_cells(ui, &snapshot);
                    ui.add_space(16.0);
                    self.show_controls(ui);
                    ui.add_space(24.0);
                    Self::show_footer(ui, &snapshot);
                    if self.show_debug {
                        ui.add_space(12.0);
                        Self::show_debug_panel(ui, &snapshot);
                    }
                }
                None => {
                    ui.spinner();
                    ui.small(&self.status);
                }
            }
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
