use super::{OddsCalculator, ServiceHealth, WorkflowState};
use crate::classify::{Probability, Tier};
use crate::upload::selector;
use crate::utils::color::tier_colors;
use crate::utils::file_size::FileSizeUtils;
use eframe::egui::{self, Color32, RichText};

impl OddsCalculator {
    pub fn render(&mut self, ctx: &egui::Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                self.render_header(ui);
                ui.add_space(20.0);
                self.render_drop_zone(ui, hovering);
                ui.add_space(20.0);
                self.render_status(ui);
            });
        });
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Millennium Falcon Odds Calculator");
            ui.add_space(5.0);
            ui.label(
                RichText::new("Upload Empire intelligence data to calculate survival odds")
                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
            ui.add_space(5.0);
            let (dot, text) = match self.health {
                ServiceHealth::Checking => (Color32::GRAY, "checking service..."),
                ServiceHealth::Online => (Color32::from_rgb(0, 180, 0), "service online"),
                ServiceHealth::Offline => (Color32::from_rgb(220, 50, 50), "service offline"),
            };
            ui.horizontal(|ui| {
                ui.colored_label(dot, "●");
                ui.small(format!("{} ({})", text, self.endpoint));
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui, hovering: bool) {
        let fill = if hovering {
            ui.visuals().faint_bg_color
        } else {
            ui.visuals().extreme_bg_color
        };

        egui::Frame::group(ui.style())
            .fill(fill)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    let button = egui::Button::new("📁 Click to upload")
                        .min_size(egui::vec2(200.0, 40.0));
                    if ui.add(button).clicked() {
                        self.handle_selection(selector::pick_file());
                    }
                    ui.label("or drag and drop");
                    ui.small(".json files only");

                    if let Some(name) = self.workflow.selected_name() {
                        ui.add_space(8.0);
                        let label = match self.workflow.selected_size() {
                            Some(size) => {
                                format!("Selected: {} ({})", name, FileSizeUtils::format_size(size))
                            }
                            None => format!("Selected: {}", name),
                        };
                        ui.label(label);
                    }
                });
            });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        match self.workflow.state().clone() {
            WorkflowState::Idle => {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Select a file to compute the odds")
                            .color(ui.visuals().text_color().gamma_multiply(0.5)),
                    );
                });
            }
            WorkflowState::Validating | WorkflowState::Submitting { .. } => {
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Computing odds...");
                });
            }
            WorkflowState::Failed { message } => self.render_error(ui, &message),
            WorkflowState::Succeeded { probability } => self.render_result(ui, probability),
        }
    }

    fn render_error(&mut self, ui: &mut egui::Ui, message: &str) {
        let (background, accent) = tier_colors(Tier::Failure);

        egui::Frame::none()
            .fill(background)
            .stroke(egui::Stroke::new(1.0, accent))
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.colored_label(accent, RichText::new("⚠").size(18.0));
                    ui.vertical(|ui| {
                        ui.label(RichText::new("Error").strong().color(accent));
                        ui.label(RichText::new(message).color(Color32::BLACK));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.workflow.dismiss();
                        }
                    });
                });
            });
    }

    fn render_result(&self, ui: &mut egui::Ui, probability: Probability) {
        let classification = self.workflow.state().classification();
        let (background, accent) = tier_colors(classification.tier);

        egui::Frame::none()
            .fill(background)
            .rounding(8.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.colored_label(accent, RichText::new(classification.tier.icon()).size(24.0));
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{} Success Rate", probability))
                                .size(18.0)
                                .strong()
                                .color(Color32::BLACK),
                        );
                        if let Some(message) = classification.message {
                            ui.label(RichText::new(message).color(Color32::DARK_GRAY));
                        }
                    });
                });
            });
    }
}
