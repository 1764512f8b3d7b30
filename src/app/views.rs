//! View rendering (login, review form, results area)

use super::App;
use crate::controller::Regions;
use crate::theme;
use crate::types::{DisplayState, Route};
use crate::ui::components;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::time::Instant;

impl App {
    // ========================================================================
    // LOGIN VIEW
    // ========================================================================

    pub(crate) fn render_login_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space((ui.available_height() / 2.0 - 170.0).max(24.0));
                    theme::card_frame().show(ui, |ui| {
                        ui.set_width(340.0);
                        ui.label(
                            egui::RichText::new("Sign in")
                                .size(theme::FONT_TITLE)
                                .strong(),
                        );
                        ui.label(
                            egui::RichText::new(self.effective_server_url())
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                        ui.add_space(theme::SPACING_LG);

                        ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                            ui.label(egui::RichText::new("Email").color(theme::TEXT_MUTED));
                            ui.add(
                                egui::TextEdit::singleline(&mut self.login_email)
                                    .hint_text("you@example.com")
                                    .desired_width(f32::INFINITY),
                            );
                            ui.add_space(theme::SPACING_SM);
                            ui.label(egui::RichText::new("Password").color(theme::TEXT_MUTED));
                            let password = ui.add(
                                egui::TextEdit::singleline(&mut self.login_password)
                                    .password(true)
                                    .desired_width(f32::INFINITY),
                            );
                            let enter_pressed = password.lost_focus()
                                && ui.input(|i| i.key_pressed(egui::Key::Enter));

                            if let Some(notice) = &self.login_notice {
                                ui.add_space(theme::SPACING_MD);
                                theme::banner_frame().show(ui, |ui| {
                                    ui.set_min_width(ui.available_width());
                                    ui.label(
                                        egui::RichText::new(format!("{}  {}", icons::CHECK_CIRCLE, notice))
                                            .color(theme::STATUS_SUCCESS),
                                    );
                                });
                            }

                            if let Some(err) = &self.login_error {
                                ui.add_space(theme::SPACING_MD);
                                theme::error_frame().show(ui, |ui| {
                                    ui.set_min_width(ui.available_width());
                                    let text = format!("{}  {}", icons::WARNING, err);
                                    ui.add(
                                        egui::Label::new(
                                            egui::RichText::new(text).color(theme::STATUS_ERROR),
                                        )
                                        .wrap(),
                                    );
                                });
                            }

                            ui.add_space(theme::SPACING_LG);
                            if self.login_in_progress {
                                ui.horizontal(|ui| {
                                    ui.spinner();
                                    ui.label("Signing in...");
                                });
                            } else {
                                let clicked = ui
                                    .add_sized(
                                        [ui.available_width(), 32.0],
                                        theme::button_accent(format!("{}  Sign in", icons::SIGN_IN)),
                                    )
                                    .clicked();
                                if clicked || enter_pressed {
                                    self.login(ctx);
                                }
                            }

                            ui.add_space(theme::SPACING_MD);
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new("No account yet?").color(theme::TEXT_DIM));
                                if ui.link("Create one").clicked() {
                                    self.navigate(Route::Signup, ctx);
                                }
                            });
                        });
                    });
                });
            });
    }

    // ========================================================================
    // SIGNUP VIEW
    // ========================================================================

    pub(crate) fn render_signup_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space((ui.available_height() / 2.0 - 220.0).max(24.0));
                    theme::card_frame().show(ui, |ui| {
                        ui.set_width(340.0);
                        ui.label(
                            egui::RichText::new("Create account")
                                .size(theme::FONT_TITLE)
                                .strong(),
                        );
                        ui.add_space(theme::SPACING_LG);

                        ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                            let form = &mut self.signup_form;
                            let mut enter_pressed = false;
                            for (label, value, hint, secret) in [
                                ("Name", &mut form.name, "Full name", false),
                                ("Email", &mut form.email, "you@example.com", false),
                                ("CNIC", &mut form.cnic, "xxxxx-xxxxxxx-x", false),
                                ("Password", &mut form.password, "", true),
                            ] {
                                ui.label(egui::RichText::new(label).color(theme::TEXT_MUTED));
                                let field = ui.add(
                                    egui::TextEdit::singleline(value)
                                        .hint_text(hint)
                                        .password(secret)
                                        .desired_width(f32::INFINITY),
                                );
                                enter_pressed |= field.lost_focus()
                                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                                ui.add_space(theme::SPACING_SM);
                            }

                            if let Some(err) = &self.signup_error {
                                ui.add_space(theme::SPACING_SM);
                                theme::error_frame().show(ui, |ui| {
                                    ui.set_min_width(ui.available_width());
                                    ui.add(
                                        egui::Label::new(
                                            egui::RichText::new(format!("{}  {}", icons::WARNING, err))
                                                .color(theme::STATUS_ERROR),
                                        )
                                        .wrap(),
                                    );
                                });
                            }

                            ui.add_space(theme::SPACING_LG);
                            if self.signup_in_progress {
                                ui.horizontal(|ui| {
                                    ui.spinner();
                                    ui.label("Creating account...");
                                });
                            } else {
                                let clicked = ui
                                    .add_sized(
                                        [ui.available_width(), 32.0],
                                        theme::button_accent(format!("{}  Sign up", icons::USER_PLUS)),
                                    )
                                    .clicked();
                                if clicked || enter_pressed {
                                    self.signup(ctx);
                                }
                            }

                            ui.add_space(theme::SPACING_MD);
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new("Already registered?").color(theme::TEXT_DIM));
                                if ui.link("Sign in").clicked() {
                                    self.navigate(Route::Login, ctx);
                                }
                            });
                        });
                    });
                });
            });
    }

    // ========================================================================
    // REVIEW VIEW
    // ========================================================================

    pub(crate) fn render_review_view(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("review_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(theme::sidebar_frame())
            .show(ctx, |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("REVIEW SENTIMENT")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_MD);

                self.render_review_form(ui, ctx);
                ui.add_space(theme::SPACING_XL);
                self.render_recent_reviews(ui);
                ui.add_space(theme::SPACING_XL);
                self.render_display_options(ui);

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    if ui
                        .add(theme::button(format!("{}  Log out", icons::SIGN_OUT)))
                        .clicked()
                    {
                        self.logout(ctx);
                    }
                    ui.label(
                        egui::RichText::new(self.effective_server_url())
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                });
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| {
                self.render_results_area(ui);
            });
    }

    fn render_review_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(
            egui::RichText::new("Your review")
                .size(theme::FONT_HEADING)
                .strong(),
        );
        ui.add_space(theme::SPACING_SM);

        let edit_id = ui.make_persistent_id("review_text");
        let response = egui::Frame::new()
            .fill(theme::BG_INPUT)
            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT))
            .corner_radius(theme::RADIUS_DEFAULT)
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.review_text)
                        .id(edit_id)
                        .hint_text("Write a review to analyze...")
                        .frame(false)
                        .desired_rows(8)
                        .desired_width(f32::INFINITY),
                )
            })
            .inner;

        if self.focus_review {
            self.focus_review = false;
            response.request_focus();
        }
        let shortcut = response.has_focus() && ui.input(components::is_submit_shortcut);

        ui.add_space(theme::SPACING_MD);
        let ready = self.controller.unavailable_reason().is_none()
            && !self.review_text.trim().is_empty();
        let label = if self.controller.is_loading() {
            format!("{}  Analyzing...", icons::HOURGLASS)
        } else {
            format!("{}  Analyze", icons::PAPER_PLANE_RIGHT)
        };
        let button = if ready {
            theme::button_accent(label)
        } else {
            theme::button_disabled(label)
        };
        let clicked = ui.add_sized([ui.available_width(), 32.0], button).clicked();

        if clicked || shortcut {
            self.submit_review(ctx);
        }
    }

    fn render_recent_reviews(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("{}  Recent reviews", icons::CLOCK_COUNTER_CLOCKWISE))
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
            );
            if self.recent.loading {
                ui.spinner();
            }
        });
        ui.add_space(theme::SPACING_SM);

        if self.recent.items.is_empty() {
            ui.label(
                egui::RichText::new("No reviews yet")
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
            return;
        }

        let mut picked = None;
        egui::ScrollArea::vertical()
            .max_height(220.0)
            .show(ui, |ui| {
                for review in &self.recent.items {
                    if components::recent_review_row(ui, review) {
                        picked = Some(review.review_text.clone());
                    }
                    ui.add_space(theme::SPACING_SM);
                }
            });
        if let Some(text) = picked {
            self.review_text = text;
            self.focus_review = true;
        }
    }

    fn render_display_options(&mut self, ui: &mut egui::Ui) {
        let mut regions = self.controller.regions();
        egui::CollapsingHeader::new(
            egui::RichText::new("Display")
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        )
        .default_open(false)
        .show(ui, |ui| {
            ui.checkbox(&mut regions.chart, "Confidence chart");
            ui.checkbox(&mut regions.success_banner, "Success banner");
        });
        if regions != self.controller.regions() {
            self.set_regions(regions);
        }
    }

    fn set_regions(&mut self, regions: Regions) {
        self.controller.set_regions(regions);
        self.save_settings();
    }

    // ========================================================================
    // RESULTS AREA
    // ========================================================================

    fn render_results_area(&self, ui: &mut egui::Ui) {
        let now = Instant::now();
        match self.controller.display() {
            DisplayState::Placeholder => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}\n\nSubmit a review to see its sentiment",
                            icons::CHAT_TEXT
                        ))
                        .size(theme::FONT_HEADING)
                        .color(theme::TEXT_DIM),
                    );
                });
            }
            DisplayState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    ui.spinner();
                    ui.add_space(theme::SPACING_MD);
                    ui.label(egui::RichText::new("Analyzing sentiment...").color(theme::TEXT_MUTED));
                });
            }
            DisplayState::Error => {
                let reason = self.controller.unavailable_reason().unwrap_or_default();
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    ui.label(
                        egui::RichText::new(icons::WARNING)
                            .size(32.0)
                            .color(theme::STATUS_ERROR),
                    );
                    ui.label(egui::RichText::new("Prediction service unavailable").strong());
                    ui.label(egui::RichText::new(reason).color(theme::TEXT_MUTED));
                });
            }
            DisplayState::Results => self.render_results(ui, now),
        }
    }

    fn render_results(&self, ui: &mut egui::Ui, now: Instant) {
        let Some(results) = self.controller.results() else {
            return;
        };

        egui::ScrollArea::vertical().show(ui, |ui| {
            if self.controller.success_banner_visible() {
                theme::banner_frame().show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        egui::RichText::new(format!("{}  Analysis complete", icons::CHECK_CIRCLE))
                            .color(theme::STATUS_SUCCESS),
                    );
                });
                ui.add_space(theme::SPACING_LG);
            }

            theme::card_frame().show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(
                    egui::RichText::new("PREDICTED SENTIMENT")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                let color = theme::sentiment_color(&results.sentiment);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(components::icon_glyph(results.icon))
                            .size(32.0)
                            .color(color),
                    );
                    ui.label(
                        egui::RichText::new(&results.label)
                            .size(28.0)
                            .strong()
                            .color(color),
                    );
                });
            });
            ui.add_space(theme::SPACING_LG);

            theme::card_frame().show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(egui::RichText::new("Confidence").size(theme::FONT_HEADING).strong());
                ui.add_space(theme::SPACING_MD);
                for entry in &results.entries {
                    components::confidence_row(ui, entry, results.generation, now);
                    ui.add_space(theme::SPACING_MD);
                }
            });

            if let Some(chart) = self.controller.chart() {
                ui.add_space(theme::SPACING_LG);
                theme::card_frame().show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        egui::RichText::new(format!("{}  Confidence chart", icons::CHART_BAR))
                            .size(theme::FONT_HEADING)
                            .strong(),
                    );
                    ui.add_space(theme::SPACING_MD);
                    components::bar_chart(ui, chart, now);
                });
            }
        });
    }
}
