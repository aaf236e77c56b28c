// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Pavé : chiffres, opérateurs, parenthèses (infixe seulement), CE C ⌫ =
// - Mémoire : MC MR MS M+ M-
// - Mode infixe / RPN, précision, arrondi
// - Clavier : Enter "=", Escape "CE", Backspace "BACKSPACE", chiffres/opérateurs tapés
//
// Toute action passe par AppCalc::presser (etat.rs).

use eframe::egui;

use calculatrice_rpn::noyau::memoire::MemoryCommand;
use calculatrice_rpn::noyau::touches::{KEY_BACKSPACE, KEY_CLEAR, KEY_CLEAR_ENTRY, KEY_EVALUATE};
use calculatrice_rpn::noyau::{ExpressionMode, Precision, RoundingMode};

use super::etat::AppCalc;

const TOUCHE: [f32; 2] = [52.0, 36.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice RPN");
                ui.add_space(6.0);

                self.ui_reglages(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_ecran(ui);
                ui.add_space(8.0);
                self.ui_memoire(ui);
                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_trace(ui);
            });
    }

    /// Clavier physique. Appelé depuis update(), hors de tout champ texte.
    pub fn clavier(&mut self, ctx: &egui::Context) {
        let touches: Vec<String> = ctx.input(|i| {
            let mut v = Vec::new();
            for ev in &i.events {
                match ev {
                    egui::Event::Text(t) => {
                        v.extend(t.chars().filter(|c| est_touche_texte(*c)).map(String::from))
                    }
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => match key {
                        egui::Key::Enter => v.push(KEY_EVALUATE.to_string()),
                        egui::Key::Escape => v.push(KEY_CLEAR_ENTRY.to_string()),
                        egui::Key::Backspace => v.push(KEY_BACKSPACE.to_string()),
                        _ => {}
                    },
                    _ => {}
                }
            }
            v
        });

        for t in touches {
            if t == " " {
                self.pousser();
            } else {
                self.presser(&t);
            }
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let mut mode = self.mode;
            ui.selectable_value(&mut mode, ExpressionMode::Infix, "Infixe");
            ui.selectable_value(&mut mode, ExpressionMode::Postfix, "RPN");
            if mode != self.mode {
                self.changer_mode(mode);
            }

            ui.separator();

            ui.label("Précision :");
            let mut d = self.reglages.precision.digits();
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(Precision::MIN..=Precision::MAX)
                    .suffix(" déc."),
            );
            if resp.changed() {
                if let Ok(p) = Precision::new(d) {
                    self.reglages.precision = p;
                }
            }

            egui::ComboBox::from_id_salt("arrondi")
                .selected_text(self.reglages.rounding.name())
                .show_ui(ui, |ui| {
                    for m in RoundingMode::ALL {
                        ui.selectable_value(&mut self.reglages.rounding, m, m.name());
                    }
                });

            ui.checkbox(&mut self.avec_trace, "Trace");
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression :");
        Self::champ_monospace(ui, "ecran_expression", &self.expression, 1);

        ui.add_space(4.0);
        ui.label("Résultat :");
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.affichage).monospace().size(24.0));
                });
            });

        if !self.erreur.is_empty() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            self.bouton_memoire(ui, "MC", "Efface la mémoire", MemoryCommand::Clear);
            self.bouton_memoire(ui, "MR", "Rappelle la mémoire", MemoryCommand::Recall);
            self.bouton_memoire(ui, "MS", "Mémorise le résultat", MemoryCommand::Store);
            self.bouton_memoire(ui, "M+", "Ajoute le résultat", MemoryCommand::Add);
            self.bouton_memoire(ui, "M-", "Retranche le résultat", MemoryCommand::Subtract);
            ui.separator();
            ui.monospace(format!("M = {}", self.memoire));
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let infixe = self.mode == ExpressionMode::Infix;

        egui::Grid::new("pave_rpn")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, KEY_CLEAR_ENTRY, "Vide l’entrée");
                self.bouton(ui, KEY_CLEAR, "Vide l’entrée et annule");
                self.bouton_libelle(ui, "⌫", KEY_BACKSPACE);
                ui.add_enabled_ui(infixe, |ui| self.bouton(ui, "(", ""));
                ui.add_enabled_ui(infixe, |ui| self.bouton(ui, ")", ""));
                ui.end_row();

                for rangee in [["7", "8", "9", "/"], ["4", "5", "6", "*"], ["1", "2", "3", "-"]] {
                    for k in rangee {
                        self.bouton(ui, k, "");
                    }
                    ui.label("");
                    ui.end_row();
                }

                self.bouton(ui, "0", "");
                self.bouton(ui, ".", "");
                self.bouton(ui, "^", "Puissance");
                self.bouton(ui, "+", "");
                if infixe {
                    self.bouton(ui, KEY_EVALUATE, "Évalue");
                } else {
                    let resp = ui
                        .add_sized(TOUCHE, egui::Button::new("⏎"))
                        .on_hover_text("Pousse le nombre saisi");
                    if resp.clicked() {
                        self.pousser();
                    }
                }
                ui.end_row();

                if !infixe {
                    ui.label("");
                    ui.label("");
                    ui.label("");
                    ui.label("");
                    self.bouton(ui, KEY_EVALUATE, "Évalue");
                    ui.end_row();
                }
            });
    }

    fn ui_trace(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                ui.label("RPN :");
                Self::champ_monospace(ui, "demarche_rpn", &self.rpn, 1);

                ui.add_space(4.0);
                ui.label("Trace :");
                let texte = self.trace.join("\n");
                Self::champ_monospace(ui, "demarche_trace", &texte, self.trace.len().max(2));
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, key: &str, tip: &str) {
        let mut resp = ui.add_sized(TOUCHE, egui::Button::new(key));
        if !tip.is_empty() {
            resp = resp.on_hover_text(tip);
        }
        if resp.clicked() {
            self.presser(key);
        }
    }

    fn bouton_libelle(&mut self, ui: &mut egui::Ui, label: &str, key: &str) {
        if ui.add_sized(TOUCHE, egui::Button::new(label)).clicked() {
            self.presser(key);
        }
    }

    fn bouton_memoire(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, cmd: MemoryCommand) {
        let resp = ui
            .add_sized([44.0, 28.0], egui::Button::new(label))
            .on_hover_text(tip);
        if resp.clicked() {
            self.memoire(cmd);
        }
    }
}

/// Caractères tapés acceptés comme touches ; l’espace pousse le nombre en RPN.
fn est_touche_texte(c: char) -> bool {
    c.is_ascii_digit() || "+-*/^().= ".contains(c)
}
