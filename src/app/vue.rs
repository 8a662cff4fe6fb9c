// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppTraceur (etat.rs) pour natif + wasm
// - Analyse à chaque frappe (pas de bouton "=") : le tracé suit la saisie
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Curseurs pour les variables non balayées (z, t, u, v...)

use eframe::egui;

use traceur_qpur::noyau::{Arity, Var};

use super::etat::AppTraceur;
use super::trace;

/// Motifs retirés d’un coup par DEL (le plus long d’abord).
const MOTIFS_DEL: [&str; 13] = [
    "asin(", "acos(", "atan(", "sqrt(", "sin(", "cos(", "tan(", "log(", "exp(", "abs(", "ln(",
    "pi", "π",
];

impl AppTraceur {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Traceur Q-pur");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_trace(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_reglages(ui);

                ui.add_space(8.0);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("f = ");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: sin(x)*cos(y), x^2+y^2, 2x, ln(x)")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // chaque frappe relance l’analyse
        if resp.changed() {
            self.reanalyser();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);

            ui.separator();
            ui.monospace(format!("forme : {}", self.fonction.arity));
        });

        ui.add_space(8.0);

        // Touches rapides : opérateurs, fonctions, variables
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            for op in ["+", "-", "*", "/", "^"] {
                self.bouton_insert(ui, op, op, InsertKind::Op);
            }

            ui.separator();

            self.bouton_insert(ui, "π", "pi", InsertKind::Word);
            self.bouton_insert(ui, "e", "e", InsertKind::Word);
            for (label, ins) in [
                ("sin", "sin("),
                ("cos", "cos("),
                ("tan", "tan("),
                ("ln", "ln("),
                ("exp", "exp("),
                ("√", "sqrt("),
                ("|x|", "abs("),
            ] {
                self.bouton_insert(ui, label, ins, InsertKind::Func);
            }

            ui.separator();

            for v in Var::TOUTES {
                let s = v.to_string();
                self.bouton_insert(ui, &s, &s, InsertKind::Word);
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_traceur")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"]] {
                    for chiffre in ligne {
                        self.bouton_insert(ui, chiffre, chiffre, InsertKind::Digit);
                    }
                    ui.end_row();
                }

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();
            });
    }

    fn ui_trace(&mut self, ui: &mut egui::Ui) {
        // curseurs : seulement les variables non balayées par le mode courant
        let balayees = match self.fonction.arity {
            Arity::Single => 1,
            Arity::Bivariate => 2,
            Arity::Trivariate | Arity::Parametric => 0,
        };
        let d = self.reglages.domaine;
        let libres: Vec<Var> = self.fonction.variables.iter().skip(balayees).copied().collect();

        if !libres.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for v in libres {
                    let idx = Var::TOUTES.iter().position(|w| *w == v).unwrap_or(0);
                    ui.add(
                        egui::Slider::new(&mut self.curseurs[idx], d.min..=d.max)
                            .text(v.to_string()),
                    );
                }
            });
            ui.add_space(6.0);
        }

        let base = self.liaisons();
        trace::dessiner(ui, &self.fonction, &base, &self.reglages);
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Réglages")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Domaine :");
                    let mut min = self.reglages.domaine.min;
                    let mut max = self.reglages.domaine.max;
                    let r1 = ui.add(egui::DragValue::new(&mut min).speed(0.1).prefix("min "));
                    let r2 = ui.add(egui::DragValue::new(&mut max).speed(0.1).prefix("max "));
                    if (r1.changed() || r2.changed()) && self.reglages.set_domaine(min, max) {
                        log::debug!("domaine : [{min}, {max}]");
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Courbe :");
                    let mut n = self.reglages.resolution_courbe as u32;
                    let resp = ui.add(
                        egui::DragValue::new(&mut n)
                            .speed(4)
                            .range(16..=4000)
                            .suffix(" points"),
                    );
                    if resp.changed() {
                        self.reglages.set_resolution_courbe(n as usize);
                    }

                    ui.separator();

                    ui.label("Grille :");
                    let mut g = self.reglages.resolution_grille as u32;
                    let resp = ui.add(
                        egui::DragValue::new(&mut g)
                            .speed(1)
                            .range(4..=160)
                            .suffix(" × côté"),
                    );
                    if resp.changed() {
                        self.reglages.set_resolution_grille(g as usize);
                        log::debug!("grille : {}", self.reglages.resolution_grille);
                    }
                });
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Normalisée", "demarche_norm", &self.demarche.normalisee);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
                Self::champ_demarche(ui, "Variables", "demarche_vars", &self.demarche.variables);
                Self::champ_demarche(ui, "Forme", "demarche_forme", &self.demarche.forme);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
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

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sin(", "pi", etc.).
    fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        match MOTIFS_DEL.iter().find(|m| self.entree.ends_with(**m)) {
            Some(m) => {
                let garde = self.entree.len() - m.len();
                self.entree.truncate(garde);
            }
            None => {
                self.entree.pop();
            }
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => {
                    self.backspace_entree();
                    self.reanalyser();
                }
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            // chiffres, mots, fonctions, '(' : collés, la normalisation
            // insère les multiplications implicites (2x, x(…), 2sin(…))
            InsertKind::Digit | InsertKind::Word | InsertKind::Func | InsertKind::OpenParen => {
                self.entree.push_str(to_insert);
            }
        }

        self.reanalyser();
        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
