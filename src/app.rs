// src/app.rs
//
// Traceur Q-pur — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs + trace.rs)
// - Ré-exporter AppTraceur (pour main.rs: use crate::app::AppTraceur;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB) + sauvegarde des réglages
//
// Important:
// - L’entrée est réanalysée dans vue.rs (au bon endroit: quand le champ change).

pub mod etat;
pub mod trace;
pub mod vue;

// Ré-export pratique : `use crate::app::AppTraceur;`
pub use etat::AppTraceur;

use eframe::egui;

impl AppTraceur {
    /// Restaure l’état sauvegardé (entrée, réglages, curseurs) s’il existe.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let Some(storage) = cc.storage else {
            return Self::default();
        };

        match eframe::get_value::<AppTraceur>(storage, eframe::APP_KEY) {
            Some(mut app) => {
                app.reglages.assainir();
                app.reanalyser();
                app.focus_entree = true;
                log::info!(
                    "état restauré : entrée {:?}, domaine [{}, {}]",
                    app.entree,
                    app.reglages.domaine.min,
                    app.reglages.domaine.max
                );
                app
            }
            None => Self::default(),
        }
    }
}

impl eframe::App for AppTraceur {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Raccourci clavier global minimal (safe natif + web) :
        // ESC = effacer seulement l’entrée (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}
