//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état du traceur (entrée, fonction analysée, erreur, démarche,
//! réglages, valeurs des curseurs) et offrir des opérations simples (C/AC).
//!
//! Contrats :
//! - L’analyse est relancée à chaque modification de l’entrée (frappe ou bouton).
//! - Entrée refusée => message d’erreur + fonction de repli (le tracé ne casse jamais).
//! - Défense en profondeur : résolutions et domaine bornés.

use serde::{Deserialize, Serialize};

use traceur_qpur::noyau::{analyser, Bindings, Demarche, Domaine, ParsedFunction, Var};

/// Points de la courbe (mode single).
const RESOLUTION_COURBE_DEFAUT: usize = 400;
const RESOLUTION_COURBE_MIN: usize = 16;
const RESOLUTION_COURBE_MAX: usize = 4000;

/// Côté de la grille (mode bivariate).
const RESOLUTION_GRILLE_DEFAUT: usize = 48;
const RESOLUTION_GRILLE_MIN: usize = 4;
const RESOLUTION_GRILLE_MAX: usize = 160;

/// Exemple affiché au premier lancement.
const ENTREE_DEFAUT: &str = "sin(x)*cos(y)";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub domaine: Domaine,
    pub resolution_courbe: usize,
    pub resolution_grille: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            domaine: Domaine::default(),
            resolution_courbe: RESOLUTION_COURBE_DEFAUT,
            resolution_grille: RESOLUTION_GRILLE_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn set_resolution_courbe(&mut self, n: usize) {
        self.resolution_courbe = n.clamp(RESOLUTION_COURBE_MIN, RESOLUTION_COURBE_MAX);
    }

    pub fn set_resolution_grille(&mut self, n: usize) {
        self.resolution_grille = n.clamp(RESOLUTION_GRILLE_MIN, RESOLUTION_GRILLE_MAX);
    }

    /// Refuse un domaine vide / inversé / non fini (on garde l’ancien).
    pub fn set_domaine(&mut self, min: f64, max: f64) -> bool {
        match Domaine::new(min, max) {
            Some(d) => {
                self.domaine = d;
                true
            }
            None => false,
        }
    }

    /// Après relecture du stockage : ramène tout dans les bornes.
    pub fn assainir(&mut self) {
        self.set_resolution_courbe(self.resolution_courbe);
        self.set_resolution_grille(self.resolution_grille);
        if Domaine::new(self.domaine.min, self.domaine.max).is_none() {
            self.domaine = Domaine::default();
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppTraceur {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- paramètres (persistés) ---
    pub reglages: Reglages,

    /// Valeurs des curseurs x, y, z, t, u, v (variables non balayées).
    pub curseurs: [f64; 6],

    // --- sorties (recalculées, jamais persistées) ---
    #[serde(skip)]
    pub fonction: ParsedFunction,
    #[serde(skip)]
    pub erreur: String,
    #[serde(skip)]
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    #[serde(skip)]
    pub focus_entree: bool,
}

impl Default for AppTraceur {
    fn default() -> Self {
        let mut app = Self {
            entree: ENTREE_DEFAUT.to_string(),
            reglages: Reglages::default(),
            curseurs: [0.0; 6],
            fonction: ParsedFunction::repli(),
            erreur: String::new(),
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        };
        app.reanalyser();
        app
    }
}

impl AppTraceur {
    /* ------------------------ Analyse ------------------------ */

    /// Relance l’analyse de l’entrée courante.
    /// Entrée vide : pas d’erreur affichée (cas normal), fonction de repli.
    pub fn reanalyser(&mut self) {
        match analyser(&self.entree) {
            Ok((fonction, demarche)) => {
                self.fonction = fonction;
                self.demarche = demarche;
                self.erreur.clear();
            }
            Err(e) => {
                self.fonction = ParsedFunction::repli();
                self.demarche = Demarche::default();
                if self.entree.trim().is_empty() {
                    self.erreur.clear();
                } else {
                    self.erreur = e.to_string();
                }
            }
        }
    }

    /// Liaisons issues des curseurs (base des échantillonnages).
    pub fn liaisons(&self) -> Bindings {
        Var::TOUTES.into_iter().zip(self.curseurs).collect()
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// AC : remise à zéro totale (entrée + curseurs + réglages par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.curseurs = [0.0; 6];
        self.reglages = Reglages::default();
        self.reanalyser();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.reanalyser();
        self.focus_entree = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traceur_qpur::noyau::Arity;
    use pretty_assertions::assert_eq;

    #[test]
    fn demarrage_sur_l_exemple() {
        let app = AppTraceur::default();
        assert_eq!(app.fonction.arity, Arity::Bivariate);
        assert_eq!(app.demarche.normalisee, "sin(x)*cos(y)");
        assert!(app.erreur.is_empty());
    }

    #[test]
    fn entree_invalide_erreur_et_repli() {
        let mut app = AppTraceur::default();
        app.entree = "sin(x".into();
        app.reanalyser();
        assert_eq!(app.erreur, "parenthèses non fermées");
        assert_eq!(app.fonction, ParsedFunction::repli());

        app.clear_entree();
        assert!(app.erreur.is_empty(), "entrée vide : pas de message");
    }

    #[test]
    fn reglages_bornes() {
        let mut r = Reglages::default();
        r.set_resolution_grille(10_000);
        assert_eq!(r.resolution_grille, RESOLUTION_GRILLE_MAX);
        r.set_resolution_courbe(0);
        assert_eq!(r.resolution_courbe, RESOLUTION_COURBE_MIN);

        assert!(!r.set_domaine(3.0, -3.0));
        assert_eq!(r.domaine, Domaine::default());
        assert!(r.set_domaine(-1.0, 2.0));
        assert_eq!(r.domaine, Domaine::new(-1.0, 2.0).unwrap());
    }

    #[test]
    fn reglages_assainis_apres_relecture() {
        let mut r = Reglages {
            domaine: Domaine { min: 1.0, max: 1.0 },
            resolution_courbe: 1,
            resolution_grille: 1_000_000,
        };
        r.assainir();
        assert_eq!(r, Reglages {
            domaine: Domaine::default(),
            resolution_courbe: RESOLUTION_COURBE_MIN,
            resolution_grille: RESOLUTION_GRILLE_MAX,
        });
    }

    #[test]
    fn liaisons_depuis_curseurs() {
        let mut app = AppTraceur::default();
        app.curseurs[2] = 1.5;
        assert_eq!(app.liaisons().get(Var::Z), Some(1.5));
    }
}
