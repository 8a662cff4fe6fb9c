// src/noyau/echantillon.rs
//
// Échantillonnage pour le tracé.
// - single    : balayage 1D de la première variable -> polyligne
// - bivariate : grille n×n sur les deux premières variables -> hauteurs
// - autres    : pas de balayage (un point, rendu par l’UI)
//
// Les sorties sont bornées à [-20, 20] AVANT toute mise à l’échelle d’affichage.

use serde::{Deserialize, Serialize};

use super::analyse::{Arity, ParsedFunction};
use super::variables::Bindings;

/// Borne des hauteurs affichées.
pub const BORNE_HAUTEUR: f64 = 20.0;

pub fn borner(v: f64) -> f64 {
    v.clamp(-BORNE_HAUTEUR, BORNE_HAUTEUR)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeRendu {
    Courbe,
    Surface,
    Points,
}

impl Arity {
    pub fn mode_rendu(self) -> ModeRendu {
        match self {
            Arity::Single => ModeRendu::Courbe,
            Arity::Bivariate => ModeRendu::Surface,
            Arity::Trivariate | Arity::Parametric => ModeRendu::Points,
        }
    }
}

/// Intervalle balayé (mêmes bornes sur chaque axe).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Domaine {
    pub min: f64,
    pub max: f64,
}

impl Default for Domaine {
    fn default() -> Self {
        Self {
            min: -5.0,
            max: 5.0,
        }
    }
}

impl Domaine {
    /// None si l’intervalle est vide, inversé ou non fini.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        (min.is_finite() && max.is_finite() && min < max).then_some(Self { min, max })
    }

    /// i-ème abscisse parmi n points régulièrement espacés (bornes incluses).
    pub fn point(&self, i: usize, n: usize) -> f64 {
        let n = n.max(2);
        self.min + (self.max - self.min) * (i as f64) / ((n - 1) as f64)
    }
}

pub fn echantillonner_courbe(
    f: &ParsedFunction,
    base: &Bindings,
    domaine: Domaine,
    n: usize,
) -> Vec<[f64; 2]> {
    let n = n.max(2);
    let var = f.variables[0];
    let mut liaisons = *base;

    (0..n)
        .map(|i| {
            let x = domaine.point(i, n);
            liaisons.set(var, x);
            [x, borner(f.evaluate(&liaisons))]
        })
        .collect()
}

/// Hauteurs d’une grille n×n, rangées ligne par ligne (j = ligne, i = colonne).
#[derive(Clone, Debug, PartialEq)]
pub struct Grille {
    pub n: usize,
    pub hauteurs: Vec<f64>,
}

impl Grille {
    pub fn hauteur(&self, i: usize, j: usize) -> f64 {
        self.hauteurs[j * self.n + i]
    }

    /// (min, max) des hauteurs ; (0, 0) pour une grille vide.
    pub fn etendue(&self) -> (f64, f64) {
        self.hauteurs
            .iter()
            .fold(None, |acc: Option<(f64, f64)>, &h| match acc {
                None => Some((h, h)),
                Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
            })
            .unwrap_or((0.0, 0.0))
    }
}

/// Colonnes : variables[0] ; lignes : variables[1].
/// Une fonction à une seule variable donne des lignes identiques.
pub fn echantillonner_grille(
    f: &ParsedFunction,
    base: &Bindings,
    domaine: Domaine,
    n: usize,
) -> Grille {
    let n = n.max(2);
    let var_i = f.variables[0];
    let var_j = f.variables.get(1).copied();
    let mut liaisons = *base;
    let mut hauteurs = Vec::with_capacity(n * n);

    for j in 0..n {
        if let Some(v) = var_j {
            liaisons.set(v, domaine.point(j, n));
        }
        for i in 0..n {
            liaisons.set(var_i, domaine.point(i, n));
            hauteurs.push(borner(f.evaluate(&liaisons)));
        }
    }

    Grille { n, hauteurs }
}
