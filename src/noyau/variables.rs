// src/noyau/variables.rs
//
// Alphabet des variables {x, y, z, t, u, v} + liaisons (valeurs numériques).
//
// Contrat de détection :
// - on cherche des MOTS ENTIERS dans le texte normalisé (frontière \b),
//   donc "exp" ne compte pas comme x ;
// - l’ordre rendu est celui de l’alphabet, pas l’ordre d’apparition :
//   "y+x" => [x, y] (l’étiquetage des axes s’appuie dessus).

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Var {
    X,
    Y,
    Z,
    T,
    U,
    V,
}

impl Var {
    /// Ordre fixe de l’alphabet.
    pub const TOUTES: [Var; 6] = [Var::X, Var::Y, Var::Z, Var::T, Var::U, Var::V];

    pub fn as_char(self) -> char {
        match self {
            Var::X => 'x',
            Var::Y => 'y',
            Var::Z => 'z',
            Var::T => 't',
            Var::U => 'u',
            Var::V => 'v',
        }
    }

    pub fn depuis_char(c: char) -> Option<Var> {
        Var::TOUTES.into_iter().find(|v| v.as_char() == c)
    }

    /// Nom d’une lettre seule ("x"), sinon None ("xy", "sin"...).
    pub fn depuis_nom(nom: &str) -> Option<Var> {
        let mut it = nom.chars();
        match (it.next(), it.next()) {
            (Some(c), None) => Var::depuis_char(c),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Valeurs des variables pour une évaluation.
/// Tableau fixe : pas d’allocation dans les boucles d’échantillonnage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bindings {
    valeurs: [Option<f64>; 6],
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, var: Var, valeur: f64) -> Self {
        self.set(var, valeur);
        self
    }

    pub fn set(&mut self, var: Var, valeur: f64) {
        self.valeurs[var.index()] = Some(valeur);
    }

    pub fn get(&self, var: Var) -> Option<f64> {
        self.valeurs[var.index()]
    }
}

impl FromIterator<(Var, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Var, f64)>>(iter: I) -> Self {
        let mut b = Bindings::new();
        for (var, valeur) in iter {
            b.set(var, valeur);
        }
        b
    }
}

fn motif_variable() -> &'static Regex {
    static MOTIF: OnceLock<Regex> = OnceLock::new();
    MOTIF.get_or_init(|| Regex::new(r"\b[xyztuv]\b").expect("motif variable valide"))
}

/// Variables présentes dans le texte normalisé, dans l’ordre de l’alphabet.
/// Peut être vide : le repli [x, y] est décidé par l’appelant.
pub fn detecter_variables(normalisee: &str) -> Vec<Var> {
    let mut vues = [false; 6];
    for m in motif_variable().find_iter(normalisee) {
        if let Some(v) = Var::depuis_nom(m.as_str()) {
            vues[v.index()] = true;
        }
    }

    Var::TOUTES
        .into_iter()
        .filter(|v| vues[v.index()])
        .collect()
}
