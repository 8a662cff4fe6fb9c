//! Noyau — analyse (pipeline réel)
//!
//! normaliser -> tokenize -> RPN -> Expr -> variables -> arité
//!
//! Contrat : `parse` ne panique pas et ne renvoie pas d’erreur. Toute saisie
//! refusée donne la fonction de repli (variables [x, y], "0", bivariée, ≡ 0).
//! Chaque frappe relance une analyse : une saisie à moitié tapée est le cas normal.

use std::fmt;

use super::erreur::ErreurAnalyse;
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize};
use super::normalisation::normaliser;
use super::rpn::{from_rpn, to_rpn};
use super::variables::{detecter_variables, Bindings, Var};

/// Forme de la fonction, déduite du nombre de variables seulement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Single,
    Bivariate,
    Trivariate,
    Parametric,
}

impl Arity {
    pub fn depuis_nombre(n: usize) -> Arity {
        match n {
            1 => Arity::Single,
            2 => Arity::Bivariate,
            3 => Arity::Trivariate,
            _ => Arity::Parametric,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arity::Single => "single",
            Arity::Bivariate => "bivariate",
            Arity::Trivariate => "trivariate",
            Arity::Parametric => "parametric",
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Résultat d’une analyse : immuable, recréé à chaque changement du texte.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedFunction {
    /// Jamais vide, ordre de l’alphabet (x, y, z, t, u, v).
    pub variables: Vec<Var>,
    /// Texte normalisé ("0" pour le repli).
    pub expression: String,
    pub arity: Arity,
    arbre: Expr,
}

impl ParsedFunction {
    /// Fonction de repli : bivariée, constante nulle.
    pub fn repli() -> Self {
        Self {
            variables: variables_par_defaut(),
            expression: "0".to_string(),
            arity: Arity::Bivariate,
            arbre: Expr::Num(0.0),
        }
    }

    /// Évaluation TOTALE : erreur (division par zéro, hors domaine, variable
    /// non liée) ou résultat non fini (NaN, ±∞) => 0.
    pub fn evaluate(&self, liaisons: &Bindings) -> f64 {
        match self.arbre.evaluer(liaisons) {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    pub fn arbre(&self) -> &Expr {
        &self.arbre
    }
}

impl Default for ParsedFunction {
    fn default() -> Self {
        Self::repli()
    }
}

fn variables_par_defaut() -> Vec<Var> {
    vec![Var::X, Var::Y]
}

/// Trace de l’analyse (panneau “Démarche” de l’UI).
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub normalisee: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub variables: String,
    pub forme: String,
    pub note: String,
}

/// API publique totale : jamais d’erreur, repli si la saisie est refusée.
pub fn parse(brute: &str) -> ParsedFunction {
    match analyser(brute) {
        Ok((f, _d)) => f,
        Err(e) => {
            log::debug!("saisie refusée ({e}) : {brute:?}");
            ParsedFunction::repli()
        }
    }
}

/// API publique détaillée : fonction + démarche, ou la raison du refus.
pub fn analyser(brute: &str) -> Result<(ParsedFunction, Demarche), ErreurAnalyse> {
    // 1) Normalisation
    let normalisee = normaliser(brute);
    if normalisee.is_empty() {
        return Err(ErreurAnalyse::EntreeVide);
    }

    // 2) Jetons
    let jetons = tokenize(&normalisee)?;

    // 3) RPN
    let rpn = to_rpn(&jetons)?;

    // 4) AST (Expr)
    let arbre = from_rpn(&rpn)?;

    // 5) Variables (texte normalisé, ordre de l’alphabet), repli [x, y]
    let mut variables = detecter_variables(&normalisee);
    if variables.is_empty() {
        variables = variables_par_defaut();
    }

    // 6) Arité
    let arity = Arity::depuis_nombre(variables.len());

    let d = Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
        arbre: arbre.to_string(),
        variables: variables
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        forme: arity.to_string(),
        note: "Pipeline: normalisation → jetons → RPN → Expr → variables → arité.".into(),
        normalisee: normalisee.clone(),
    };

    let f = ParsedFunction {
        variables,
        expression: normalisee,
        arity,
        arbre,
    };

    Ok((f, d))
}
