//! Noyau : analyse d’expressions -> fonction numérique totale
//!
//! Organisation interne :
//! - normalisation.rs : multiplications implicites, ln -> log, blancs
//! - jetons.rs        : tokenisation
//! - rpn.rs           : shunting-yard + construction Expr (profondeur bornée)
//! - expr.rs          : AST f64 + évaluation brute
//! - variables.rs     : alphabet {x, y, z, t, u, v}, liaisons, détection
//! - analyse.rs       : pipeline complet, ParsedFunction, repli
//! - echantillon.rs   : balayage courbe / grille pour le tracé
//! - erreur.rs        : erreurs typées (jamais renvoyées par `parse`)

pub mod analyse;
pub mod echantillon;
pub mod erreur;
pub mod expr;
pub mod jetons;
pub mod normalisation;
pub mod rpn;
pub mod variables;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use analyse::{analyser, parse, Arity, Demarche, ParsedFunction};
pub use echantillon::{Domaine, ModeRendu};
pub use variables::{Bindings, Var};
