//! Traceur Q-pur — noyau réutilisable
//!
//! `parse` transforme une saisie ("sin(x)*cos(y)", "2x", "xy"...) en fonction
//! numérique totale : jamais d’erreur, jamais de NaN/∞ à l’évaluation.
//! L’application egui (src/main.rs) n’en est qu’un client.

pub mod noyau;

pub use noyau::{analyser, parse, Arity, Bindings, ParsedFunction, Var};
