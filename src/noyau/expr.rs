// src/noyau/expr.rs
//
// AST flottant (f64).
// - Num   : littéral ou constante (pi, e déjà remplacées par leur valeur)
// - Var   : une lettre de l’alphabet
// - BinOp : + - * / ^
// - Neg   : moins unaire
// - Call  : fonction unaire nommée (radians pour la trigo)
//
// evaluer() est l’évaluation BRUTE : elle signale division par zéro, hors domaine,
// variable absente. La version totale (0 partout où ça casse) vit dans
// ParsedFunction::evaluate.

use std::fmt;

use super::erreur::ErreurEval;
use super::variables::{Bindings, Var};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Exp,
    Sqrt,
    Abs,
}

impl Fonction {
    /// Fonctions reconnues (toujours sur un mot entier).
    pub const TOUTES: [Fonction; 10] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Log,
        Fonction::Exp,
        Fonction::Sqrt,
        Fonction::Abs,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Log => "log",
            Fonction::Exp => "exp",
            Fonction::Sqrt => "sqrt",
            Fonction::Abs => "abs",
        }
    }

    /// "ln" est un alias de "log" (logarithme népérien).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        if nom == "ln" {
            return Some(Fonction::Log);
        }
        Fonction::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    pub fn appliquer(self, a: f64) -> Result<f64, ErreurEval> {
        let hors_domaine = || ErreurEval::HorsDomaine {
            fonction: self.nom(),
            valeur: a,
        };

        match self {
            Fonction::Sin => Ok(a.sin()),
            Fonction::Cos => Ok(a.cos()),
            Fonction::Tan => Ok(a.tan()),
            Fonction::Asin | Fonction::Acos if !(-1.0..=1.0).contains(&a) => Err(hors_domaine()),
            Fonction::Asin => Ok(a.asin()),
            Fonction::Acos => Ok(a.acos()),
            Fonction::Atan => Ok(a.atan()),
            Fonction::Log if a <= 0.0 => Err(hors_domaine()),
            Fonction::Log => Ok(a.ln()),
            Fonction::Exp => Ok(a.exp()),
            Fonction::Sqrt if a < 0.0 => Err(hors_domaine()),
            Fonction::Sqrt => Ok(a.sqrt()),
            Fonction::Abs => Ok(a.abs()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(Var),
    BinOp(Op, Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Call(Fonction, Box<Expr>),
}

impl Expr {
    /// Évaluation brute (peut échouer). Les NaN/±∞ ne sont PAS filtrés ici.
    pub fn evaluer(&self, liaisons: &Bindings) -> Result<f64, ErreurEval> {
        use Expr::*;

        match self {
            Num(n) => Ok(*n),
            Var(v) => liaisons.get(*v).ok_or(ErreurEval::VariableNonLiee(*v)),
            Neg(a) => Ok(-a.evaluer(liaisons)?),
            Call(f, a) => f.appliquer(a.evaluer(liaisons)?),
            BinOp(op, a, b) => {
                let a = a.evaluer(liaisons)?;
                let b = b.evaluer(liaisons)?;
                match op {
                    Op::Add => Ok(a + b),
                    Op::Sub => Ok(a - b),
                    Op::Mul => Ok(a * b),
                    Op::Div => {
                        if b == 0.0 {
                            return Err(ErreurEval::DivisionParZero);
                        }
                        Ok(a / b)
                    }
                    Op::Pow => Ok(puissance(a, b)),
                }
            }
        }
    }

    /// Profondeur de l’arbre (feuille = 1).
    pub fn profondeur(&self) -> usize {
        use Expr::*;

        match self {
            Num(_) | Var(_) => 1,
            Neg(a) | Call(_, a) => 1 + a.profondeur(),
            BinOp(_, a, b) => 1 + a.profondeur().max(b.profondeur()),
        }
    }
}

/// Exposant entier => powi (exact pour 3^2, 2^10...), sinon powf.
fn puissance(base: f64, exp: f64) -> f64 {
    if exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64 {
        base.powi(exp as i32)
    } else {
        base.powf(exp)
    }
}

/// Affichage entièrement parenthésé (lisible dans la démarche, sans ambiguïté).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Var(v) => write!(f, "{v}"),
            Expr::Neg(a) => write!(f, "-({a})"),
            Expr::Call(fct, a) => write!(f, "{}({a})", fct.nom()),
            Expr::BinOp(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
        }
    }
}
