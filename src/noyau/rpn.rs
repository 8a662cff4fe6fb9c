// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la forme
// - Puis reconstruire Expr
//
// Précédences (basse -> haute):
//   + -  <  * /  <  moins unaire  <  ^ (associatif à droite)  <  fonction / parenthèses
//
// Règles:
// - Ident(name):
//    - si name est une fonction => opérateur unaire collé à sa parenthèse (obligatoire)
//    - sinon => atome (variable ou constante, résolu dans from_rpn)
// - '-' sans valeur avant => Tok::Neg (préfixe) ; '+' sans valeur avant => ignoré
// - -x^2 = -(x^2) ; 2*-x = 2*(-x) ; 2^3^2 = 2^(3^2)

use std::f64::consts;

use super::erreur::ErreurAnalyse;
use super::expr::{Expr, Fonction, Op};
use super::jetons::{format_tokens, Tok};
use super::variables::Var;

/// Garde-fou : l’évaluation est récursive, on borne la profondeur de l’arbre.
pub const PROFONDEUR_MAX: usize = 500;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

fn est_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if is_fonction_ident(name))
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("x"), Star, Num(2), RPar]
///   rpn:    [Ident("x"), Num(2), Star, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurAnalyse> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les opérandes manquants.
    let mut prev_was_value = false;

    // Nom de la fonction qui attend sa parenthèse ouvrante.
    let mut attend_parenthese: Option<String> = None;

    for tok in tokens.iter().cloned() {
        if let Some(name) = attend_parenthese.take() {
            if !matches!(tok, Tok::LPar) {
                return Err(ErreurAnalyse::ParentheseAttendue(name));
            }
        }

        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(ErreurAnalyse::OperateurManquant);
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(ErreurAnalyse::OperateurManquant);
                }
                if is_fonction_ident(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    attend_parenthese = Some(name.clone());
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurAnalyse::OperateurManquant);
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurAnalyse::OperateurInattendu(")".into()));
                }

                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurAnalyse::ParentheseNonOuverte);
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(est_fonction) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus if !prev_was_value => {
                // plus unaire : sans effet
            }

            Tok::Minus if !prev_was_value => {
                // moins unaire : préfixe, ne dépile rien
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurAnalyse::OperateurInattendu(format_tokens(
                        std::slice::from_ref(&tok),
                    )));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || est_fonction(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurAnalyse::ExpressionInvalide),
        }
    }

    if let Some(name) = attend_parenthese {
        return Err(ErreurAnalyse::ParentheseAttendue(name));
    }
    if !prev_was_value {
        // entrée vide, ou se termine par un opérateur
        return Err(ErreurAnalyse::ExpressionInvalide);
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurAnalyse::ParentheseNonFermee);
        }
        out.push(op);
    }

    Ok(out)
}

/// Résout un atome : variable de l’alphabet ou constante.
fn atome(name: &str) -> Result<Expr, ErreurAnalyse> {
    if let Some(v) = Var::depuis_nom(name) {
        return Ok(Expr::Var(v));
    }
    match name {
        "pi" => Ok(Expr::Num(consts::PI)),
        "e" => Ok(Expr::Num(consts::E)),
        _ => Err(ErreurAnalyse::IdentifiantInconnu(name.to_string())),
    }
}

/// Construit une Expr à partir d’une RPN.
/// Chaque entrée de pile garde sa profondeur (pas de re-parcours de l’arbre).
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurAnalyse> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let empile = |st: &mut Vec<(Expr, usize)>, e: Expr, prof: usize| {
        if prof > PROFONDEUR_MAX {
            return Err(ErreurAnalyse::TropProfonde(PROFONDEUR_MAX));
        }
        st.push((e, prof));
        Ok(())
    };

    for tok in rpn {
        match tok {
            Tok::Num(n) => st.push((Expr::Num(*n), 1)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or(ErreurAnalyse::ExpressionInvalide)?;
                let (a, pa) = st.pop().ok_or(ErreurAnalyse::ExpressionInvalide)?;

                let op = match tok {
                    Tok::Plus => Op::Add,
                    Tok::Minus => Op::Sub,
                    Tok::Star => Op::Mul,
                    Tok::Slash => Op::Div,
                    _ => Op::Pow,
                };
                empile(
                    &mut st,
                    Expr::BinOp(op, Box::new(a), Box::new(b)),
                    1 + pa.max(pb),
                )?;
            }

            Tok::Neg => {
                let (a, pa) = st.pop().ok_or(ErreurAnalyse::ExpressionInvalide)?;
                empile(&mut st, Expr::Neg(Box::new(a)), 1 + pa)?;
            }

            Tok::Ident(name) => match Fonction::depuis_nom(name) {
                Some(f) => {
                    let (a, pa) = st.pop().ok_or(ErreurAnalyse::ExpressionInvalide)?;
                    empile(&mut st, Expr::Call(f, Box::new(a)), 1 + pa)?;
                }
                None => st.push((atome(name)?, 1)),
            },

            Tok::LPar | Tok::RPar => return Err(ErreurAnalyse::ExpressionInvalide),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurAnalyse::ExpressionInvalide),
    }
}
