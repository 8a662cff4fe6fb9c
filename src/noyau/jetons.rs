// src/noyau/jetons.rs

use super::erreur::ErreurAnalyse;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + variables + constantes (pi, e)
    // NOTE: la construction de l’arbre décidera de ce que désigne le mot.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // Moins unaire : produit seulement par to_rpn (jamais par tokenize).
    Neg,

    LPar,
    RPar,
}

/// Fin d’un littéral numérique qui commence en `i`, ou None si `i` n’en commence pas.
/// Formes: 12, 2.5, 2., .5 (pas de notation 1e3 : "e" est la constante).
pub fn fin_nombre(chars: &[char], i: usize) -> Option<usize> {
    let c = *chars.get(i)?;
    let suivant_chiffre = chars.get(i + 1).is_some_and(|d| d.is_ascii_digit());
    if !c.is_ascii_digit() && !(c == '.' && suivant_chiffre) {
        return None;
    }

    let mut j = i;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if j < chars.len() && chars[j] == '.' {
        j += 1;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
    }
    Some(j)
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 2.5, .5)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - π (équivaut à ident("pi"))
/// - identifiants [a-zA-Z]+ (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurAnalyse> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            'π' => Some(Tok::Ident("pi".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_ascii_lowercase()));
            continue;
        }

        if let Some(fin) = fin_nombre(&chars, i) {
            let txt: String = chars[i..fin].iter().collect();
            let n = txt
                .parse::<f64>()
                .map_err(|_| ErreurAnalyse::NombreInvalide(txt.clone()))?;
            out.push(Tok::Num(n));
            i = fin;
            continue;
        }

        return Err(ErreurAnalyse::CaractereInattendu(c));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
