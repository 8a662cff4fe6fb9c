// src/noyau/normalisation.rs
//
// Réparation syntaxique avant compilation (saisie “naturelle” -> texte compilable).
//
// Étapes:
// - retire tous les blancs, met les lettres ASCII en minuscules
// - découpe en pièces: nombre, mot, symbole
// - décompose chaque mot: fonction exacte (fin du mot), constante (pi, e), variable
//   (un mot qui ne se décompose pas reste tel quel : la compilation le refusera)
// - insère '*' entre une fin de valeur et un début de valeur
//
// Ordre des règles : UNE seule passe gauche -> droite sur les pièces, jamais des
// passes textuelles successives. Donc "x2y" => "x*2*y" (= 2xy), sans dépendre
// de l’ordre “chiffre-variable” / “variable-chiffre”.

use super::expr::Fonction;
use super::jetons::fin_nombre;
use super::variables::Var;

#[derive(Clone, Debug, PartialEq)]
enum Piece {
    Nombre(String),
    Var(Var),
    Constante(&'static str),
    Fonction(Fonction),
    // mot non décomposable : recopié tel quel
    Mot(String),
    Symbole(char),
}

impl Piece {
    /// Peut terminer une valeur : 2, x, pi, )
    fn fin_valeur(&self) -> bool {
        matches!(
            self,
            Piece::Nombre(_) | Piece::Var(_) | Piece::Constante(_) | Piece::Symbole(')')
        )
    }

    /// Peut commencer une valeur : 2, x, pi, sin, (
    fn debut_valeur(&self) -> bool {
        matches!(
            self,
            Piece::Nombre(_)
                | Piece::Var(_)
                | Piece::Constante(_)
                | Piece::Fonction(_)
                | Piece::Symbole('(')
        )
    }

    fn ecrire(&self, out: &mut String) {
        match self {
            Piece::Nombre(s) | Piece::Mot(s) => out.push_str(s),
            Piece::Var(v) => out.push(v.as_char()),
            Piece::Constante(c) => out.push_str(c),
            Piece::Fonction(f) => out.push_str(f.nom()),
            Piece::Symbole(c) => out.push(*c),
        }
    }
}

/// Décompose un mot (lettres minuscules) gauche -> droite.
/// None si une lettre ne correspond à rien.
fn decomposer_mot(mot: &str) -> Option<Vec<Piece>> {
    let mut pieces = Vec::new();
    let mut reste = mot;

    while !reste.is_empty() {
        if let Some(f) = Fonction::depuis_nom(reste) {
            pieces.push(Piece::Fonction(f));
            break;
        }
        if let Some(apres) = reste.strip_prefix("pi") {
            pieces.push(Piece::Constante("pi"));
            reste = apres;
            continue;
        }

        let mut it = reste.chars();
        let c = it.next()?;
        if let Some(v) = Var::depuis_char(c) {
            pieces.push(Piece::Var(v));
        } else if c == 'e' {
            pieces.push(Piece::Constante("e"));
        } else {
            return None;
        }
        reste = it.as_str();
    }

    Some(pieces)
}

fn decouper(chars: &[char]) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(fin) = fin_nombre(chars, i) {
            pieces.push(Piece::Nombre(chars[i..fin].iter().collect()));
            i = fin;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            match decomposer_mot(&mot) {
                Some(p) => pieces.extend(p),
                None => pieces.push(Piece::Mot(mot)),
            }
            continue;
        }

        if c == 'π' {
            pieces.push(Piece::Constante("pi"));
        } else {
            pieces.push(Piece::Symbole(c));
        }
        i += 1;
    }

    pieces
}

/// Normalise une saisie brute. Ne refuse jamais : les caractères inconnus
/// passent et seront signalés par la tokenisation.
pub fn normaliser(brute: &str) -> String {
    let chars: Vec<char> = brute
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut out = String::with_capacity(chars.len() + 8);
    let mut precedente: Option<Piece> = None;

    for piece in decouper(&chars) {
        if let Some(prev) = &precedente {
            let deux_nombres =
                matches!(prev, Piece::Nombre(_)) && matches!(piece, Piece::Nombre(_));
            if prev.fin_valeur() && piece.debut_valeur() && !deux_nombres {
                out.push('*');
            }
        }
        piece.ecrire(&mut out);
        precedente = Some(piece);
    }

    out
}
