// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - ErreurAnalyse : normalisation / jetons / RPN / arbre (l’entrée est refusée)
// - ErreurEval    : évaluation brute d’un arbre valide (domaine, zéro, variable absente)
//
// Aucune des deux ne traverse `parse` : elles servent au message d’erreur de l’UI
// et aux tests. `ParsedFunction::evaluate` les ramène à 0.

use thiserror::Error;

use super::variables::Var;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErreurAnalyse {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseNonOuverte,

    #[error("opérateur inattendu: {0}")]
    OperateurInattendu(String),

    #[error("opérateur manquant entre deux valeurs")]
    OperateurManquant,

    #[error("parenthèse attendue après {0}")]
    ParentheseAttendue(String),

    #[error("identifiant inconnu: {0}")]
    IdentifiantInconnu(String),

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("expression trop profonde (max {0} niveaux)")]
    TropProfonde(usize),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErreurEval {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("{fonction} : hors domaine ({valeur})")]
    HorsDomaine { fonction: &'static str, valeur: f64 },

    #[error("variable non liée: {0}")]
    VariableNonLiee(Var),
}
