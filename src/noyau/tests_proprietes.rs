//! Propriétés (proptest) : totalité de parse / evaluate sur des entrées arbitraires.

use proptest::prelude::*;

use super::{parse, Arity, Bindings, Var};

fn liaisons(valeurs: [f64; 6]) -> Bindings {
    Var::TOUTES.into_iter().zip(valeurs).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// N’importe quelle chaîne (Unicode, contrôles...) : parse rend une valeur cohérente.
    #[test]
    fn parse_total_sur_toute_chaine(s in any::<String>()) {
        let f = parse(&s);
        prop_assert!(!f.variables.is_empty());
        prop_assert_eq!(f.arity, Arity::depuis_nombre(f.variables.len()));
    }

    /// Saisies “presque valides” + liaisons quelconques (NaN, ±∞ compris) : résultat fini.
    #[test]
    fn evaluate_toujours_fini(
        s in "[xyztuv0-9.+*/^() -]{0,12}|(sin|cos|tan|log|ln|exp|sqrt|abs)\\([xyz0-9+*/^-]{0,8}\\)",
        valeurs in prop::array::uniform6(any::<f64>()),
    ) {
        let f = parse(&s);
        let v = f.evaluate(&liaisons(valeurs));
        prop_assert!(v.is_finite(), "s={:?} v={}", s, v);
    }

    /// Les variables rendues sont distinctes et dans l’ordre de l’alphabet.
    #[test]
    fn variables_ordonnees_et_distinctes(s in "[xyztuv+*()0-9]{1,16}") {
        let f = parse(&s);
        prop_assert!(f.variables.windows(2).all(|w| w[0] < w[1]));
    }

    /// Multiplication implicite : "k" + var == k * valeur.
    #[test]
    fn coefficient_implicite(k in 0u32..1000, x in -1.0e3f64..1.0e3) {
        let f = parse(&format!("{k}x"));
        let v = f.evaluate(&Bindings::new().with(Var::X, x));
        prop_assert_eq!(v, k as f64 * x);
    }
}
