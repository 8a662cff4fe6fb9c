//! Tests fuzz safe : totalité + déterminisme + limites contrôlées.
//!
//! But : marteler parse/evaluate sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : evaluate(...) est toujours fini

use std::time::{Duration, Instant};

use super::rpn::PROFONDEUR_MAX;
use super::{parse, Bindings, ParsedFunction, Var};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn valeur(&mut self) -> f64 {
        // [-10, 10] avec zéros fréquents (divisions, logs)
        if self.pick(5) == 0 {
            0.0
        } else {
            (self.pick(2001) as f64 - 1000.0) / 100.0
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

const ATOMES: [&str; 10] = ["x", "y", "z", "t", "u", "v", "0", "2", "0.5", "pi"];
const FONCTIONS: [&str; 11] = [
    "sin", "cos", "tan", "log", "ln", "exp", "sqrt", "abs", "asin", "acos", "atan",
];
const OPS: [&str; 5] = ["+", "-", "*", "/", "^"];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return ATOMES[rng.pick(ATOMES.len() as u32) as usize].to_string();
    }

    match rng.pick(6) {
        0 => ATOMES[rng.pick(ATOMES.len() as u32) as usize].to_string(),
        1 | 2 => format!(
            "({}{}{})",
            gen_expr(rng, depth - 1),
            OPS[rng.pick(OPS.len() as u32) as usize],
            gen_expr(rng, depth - 1)
        ),
        3 => format!(
            "{}({})",
            FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize],
            gen_expr(rng, depth - 1)
        ),
        4 => format!("-{}", gen_expr(rng, depth - 1)),
        // juxtaposition : multiplication implicite
        _ => format!("{}{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
    }
}

/// Soupe de caractères : surtout des saisies à moitié tapées.
fn gen_soupe(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        'x', 'y', 'z', 't', 'u', 'v', 's', 'i', 'n', 'q', 'r', 'l', 'o', 'g', 'e', 'p', '0', '1',
        '9', '.', '+', '-', '*', '/', '^', '(', ')', ' ', 'π', '#', '\u{0}', 'é',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn liaisons_aleatoires(rng: &mut Rng) -> Bindings {
    Var::TOUTES.into_iter().map(|v| (v, rng.valeur())).collect()
}

fn check_total(expr: &str, f: &ParsedFunction, b: &Bindings) -> f64 {
    assert!(!f.variables.is_empty(), "variables vides: expr={expr:?}");
    let v = f.evaluate(b);
    assert!(v.is_finite(), "non fini: expr={expr:?} v={v}");
    v
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut acceptees = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let f = parse(&expr);
        if f.expression != "0" {
            acceptees += 1;
        }

        for _ in 0..4 {
            let b = liaisons_aleatoires(&mut rng);
            check_total(&expr, &f, &b);
        }
    }

    // la grammaire générée est valide : presque tout doit passer
    assert!(acceptees > 250, "trop peu d’expressions acceptées: {acceptees}");
}

#[test]
fn fuzz_safe_soupes_de_caracteres() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..500 {
        budget(t0, max);

        let len = rng.pick(24) as usize;
        let expr = gen_soupe(&mut rng, len);
        let f = parse(&expr);
        let b = liaisons_aleatoires(&mut rng);
        check_total(&expr, &f, &b);
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let mut r1 = Rng::new(42);
    let mut r2 = Rng::new(42);

    for _ in 0..50 {
        let e1 = gen_expr(&mut r1, 3);
        let e2 = gen_expr(&mut r2, 3);
        assert_eq!(e1, e2);

        let b = Bindings::new()
            .with(Var::X, 0.3)
            .with(Var::Y, -1.2)
            .with(Var::Z, 2.0);
        assert_eq!(parse(&e1), parse(&e2));
        assert_eq!(
            parse(&e1).evaluate(&b).to_bits(),
            parse(&e2).evaluate(&b).to_bits()
        );
    }
}

#[test]
fn fuzz_safe_profondeur_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // chaîne de fonctions très profonde : refusée proprement, pas de débordement de pile
    let profond = format!("{}x{}", "sin(".repeat(5000), ")".repeat(5000));
    let f = parse(&profond);
    assert_eq!(f, ParsedFunction::repli());

    // juste sous la limite : acceptée
    let n = PROFONDEUR_MAX - 1;
    let limite = format!("{}x{}", "abs(".repeat(n), ")".repeat(n));
    let f = parse(&limite);
    assert_eq!(f.variables, vec![Var::X]);
    assert_eq!(f.evaluate(&Bindings::new().with(Var::X, -3.0)), 3.0);

    budget(t0, max);
}

#[test]
fn fuzz_safe_longue_somme() {
    // 400 termes : profondeur 400 (associatif à gauche), sous la limite
    let expr = vec!["x"; 400].join("+");
    let f = parse(&expr);
    assert_eq!(f.evaluate(&Bindings::new().with(Var::X, 0.5)), 200.0);
}
