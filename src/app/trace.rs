// src/app/trace.rs
//
// Tracé 2D (egui::Painter), selon le mode de rendu :
// - Courbe  : polyligne de la première variable balayée
// - Surface : grille colorée par la hauteur (vue de dessus)
// - Points  : un marqueur à la position des curseurs + la valeur
//
// Les hauteurs arrivent déjà bornées à [-20, 20] (noyau::echantillon).

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};

use traceur_qpur::noyau::echantillon::{echantillonner_courbe, echantillonner_grille, Grille};
use traceur_qpur::noyau::{Bindings, Domaine, ModeRendu, ParsedFunction};

use super::etat::Reglages;

/// Passage repère mathématique -> écran.
struct Repere {
    rect: Rect,
    x: (f64, f64),
    y: (f64, f64),
}

impl Repere {
    fn vers_ecran(&self, x: f64, y: f64) -> Pos2 {
        let tx = (x - self.x.0) / (self.x.1 - self.x.0);
        let ty = (y - self.y.0) / (self.y.1 - self.y.0);
        Pos2::new(
            egui::lerp(self.rect.left()..=self.rect.right(), tx as f32),
            egui::lerp(self.rect.bottom()..=self.rect.top(), ty as f32),
        )
    }
}

/// Zone de tracé carrée + dispatch sur le mode de rendu.
pub fn dessiner(ui: &mut egui::Ui, f: &ParsedFunction, base: &Bindings, reglages: &Reglages) {
    let cote = ui.available_width().min(520.0);
    let (resp, painter) = ui.allocate_painter(egui::vec2(cote, cote), Sense::hover());
    let rect = resp.rect;

    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

    let texte = ui.visuals().text_color();
    match f.arity.mode_rendu() {
        ModeRendu::Courbe => dessiner_courbe(&painter, rect, f, base, reglages, texte),
        ModeRendu::Surface => dessiner_surface(&painter, rect, f, base, reglages, texte),
        ModeRendu::Points => dessiner_point(&painter, rect, f, base, reglages.domaine, texte),
    }
}

fn axes(painter: &egui::Painter, r: &Repere, couleur: Color32) {
    let stroke = Stroke::new(1.0, couleur.gamma_multiply(0.4));
    if r.y.0 <= 0.0 && 0.0 <= r.y.1 {
        painter.line_segment([r.vers_ecran(r.x.0, 0.0), r.vers_ecran(r.x.1, 0.0)], stroke);
    }
    if r.x.0 <= 0.0 && 0.0 <= r.x.1 {
        painter.line_segment([r.vers_ecran(0.0, r.y.0), r.vers_ecran(0.0, r.y.1)], stroke);
    }
}

fn dessiner_courbe(
    painter: &egui::Painter,
    rect: Rect,
    f: &ParsedFunction,
    base: &Bindings,
    reglages: &Reglages,
    texte: Color32,
) {
    let d = reglages.domaine;
    let pts = echantillonner_courbe(f, base, d, reglages.resolution_courbe);

    // échelle verticale : étendue réelle des valeurs (déjà bornées), marge 5 %
    let (mut lo, mut hi) = pts
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[1]), hi.max(p[1]))
        });
    if hi - lo < 1e-9 {
        lo -= 1.0;
        hi += 1.0;
    }
    let marge = (hi - lo) * 0.05;

    let repere = Repere {
        rect: rect.shrink(8.0),
        x: (d.min, d.max),
        y: (lo - marge, hi + marge),
    };
    axes(painter, &repere, texte);

    let ligne: Vec<Pos2> = pts.iter().map(|p| repere.vers_ecran(p[0], p[1])).collect();
    painter.add(Shape::line(ligne, Stroke::new(2.0, Color32::from_rgb(80, 160, 255))));

    let var = f.variables[0];
    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        Align2::LEFT_TOP,
        format!("f({var}) sur [{}, {}] ∈ [{lo:.3}, {hi:.3}]", d.min, d.max),
        FontId::monospace(12.0),
        texte,
    );
}

/// Bleu (bas) -> blanc -> rouge (haut).
fn couleur_hauteur(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        let k = t * 2.0;
        Color32::from_rgb(
            (40.0 + 215.0 * k) as u8,
            (90.0 + 165.0 * k) as u8,
            255,
        )
    } else {
        let k = (t - 0.5) * 2.0;
        Color32::from_rgb(255, (255.0 - 175.0 * k) as u8, (255.0 - 215.0 * k) as u8)
    }
}

fn dessiner_surface(
    painter: &egui::Painter,
    rect: Rect,
    f: &ParsedFunction,
    base: &Bindings,
    reglages: &Reglages,
    texte: Color32,
) {
    let grille: Grille = echantillonner_grille(f, base, reglages.domaine, reglages.resolution_grille);
    let (lo, hi) = grille.etendue();
    let ecart = if hi - lo < 1e-9 { 1.0 } else { hi - lo };

    let zone = rect.shrink(8.0);
    let n = grille.n;
    let cw = zone.width() / n as f32;
    let ch = zone.height() / n as f32;

    for j in 0..n {
        for i in 0..n {
            let t = ((grille.hauteur(i, j) - lo) / ecart) as f32;
            // j = 0 en bas (repère mathématique)
            let min = Pos2::new(zone.left() + i as f32 * cw, zone.bottom() - (j + 1) as f32 * ch);
            let cellule = Rect::from_min_size(min, egui::vec2(cw + 0.5, ch + 0.5));
            painter.rect_filled(cellule, 0.0, couleur_hauteur(t));
        }
    }

    let (vx, vy) = (f.variables[0], f.variables[1]);
    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        Align2::LEFT_TOP,
        format!("f({vx}, {vy}) ∈ [{lo:.3}, {hi:.3}]  (→ {vx}, ↑ {vy})"),
        FontId::monospace(12.0),
        texte,
    );
}

fn dessiner_point(
    painter: &egui::Painter,
    rect: Rect,
    f: &ParsedFunction,
    base: &Bindings,
    d: Domaine,
    texte: Color32,
) {
    let repere = Repere {
        rect: rect.shrink(8.0),
        x: (d.min, d.max),
        y: (d.min, d.max),
    };
    axes(painter, &repere, texte);

    let (vx, vy) = (f.variables[0], f.variables[1]);
    let px = base.get(vx).unwrap_or(0.0).clamp(d.min, d.max);
    let py = base.get(vy).unwrap_or(0.0).clamp(d.min, d.max);
    let valeur = f.evaluate(base);

    let pos = repere.vers_ecran(px, py);
    painter.circle_filled(pos, 6.0, Color32::from_rgb(255, 120, 60));
    painter.text(
        pos + egui::vec2(10.0, -10.0),
        Align2::LEFT_BOTTOM,
        format!("{valeur:.4}"),
        FontId::monospace(13.0),
        texte,
    );
    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        Align2::LEFT_TOP,
        format!("{} : marqueur aux curseurs ({vx}, {vy})", f.arity),
        FontId::monospace(12.0),
        texte,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repere_coins() {
        let r = Repere {
            rect: Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0)),
            x: (-1.0, 1.0),
            y: (0.0, 10.0),
        };
        assert_eq!(r.vers_ecran(-1.0, 0.0), Pos2::new(0.0, 50.0));
        assert_eq!(r.vers_ecran(1.0, 10.0), Pos2::new(100.0, 0.0));
        assert_eq!(r.vers_ecran(0.0, 5.0), Pos2::new(50.0, 25.0));
    }

    #[test]
    fn palette_extremites() {
        assert_eq!(couleur_hauteur(0.0), Color32::from_rgb(40, 90, 255));
        assert_eq!(couleur_hauteur(1.0), Color32::from_rgb(255, 80, 40));
        assert_eq!(couleur_hauteur(7.0), couleur_hauteur(1.0));
    }
}
