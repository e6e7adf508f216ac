use rayon::prelude::*;

use crate::curve::Curve;
use crate::field::Field;

const BACKGROUND: [u8; 4] = [250, 250, 248, 255];
const ROUGH_STROKE: [u8; 4] = [38, 84, 164, 255];
const IDEAL_STROKE: [u8; 4] = [196, 48, 40, 255];

/// Fraction of the image left as margin around the curves.
const MARGIN: f32 = 0.05;

#[inline]
fn put(rgba: &mut [u8], w: usize, h: usize, x: i64, y: i64, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
        return;
    }
    let i = (y as usize * w + x as usize) * 4;
    rgba[i..i + 4].copy_from_slice(&color);
}

/// DDA segment between two pixel positions.
fn draw_segment(rgba: &mut [u8], w: usize, h: usize, from: (f32, f32), to: (f32, f32), color: [u8; 4]) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        let x = (from.0 + dx * t).round() as i64;
        let y = (from.1 + dy * t).round() as i64;
        put(rgba, w, h, x, y, color);
    }
}

struct Viewport {
    scale: f32,
    off_x: f32,
    off_y: f32,
    h: usize,
}

impl Viewport {
    /// Fit both curves into w x h with equal aspect ratio.
    fn fit(curves: &[&Curve], w: usize, h: usize) -> Self {
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for curve in curves {
            for &v in &curve.x {
                min_x = min_x.min(v);
                max_x = max_x.max(v);
            }
            for &v in &curve.y {
                min_y = min_y.min(v);
                max_y = max_y.max(v);
            }
        }
        let span_x = (max_x - min_x).max(f32::EPSILON);
        let span_y = (max_y - min_y).max(f32::EPSILON);
        let usable_w = w as f32 * (1.0 - 2.0 * MARGIN);
        let usable_h = h as f32 * (1.0 - 2.0 * MARGIN);
        // Equal aspect: one scale for both axes.
        let scale = (usable_w / span_x).min(usable_h / span_y);
        let off_x = w as f32 / 2.0 - (min_x + max_x) / 2.0 * scale;
        let off_y = h as f32 / 2.0 - (min_y + max_y) / 2.0 * scale;
        Self {
            scale,
            off_x,
            off_y,
            h,
        }
    }

    #[inline]
    fn project(&self, x: f32, y: f32) -> (f32, f32) {
        // y axis flipped: curve space points up, pixel space points down.
        (
            x * self.scale + self.off_x,
            self.h as f32 - (y * self.scale + self.off_y),
        )
    }
}

fn draw_curve(rgba: &mut [u8], w: usize, h: usize, view: &Viewport, curve: &Curve, color: [u8; 4]) {
    let n = curve.len();
    if n == 0 {
        return;
    }
    let mut prev = view.project(curve.x[0], curve.y[0]);
    for i in 1..n {
        let next = view.project(curve.x[i], curve.y[i]);
        draw_segment(rgba, w, h, prev, next, color);
        prev = next;
    }
}

/// Line plot of the roughened curve over its ideal reference, equal aspect
/// ratio, light background. Pure: the caller decides what to do with the
/// pixels.
pub fn render_curves(ideal: &Curve, rough: &Curve, w: usize, h: usize) -> Vec<u8> {
    let mut rgba = vec![0u8; w * h * 4];
    rgba.par_chunks_mut(4).for_each(|px| {
        px.copy_from_slice(&BACKGROUND);
    });

    let view = Viewport::fit(&[ideal, rough], w, h);
    draw_curve(&mut rgba, w, h, &view, ideal, IDEAL_STROKE);
    draw_curve(&mut rgba, w, h, &view, rough, ROUGH_STROKE);
    rgba
}

/// Grayscale diagnostic of the noise field, [-1, 1] mapped to black..white.
pub fn render_field(field: &Field) -> Vec<u8> {
    let size = field.size;
    let mut rgba = vec![0u8; size * size * 4];
    rgba.par_chunks_mut(size * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..size {
                let v = field.get(x, y);
                let g = ((v * 0.5 + 0.5).clamp(0.0, 1.0) * 255.0) as u8;
                let out = &mut row[x * 4..x * 4 + 4];
                out.copy_from_slice(&[g, g, g, 255]);
            }
        });
    rgba
}
