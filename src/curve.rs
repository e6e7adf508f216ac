use std::f32::consts::TAU;

use rayon::prelude::*;

use crate::Error;

/// A closed planar curve as two index-aligned coordinate arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
}

impl Curve {
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// |v|^e carrying the sign of v, with sign(0) defined as 0. Keeps the
/// power operation away from negative bases and NaN at the axis crossings.
#[inline]
pub fn signed_pow(v: f32, e: f32) -> f32 {
    if v == 0.0 {
        0.0
    } else {
        v.abs().powf(e) * v.signum()
    }
}

/// Sample the superellipse |x/a|^p + |y/b|^p = 1 at `samples` parameter
/// values spanning one full turn, endpoints included.
///
/// Pure and deterministic: identical inputs give bit-identical output.
pub fn sample_superellipse(a: f32, b: f32, p: f32, samples: usize) -> Result<Curve, Error> {
    if !p.is_finite() || p <= 0.0 {
        return Err(Error::invalid("p", "exponent must be positive"));
    }
    if !a.is_finite() || a <= 0.0 {
        return Err(Error::invalid("a", "semi-axis must be positive"));
    }
    if !b.is_finite() || b < a {
        return Err(Error::invalid(
            "b",
            "second semi-axis must be the larger one (b >= a)",
        ));
    }
    if samples < 2 {
        return Err(Error::invalid("samples", "need at least 2 samples"));
    }

    let e = 2.0 / p;
    let dt = TAU / (samples - 1) as f32;
    let (x, y): (Vec<f32>, Vec<f32>) = (0..samples)
        .into_par_iter()
        .map(|i| {
            let t = i as f32 * dt;
            let (s, c) = t.sin_cos();
            (signed_pow(c, e) * a, signed_pow(s, e) * b)
        })
        .unzip();

    Ok(Curve { x, y })
}
