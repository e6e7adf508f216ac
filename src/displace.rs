use rayon::prelude::*;

use crate::Error;
use crate::curve::Curve;
use crate::field::{Field, clamp_index};

/// Radially displace `ideal` by the noise field.
///
/// Each sample is mapped to a field cell by truncating
/// `coord * (R-1) / b` toward zero and clamping into [0, R-1], then pushed
/// along the unit direction from `center` (in field-index space) by the
/// cell value times `intensity`. A sample that lands exactly on the center
/// has no defined direction and is left untouched.
///
/// Per-component displacement is bounded by `intensity * field.max_abs()`.
pub fn displace(
    ideal: &Curve,
    field: &Field,
    center: (f32, f32),
    intensity: f32,
    b: f32,
) -> Result<Curve, Error> {
    if !b.is_finite() || b <= 0.0 {
        return Err(Error::invalid("b", "normalization axis must be positive"));
    }
    let side = field.size;
    if side < 2 {
        return Err(Error::invalid("field_size", "field side must be >= 2"));
    }
    let scale = (side - 1) as f32 / b;
    let (cx, cy) = center;

    let offsets: Vec<(f32, f32)> = ideal
        .x
        .par_iter()
        .zip(ideal.y.par_iter())
        .map(|(&x, &y)| -> Result<(f32, f32), Error> {
            let xi = clamp_index((x * scale) as i64, side);
            let yi = clamp_index((y * scale) as i64, side);
            let dx = xi as f32 - cx;
            let dy = yi as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist == 0.0 {
                // Degenerate sample: no radial direction, no displacement.
                return Ok((0.0, 0.0));
            }
            let amount = field.at(xi, yi)? * intensity;
            Ok((dx / dist * amount, dy / dist * amount))
        })
        .collect::<Result<_, _>>()?;

    let mut rough = ideal.clone();
    rough
        .x
        .par_iter_mut()
        .zip(rough.y.par_iter_mut())
        .zip(offsets.par_iter())
        .for_each(|((x, y), &(ox, oy))| {
            *x += ox;
            *y += oy;
        });

    Ok(rough)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::sample_superellipse;
    use crate::noise;

    #[test]
    fn zero_intensity_changes_nothing() {
        let ideal = sample_superellipse(1.0, 1.5, 6.0, 64).unwrap();
        let field = noise::generate_field(32, (4, 4), 7);
        let rough = displace(&ideal, &field, (0.0, 0.0), 0.0, 1.5).unwrap();
        assert_eq!(rough, ideal);
    }

    #[test]
    fn uniform_field_pushes_radially_outward() {
        let mut field = Field::new(16);
        field.data.fill(1.0);
        let ideal = sample_superellipse(1.0, 1.0, 2.0, 32).unwrap();
        let rough = displace(&ideal, &field, (0.0, 0.0), 0.1, 1.0).unwrap();
        // Sample 0 sits at (1, 0): index (15, 0), direction (1, 0).
        assert!((rough.x[0] - (ideal.x[0] + 0.1)).abs() < 1e-6);
        assert!((rough.y[0] - ideal.y[0]).abs() < 1e-6);
    }

    #[test]
    fn rejects_degenerate_axis() {
        let ideal = sample_superellipse(1.0, 1.5, 6.0, 8).unwrap();
        let field = Field::new(16);
        assert!(displace(&ideal, &field, (0.0, 0.0), 0.05, 0.0).is_err());
    }
}
