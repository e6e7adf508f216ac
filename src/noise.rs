use rayon::prelude::*;

use crate::field::Field;

#[inline]
fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn splitmix32(mut x: u32) -> u32 {
    x = x.wrapping_add(0x9E3779B9);
    let mut z = x;
    z = (z ^ (z >> 16)).wrapping_mul(0x7FEB352D);
    z = (z ^ (z >> 15)).wrapping_mul(0x846CA68B);
    z ^ (z >> 16)
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a 32-bit lattice seed from the pipeline seed and a salt.
#[inline]
pub fn seed_u32(seed: u64, salt: u64) -> u32 {
    splitmix64(seed ^ salt) as u32
}

/// Hash a lattice corner. Coordinates are pre-wrapped, so opposite field
/// edges hash to the same gradient and the field tiles.
#[inline]
fn lattice_hash(ix: u32, iy: u32, seed: u32) -> u32 {
    let mut h = seed ^ 0x9E3779B9;
    h = splitmix32(h ^ ix.wrapping_mul(0x85EBCA6B));
    h = splitmix32(h ^ iy.wrapping_mul(0xC2B2AE35));
    h
}

// 16 evenly-spaced unit gradients (every 22.5 degrees). Eliminates the
// directional bias of 4-gradient Perlin.
const GRADS: [(f32, f32); 16] = [
    (1.0, 0.0),
    (0.924, 0.383),
    (0.707, 0.707),
    (0.383, 0.924),
    (0.0, 1.0),
    (-0.383, 0.924),
    (-0.707, 0.707),
    (-0.924, 0.383),
    (-1.0, 0.0),
    (-0.924, -0.383),
    (-0.707, -0.707),
    (-0.383, -0.924),
    (0.0, -1.0),
    (0.383, -0.924),
    (0.707, -0.707),
    (0.924, -0.383),
];

#[inline]
fn grad(hash: u32, dx: f32, dy: f32) -> f32 {
    let (gx, gy) = GRADS[(hash & 15) as usize];
    gx * dx + gy * dy
}

/// Periodic 2D gradient noise. `u` and `v` live in lattice coordinates
/// [0, px) x [0, py); the lattice wraps modulo the period counts.
#[inline]
pub fn periodic_gradient_noise(u: f32, v: f32, px: u32, py: u32, seed: u32) -> f32 {
    debug_assert!(u >= 0.0 && v >= 0.0);
    let iu = u as u32;
    let iv = v as u32;
    let fu = u - iu as f32;
    let fv = v - iv as f32;
    let su = smootherstep(fu);
    let sv = smootherstep(fv);

    let x0 = iu % px;
    let x1 = (iu + 1) % px;
    let y0 = iv % py;
    let y1 = (iv + 1) % py;

    let v00 = grad(lattice_hash(x0, y0, seed), fu, fv);
    let v10 = grad(lattice_hash(x1, y0, seed), fu - 1.0, fv);
    let v01 = grad(lattice_hash(x0, y1, seed), fu, fv - 1.0);
    let v11 = grad(lattice_hash(x1, y1, seed), fu - 1.0, fv - 1.0);

    let a = lerp(v00, v10, su);
    let b = lerp(v01, v11, su);
    // Scale to approximately [-1, 1] range (raw range is ~[-0.7, 0.7])
    lerp(a, b, sv) * 1.414
}

/// Fill an R x R field with periodic gradient noise, `resolution` lattice
/// periods across each axis. Deterministic in (size, resolution, seed).
pub fn generate_field(size: usize, resolution: (usize, usize), seed: u32) -> Field {
    let (rx, ry) = resolution;
    let u_scale = rx as f32 / size as f32;
    let v_scale = ry as f32 / size as f32;

    let mut field = Field::new(size);
    field
        .data
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(y, row)| {
            let v = y as f32 * v_scale;
            for (x, cell) in row.iter_mut().enumerate() {
                *cell =
                    periodic_gradient_noise(x as f32 * u_scale, v, rx as u32, ry as u32, seed);
            }
        });
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_deterministic() {
        let a = periodic_gradient_noise(1.37, 2.81, 4, 4, 99);
        let b = periodic_gradient_noise(1.37, 2.81, 4, 4, 99);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn seeds_decorrelate() {
        let a = generate_field(32, (4, 4), 1);
        let b = generate_field(32, (4, 4), 2);
        assert_ne!(a.data, b.data);
    }

    #[test]
    fn lattice_wraps_one_period() {
        for i in 0..50 {
            let u = i as f32 * 0.073;
            let v = i as f32 * 0.131;
            let base = periodic_gradient_noise(u, v, 4, 4, 7);
            let shifted = periodic_gradient_noise(u + 4.0, v + 4.0, 4, 4, 7);
            assert!(
                (base - shifted).abs() < 1e-4,
                "not periodic at ({u}, {v}): {base} vs {shifted}"
            );
        }
    }

    #[test]
    fn values_stay_in_advertised_range() {
        let field = generate_field(64, (4, 4), 42);
        for &v in &field.data {
            assert!(v.is_finite());
            assert!(v.abs() <= 1.5, "out of range: {v}");
        }
    }

    #[test]
    fn field_generation_is_idempotent() {
        let a = generate_field(48, (2, 4), 1234);
        let b = generate_field(48, (2, 4), 1234);
        assert_eq!(a.data, b.data);
    }
}
