use serde::{Deserialize, Serialize};

use crate::Error;

/// All tunable parameters of the pipeline. Anything not listed here is
/// fixed behavior, not configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Params {
    /// Semi-axis along x. Must satisfy 0 < a <= b.
    #[serde(default = "Params::default_a")]
    pub a: f32,
    /// Semi-axis along y. The larger of the two; normalizes the
    /// curve-to-field coordinate mapping.
    #[serde(default = "Params::default_b")]
    pub b: f32,
    /// Superellipse exponent. 2 is a true ellipse, larger values approach
    /// a rounded rectangle.
    #[serde(default = "Params::default_p")]
    pub p: f32,
    /// Number of parameter samples over one full turn.
    #[serde(default = "Params::default_samples")]
    pub samples: usize,
    /// Side length of the square noise field.
    #[serde(default = "Params::default_field_size")]
    pub field_size: usize,
    /// Noise lattice periods across the field, (x, y). Each component must
    /// divide `field_size` so the lattice tiles the grid.
    #[serde(default = "Params::default_resolution")]
    pub resolution: (usize, usize),
    /// Displacement strength applied to the looked-up noise value.
    #[serde(default = "Params::default_intensity")]
    pub intensity: f32,
    /// Radial-displacement center in field-index coordinates.
    #[serde(default)]
    pub center: (f32, f32),
}

impl Params {
    fn default_a() -> f32 {
        1.0
    }
    fn default_b() -> f32 {
        1.5
    }
    fn default_p() -> f32 {
        6.0
    }
    fn default_samples() -> usize {
        50_000
    }
    fn default_field_size() -> usize {
        512
    }
    fn default_resolution() -> (usize, usize) {
        (4, 4)
    }
    fn default_intensity() -> f32 {
        0.05
    }

    /// Check every precondition. Runs before any array is allocated; a
    /// violation aborts the whole pipeline.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.p.is_finite() || self.p <= 0.0 {
            return Err(Error::invalid("p", "exponent must be positive"));
        }
        if !self.a.is_finite() || self.a <= 0.0 {
            return Err(Error::invalid("a", "semi-axis must be positive"));
        }
        if !self.b.is_finite() || self.b < self.a {
            return Err(Error::invalid(
                "b",
                "second semi-axis must be the larger one (b >= a)",
            ));
        }
        if self.samples < 2 {
            return Err(Error::invalid("samples", "need at least 2 samples"));
        }
        if self.field_size < 2 {
            return Err(Error::invalid("field_size", "field side must be >= 2"));
        }
        let (rx, ry) = self.resolution;
        if rx == 0 || ry == 0 {
            return Err(Error::invalid("resolution", "periods must be >= 1"));
        }
        if self.field_size % rx != 0 || self.field_size % ry != 0 {
            return Err(Error::invalid(
                "resolution",
                "periods must divide field_size",
            ));
        }
        if !self.intensity.is_finite() {
            return Err(Error::invalid("intensity", "must be finite"));
        }
        if !self.center.0.is_finite() || !self.center.1.is_finite() {
            return Err(Error::invalid("center", "must be finite"));
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            a: Self::default_a(),
            b: Self::default_b(),
            p: Self::default_p(),
            samples: Self::default_samples(),
            field_size: Self::default_field_size(),
            resolution: Self::default_resolution(),
            intensity: Self::default_intensity(),
            center: (0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn mirrored_axes_rejected() {
        let params = Params {
            a: 2.0,
            b: 1.0,
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn resolution_must_tile_field() {
        let params = Params {
            field_size: 512,
            resolution: (5, 4),
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn params_roundtrip_through_json() {
        let params = Params {
            p: 2.0,
            intensity: 0.1,
            ..Params::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: Params = serde_json::from_str(&json).unwrap();
        assert_eq!(back.p, params.p);
        assert_eq!(back.intensity, params.intensity);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: Params = serde_json::from_str(r#"{"p": 2.0}"#).unwrap();
        assert_eq!(params.p, 2.0);
        assert_eq!(params.b, 1.5);
        assert_eq!(params.samples, 50_000);
    }
}
