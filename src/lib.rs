pub mod config;
pub mod curve;
pub mod displace;
pub mod field;
pub mod noise;
pub mod render;

use std::fmt;
use std::time::Instant;

use config::Params;
use curve::Curve;
use field::Field;

const SALT_FIELD: u64 = 0xF1E1_D05E_11FA_CE01;

/// Everything the pipeline can fail with. Numeric degeneracy (a sample
/// landing on the displacement center) is recovered inline and never
/// surfaces here.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A precondition on the parameter record failed. Raised before any
    /// array is produced.
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// A noise-field lookup fell outside [0, size-1]. Clamping at the
    /// mapping step prevents this; seeing it means the mapping is broken.
    IndexOutOfRange { x: i64, y: i64, size: usize },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: &'static str) -> Self {
        Error::InvalidParameter { name, reason }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
            Error::IndexOutOfRange { x, y, size } => {
                write!(f, "field index ({x}, {y}) outside [0, {})", size - 1)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Pipeline output: the ideal curve, its roughened variant, the noise
/// field that drove the displacement, and a rendered preview.
#[derive(Debug)]
pub struct Sketch {
    pub n: usize,
    pub ideal: Curve,
    pub rough: Curve,
    pub field: Field,
    pub rgba: Vec<u8>,
}

#[derive(Debug)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

fn stage(timings: &mut Vec<Timing>, name: &'static str, t: Instant) {
    let ms = t.elapsed().as_secs_f64() * 1000.0;
    log::debug!("{name}: {ms:.1} ms");
    timings.push(Timing { name, ms });
}

/// Run the whole pipeline: validate, sample the superellipse, generate the
/// noise field, displace, render a preview of `preview_w` x `preview_h`.
pub fn generate(
    seed: u64,
    params: &Params,
    preview_w: usize,
    preview_h: usize,
) -> Result<(Sketch, Vec<Timing>), Error> {
    params.validate()?;

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Ideal superellipse
    let t = Instant::now();
    let ideal = curve::sample_superellipse(params.a, params.b, params.p, params.samples)?;
    stage(&mut timings, "curve_sample", t);

    // 2. Noise field
    let t = Instant::now();
    let field = noise::generate_field(
        params.field_size,
        params.resolution,
        noise::seed_u32(seed, SALT_FIELD),
    );
    stage(&mut timings, "noise_field", t);

    // 3. Radial displacement
    let t = Instant::now();
    let rough = displace::displace(&ideal, &field, params.center, params.intensity, params.b)?;
    stage(&mut timings, "displace", t);

    // 4. Preview
    let t = Instant::now();
    let rgba = render::render_curves(&ideal, &rough, preview_w, preview_h);
    stage(&mut timings, "render", t);

    stage(&mut timings, "TOTAL", total_start);

    let n = ideal.len();
    Ok((
        Sketch {
            n,
            ideal,
            rough,
            field,
            rgba,
        },
        timings,
    ))
}
