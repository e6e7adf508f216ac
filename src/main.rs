use std::path::PathBuf;

use anyhow::Context;
use roughen::config::Params;
use roughen::render;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let width: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(900);
    let height: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(600);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    let params = match args.get(5) {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read params file {path}"))?;
            serde_json::from_str::<Params>(&text)
                .with_context(|| format!("failed to parse params file {path}"))?
        }
        None => Params::default(),
    };

    std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;

    log::info!(
        "Roughening superellipse a={} b={} p={} with {} samples, seed={}",
        params.a,
        params.b,
        params.p,
        params.samples,
        seed
    );

    let (sketch, timings) = roughen::generate(seed, &params, width, height)?;

    log::info!("Timings:");
    for t in &timings {
        log::info!("  {:16} {:8.1} ms", t.name, t.ms);
    }

    let save = |name: &str, rgba: &[u8], w: usize, h: usize| -> anyhow::Result<()> {
        let path = out_dir.join(name);
        image::save_buffer(
            &path,
            rgba,
            w as u32,
            h as u32,
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("failed to save {}", path.display()))?;
        log::info!("Saved {}", path.display());
        Ok(())
    };

    // 1. Both curves, roughened over ideal
    save("curves.png", &sketch.rgba, width, height)?;

    // 2. The driving noise field
    let field_rgba = render::render_field(&sketch.field);
    save("field.png", &field_rgba, sketch.field.size, sketch.field.size)?;

    log::info!("Done ({} samples).", sketch.n);
    Ok(())
}
