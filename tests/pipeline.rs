use roughen::config::Params;

fn small_params() -> Params {
    Params {
        samples: 500,
        field_size: 64,
        ..Params::default()
    }
}

#[test]
fn smoke_full_pipeline() {
    let params = small_params();
    let (sketch, timings) = roughen::generate(1, &params, 240, 160).unwrap();

    assert_eq!(sketch.n, 500);
    assert_eq!(sketch.ideal.len(), 500);
    assert_eq!(sketch.rough.len(), 500);
    assert_eq!(sketch.field.size, 64);
    assert_eq!(sketch.rgba.len(), 240 * 160 * 4);

    assert!(
        sketch
            .ideal
            .x
            .iter()
            .chain(sketch.ideal.y.iter())
            .chain(sketch.rough.x.iter())
            .chain(sketch.rough.y.iter())
            .all(|v| v.is_finite())
    );

    let names: Vec<_> = timings.iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        ["curve_sample", "noise_field", "displace", "render", "TOTAL"]
    );
}

#[test]
fn same_seed_same_sketch() {
    let params = small_params();
    let (one, _) = roughen::generate(7, &params, 100, 100).unwrap();
    let (two, _) = roughen::generate(7, &params, 100, 100).unwrap();
    assert_eq!(one.rough, two.rough);
    assert_eq!(one.field.data, two.field.data);
    assert_eq!(one.rgba, two.rgba);
}

#[test]
fn different_seeds_give_different_roughening() {
    let params = small_params();
    let (one, _) = roughen::generate(1, &params, 100, 100).unwrap();
    let (two, _) = roughen::generate(2, &params, 100, 100).unwrap();
    assert_eq!(one.ideal, two.ideal);
    assert_ne!(one.rough, two.rough);
}

#[test]
fn roughening_actually_moves_the_boundary() {
    let params = small_params();
    let (sketch, _) = roughen::generate(3, &params, 100, 100).unwrap();
    let moved = (0..sketch.n)
        .filter(|&i| {
            sketch.rough.x[i] != sketch.ideal.x[i] || sketch.rough.y[i] != sketch.ideal.y[i]
        })
        .count();
    // Most samples land on cells with nonzero noise.
    assert!(moved > sketch.n / 2, "only {moved} samples moved");
}
