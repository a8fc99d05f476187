//! Golden tests: every icon under `tests/fixtures` is parsed from disk and
//! its outline compared with the `.expected` file next to it.
//!
//! Run with `RUST_LOG=icon_ir=debug cargo test --test fixtures --features tracing`
//! to see the walker's decisions.

use std::fmt::Write as _;

use datatest_stable::Utf8Path;
use icon_ir::{
    Fill, ImageVector, ParseOptions, Stroke, VectorNode, VectorPath, path_data::to_path_string,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn describe(image: &ImageVector) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "size {}x{} viewport {}x{} mirrored={}",
        image.default_width,
        image.default_height,
        image.viewport_width,
        image.viewport_height,
        image.auto_mirror
    );
    for node in &image.nodes {
        match node {
            VectorNode::Path(path) => describe_path(&mut out, path, ""),
            VectorNode::Group(group) => {
                let t = &group.transform;
                let _ = writeln!(
                    out,
                    "group {:?} rotation={} pivot={},{} scale={},{} translation={},{} clip={}",
                    group.name,
                    t.rotation,
                    t.pivot.x,
                    t.pivot.y,
                    t.scale.x,
                    t.scale.y,
                    t.translation.x,
                    t.translation.y,
                    to_path_string(&group.clip_path_data)
                );
                for path in &group.paths {
                    describe_path(&mut out, path, "  ");
                }
            }
        }
    }
    out
}

fn describe_path(out: &mut String, path: &VectorPath, indent: &str) {
    let fill = match &path.fill {
        None => "none".to_string(),
        Some(Fill::Solid(color)) => color.to_string(),
        Some(Fill::LinearGradient(g)) => format!(
            "linear({},{} {},{})[{}]",
            g.start.x,
            g.start.y,
            g.end.x,
            g.end.y,
            stops(&g.color_stops)
        ),
        Some(Fill::RadialGradient(g)) => format!(
            "radial({},{} {})[{}]",
            g.center.x,
            g.center.y,
            g.radius,
            stops(&g.color_stops)
        ),
    };
    let stroke = match &path.stroke {
        None => "none".to_string(),
        Some(Stroke::Color(color)) => color.to_string(),
    };
    let _ = writeln!(
        out,
        "{indent}path {:?} fill={fill} stroke={stroke} {}",
        path.name,
        to_path_string(&path.nodes)
    );
}

fn stops(stops: &[icon_ir::ColorStop]) -> String {
    stops
        .iter()
        .map(|stop| format!("{} {}", stop.offset, stop.color))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    init_tracing();
    tracing::debug!(%path, "parsing fixture");

    let output = icon_ir::parse_file(path, &ParseOptions::default())?;
    assert_eq!(Some(output.icon_name.as_str()), path.file_stem());
    assert!(output.warnings.is_empty(), "{path}: {:?}", output.warnings);

    let expected = std::fs::read_to_string(path.with_extension("expected"))?;
    let actual = describe(&output.image_vector);
    assert_eq!(
        actual.trim_end(),
        expected.trim_end(),
        "outline mismatch for {path}"
    );
    Ok(())
}

datatest_stable::harness! {
    { test = parse_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.(svg|xml)$" },
}
