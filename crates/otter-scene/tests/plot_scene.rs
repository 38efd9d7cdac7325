use std::path::PathBuf;

use approx::assert_relative_eq;
use otter_core::Strategy;
use otter_scene::{Scene, SceneError, Viewport, ViewportFrame};

/// Creates a fresh directory holding the given files.
fn fixture_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("otter-scene-tests")
        .join(format!("{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    for (file, contents) in files {
        std::fs::write(dir.join(file), contents).unwrap();
    }
    dir
}

const ENERGY_CSV: &str = "\
time,energy,flux
0,0,1
10,100,1
20,150,2
";

const LATE_CSV: &str = "\
time,mass
5,1
25,3
";

const PLOT_SCENE: &str = r#"
[[viewports]]
type = "Plot"
name = "history"

[[viewports.lines]]
file = "energy.csv"
column = "energy"
label = "Energy"

[[viewports.lines]]
file = "energy.csv"
column = "flux"
strategy = "previous"

[[viewports.lines]]
file = "late.csv"
column = "mass"
"#;

fn load(name: &str) -> Scene {
    let dir = fixture_dir(
        name,
        &[
            ("energy.csv", ENERGY_CSV),
            ("late.csv", LATE_CSV),
            ("scene.toml", PLOT_SCENE),
        ],
    );
    Scene::from_path(dir.join("scene.toml")).unwrap()
}

#[test]
fn axis_is_union_of_line_times() {
    let scene = load("union");

    assert_eq!(
        scene.context().global_time_axis().times(),
        &[0.0, 5.0, 10.0, 20.0, 25.0]
    );

    let Viewport::Plot(plot) = &scene.viewports()[0] else {
        panic!("expected a plot viewport");
    };
    assert_eq!(plot.lines[0].label, "Energy");
    assert_eq!(plot.lines[1].label, "flux");
    assert_eq!(plot.lines[1].resampler.strategy(), Strategy::Previous);
}

#[test]
fn movie_resamples_every_line_in_lockstep() {
    let scene = load("lockstep");

    let plans = scene.plan_movie(None).unwrap();
    assert_eq!(plans.len(), 5);

    // t = 5: energy halfway up its first ramp, flux held, mass at its first sample.
    let ViewportFrame::Plot(frame) = &plans[1].viewports[0] else {
        panic!("expected a plot frame");
    };
    assert_eq!(plans[1].time, 5.0);
    assert_relative_eq!(frame.lines[0].current[1], 50.0);
    assert_relative_eq!(frame.lines[1].current[1], 1.0);
    assert_relative_eq!(frame.lines[2].current[1], 1.0);
    assert_eq!(frame.lines[0].trace, vec![[0.0, 0.0], [5.0, 50.0]]);

    // t = 25: energy and flux hold their final values.
    let ViewportFrame::Plot(frame) = &plans[4].viewports[0] else {
        panic!("expected a plot frame");
    };
    assert_relative_eq!(frame.lines[0].current[1], 150.0);
    assert_relative_eq!(frame.lines[1].current[1], 2.0);
    assert_relative_eq!(frame.lines[2].current[1], 3.0);
}

#[test]
fn image_at_requested_time() {
    let scene = load("image");

    let plan = scene.plan_image(Some(15.0)).unwrap();

    assert_eq!(plan.time_index, 2);
    let ViewportFrame::Plot(frame) = &plan.viewports[0] else {
        panic!("expected a plot frame");
    };
    assert_relative_eq!(frame.lines[0].current[1], 125.0);
    assert_relative_eq!(frame.lines[2].current[1], 2.0);
}

#[test]
fn missing_column_names_the_file() {
    let dir = fixture_dir(
        "missing-column",
        &[
            ("energy.csv", ENERGY_CSV),
            (
                "scene.toml",
                "[[viewports]]\ntype = \"Plot\"\n[[viewports.lines]]\nfile = \"energy.csv\"\ncolumn = \"power\"\n",
            ),
        ],
    );

    let err = Scene::from_path(dir.join("scene.toml")).unwrap_err();

    match err {
        SceneError::Data { path, source } => {
            assert_eq!(path, dir.join("energy.csv"));
            assert!(matches!(source, otter_data::Error::UnknownColumn(c) if c == "power"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_scene_file() {
    let err = Scene::from_path("/definitely/not/here/scene.toml").unwrap_err();
    assert!(matches!(err, SceneError::Read { .. }));
}
