//! # NavCtrl Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drive_lib::{
    loc::Pose,
    nav_ctrl::{advance, DriveMode, InputSnapshot, NavState, Params},
    path::interpolate_path,
    track::{Track, TrackParams},
};
use nalgebra::Vector3;

fn nav_ctrl_benchmark(c: &mut Criterion) {
    let path = Track::from_params(TrackParams::default())
        .unwrap()
        .waypoints();
    let params = Params::default();
    let input = InputSnapshot::default();

    // A lap of the default track takes a little over 1100 ticks
    c.bench_function("nav_ctrl_lap", |b| {
        b.iter(|| {
            let mut pose = Pose::default();
            let mut state = NavState::default();
            state.set_mode(DriveMode::Autonomous);

            for _ in 0..1200 {
                let (p, s) = advance(pose, &state, &input, black_box(&path), &params);
                pose = p;
                state = s;
            }

            (pose, state)
        })
    });

    let base: Vec<Vector3<f64>> = TrackParams::default()
        .base_points_m
        .iter()
        .map(|p| Vector3::new(p[0], p[1], p[2]))
        .collect();

    c.bench_function("interpolate_path_k10", |b| {
        b.iter(|| interpolate_path(black_box(&base), 10))
    });
}

criterion_group!(benches, nav_ctrl_benchmark);
criterion_main!(benches);
