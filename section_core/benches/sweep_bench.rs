//! Benchmarks for single samples and full capacity sweeps.
//!
//! Run with: `cargo bench -p section_core`

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use section_core::calculations::capacity_surface::{self, AngleRange, InterceptRange, SweepConfig};
use section_core::calculations::{sample, AnalysisInput, NeutralAxis};
use section_core::materials::MaterialParameters;
use section_core::section::{Rebar, Section};

fn square_column() -> AnalysisInput {
    let bars = [
        (-5.6, 5.6),
        (0.0, 5.6),
        (5.6, 5.6),
        (5.6, 0.0),
        (5.6, -5.6),
        (0.0, -5.6),
        (-5.6, -5.6),
        (-5.6, 0.0),
    ]
    .iter()
    .map(|&(x, y)| Rebar::new(x, y, 0.79))
    .collect();
    let section = Section::rectangular(16.0, 16.0, bars).expect("valid section");
    AnalysisInput::new("C-1", section, MaterialParameters::aci(4.0, 60.0))
}

fn benchmark_sample(c: &mut Criterion) {
    let input = square_column();
    let mut group = c.benchmark_group("Sample");

    for (name, axis) in [
        ("mixed", NeutralAxis::new(37.0, 1.5)),
        ("pure_compression", NeutralAxis::new(0.0, -40.0)),
        ("pure_tension", NeutralAxis::new(0.0, 40.0)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(sample::calculate(&input, black_box(axis))))
        });
    }
    group.finish();
}

fn benchmark_sweep(c: &mut Criterion) {
    let input = square_column();
    let mut group = c.benchmark_group("Sweep");
    group.measurement_time(Duration::from_secs(10));

    for parallel in [false, true] {
        let config = SweepConfig {
            angles: AngleRange { start_deg: 0.0, end_deg: 360.0, step_deg: 5.0 },
            intercepts: InterceptRange::Spanning { divisions: 40, margin: 0.05 },
            parallel,
        };
        group.bench_with_input(
            BenchmarkId::new("72x41/parallel", parallel),
            &config,
            |b, config| {
                b.iter(|| black_box(capacity_surface::calculate(&input, config)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_sample, benchmark_sweep);
criterion_main!(benches);
