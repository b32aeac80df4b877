use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use charge_field::fields::{
    electric_field_on_grid, fixed_charges, trace_streamlines, EvaluationGrid, FieldConfig, GridSpec, PointCharge,
    StreamlineOptions,
};

fn reference_charges() -> Vec<PointCharge> {
    let mut charges = fixed_charges();
    charges.push(PointCharge::new(2.0, 0.5, 0.5));
    charges
}

fn bench_grid_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_evaluation");
    group.sample_size(20);
    let charges = reference_charges();
    let config = FieldConfig::default();

    for step in [0.04, 0.02, 0.01] {
        let grid = EvaluationGrid::from_spec(&GridSpec::new(step, (-4.0, 4.0), (-4.0, 4.0))).unwrap();
        group.bench_with_input(BenchmarkId::new("three_charges", grid.len()), &grid, |b, grid| {
            b.iter(|| electric_field_on_grid(black_box(&charges), grid, &config));
        });
    }
    group.finish();
}

fn bench_streamlines(c: &mut Criterion) {
    let charges = reference_charges();
    let grid = EvaluationGrid::from_spec(&GridSpec::reference()).unwrap();
    let field = electric_field_on_grid(&charges, &grid, &FieldConfig::default());
    let options = StreamlineOptions::default();
    c.bench_function("trace_streamlines_reference", |b| {
        b.iter(|| trace_streamlines(black_box(&field), &grid, &charges, &options));
    });
}

criterion_group!(benches, bench_grid_evaluation, bench_streamlines);
criterion_main!(benches);
