//! Benchmark of attrition encoding, grouped rates and distribution summaries
//!
//! Run with: cargo bench --bench grouping_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use churnscope::pipeline::{
    box_summaries, encode_attrition, grouped_attrition_rate, kde_curve, numeric_values,
    AttritionTable, Histogram, UnknownValuePolicy, KDE_POINTS,
};
use churnscope::report::compute_all;

const DEPARTMENTS: [&str; 3] = ["Sales", "Research & Development", "Human Resources"];

/// Generate synthetic employee records
fn generate_employee_dataframe(n_rows: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let attrition: Vec<&str> = (0..n_rows)
        .map(|_| if rng.gen::<f64>() < 0.16 { "Yes" } else { "No" })
        .collect();
    let department: Vec<&str> = (0..n_rows)
        .map(|_| DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())])
        .collect();
    let travel: Vec<&str> = (0..n_rows)
        .map(|_| ["Travel_Rarely", "Travel_Frequently", "Non-Travel"][rng.gen_range(0..3)])
        .collect();
    let role: Vec<String> = (0..n_rows)
        .map(|_| format!("Role {}", rng.gen_range(0..9)))
        .collect();
    let income: Vec<i64> = (0..n_rows)
        .map(|_| {
            let v = rng.gen::<f64>();
            1000 + (v * v * 19000.0) as i64 // Right-skewed
        })
        .collect();
    let score = |rng: &mut rand::rngs::StdRng| -> Vec<i64> {
        (0..n_rows).map(|_| rng.gen_range(1..5)).collect()
    };
    let wlb = score(&mut rng);
    let job_sat = score(&mut rng);
    let env_sat = score(&mut rng);
    let years: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(0..40)).collect();
    let age: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(18..61)).collect();

    df! {
        "Age" => age,
        "Attrition" => attrition,
        "BusinessTravel" => travel,
        "Department" => department,
        "EnvironmentSatisfaction" => env_sat,
        "JobRole" => role,
        "JobSatisfaction" => job_sat,
        "MonthlyIncome" => income,
        "WorkLifeBalance" => wlb,
        "YearsAtCompany" => years,
    }
    .expect("Failed to create DataFrame")
}

fn encoded(n_rows: usize) -> AttritionTable {
    encode_attrition(generate_employee_dataframe(n_rows, 42), UnknownValuePolicy::Missing)
        .expect("Failed to encode attrition")
}

/// Benchmark encoding the Attrition column for varying dataset sizes
fn benchmark_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_attrition");

    for n_rows in [1_470, 10_000, 100_000] {
        let df = generate_employee_dataframe(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = encode_attrition(black_box(df.clone()), UnknownValuePolicy::Missing);
            });
        });
    }

    group.finish();
}

/// Benchmark grouped rates over keys with few and many distinct values
fn benchmark_grouped_rates(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouped_attrition_rate");

    for n_rows in [1_470, 10_000, 100_000] {
        let table = encoded(n_rows);
        group.throughput(Throughput::Elements(n_rows as u64));

        for key in ["Department", "JobRole"] {
            group.bench_with_input(BenchmarkId::new(key, n_rows), &table, |b, table| {
                b.iter(|| {
                    let _ = grouped_attrition_rate(black_box(table), black_box(key));
                });
            });
        }
    }

    group.finish();
}

/// Benchmark histogram, density curve and box summaries
fn benchmark_distributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("distributions");

    let table = encoded(10_000);
    let values = numeric_values(&table, "MonthlyIncome").expect("MonthlyIncome column");

    group.bench_function("histogram_30", |b| {
        b.iter(|| Histogram::new(black_box(&values), black_box(30)));
    });

    let hist = Histogram::new(&values, 30);
    let (lo, hi) = hist.range();
    group.bench_function("kde_200", |b| {
        b.iter(|| kde_curve(black_box(&values), lo, hi, hist.bin_width(), KDE_POINTS));
    });

    group.bench_function("box_summaries", |b| {
        b.iter(|| {
            let _ = box_summaries(black_box(&table), "WorkLifeBalance", "Attrition");
        });
    });

    group.finish();
}

/// Benchmark computing every report section
fn benchmark_full_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_report");
    group.sample_size(20);

    for n_rows in [1_470, 10_000] {
        let table = encoded(n_rows);
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &table, |b, table| {
            b.iter(|| {
                let _ = compute_all(black_box(table));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_encoding,
    benchmark_grouped_rates,
    benchmark_distributions,
    benchmark_full_report
);
criterion_main!(benches);
