//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const DEPARTMENTS: [&str; 3] = ["Sales", "Research & Development", "Human Resources"];
const TRAVEL: [&str; 3] = ["Travel_Rarely", "Travel_Frequently", "Non-Travel"];
const ROLES: [&str; 4] = [
    "Sales Executive",
    "Research Scientist",
    "Laboratory Technician",
    "Human Resources",
];

/// Create a small employee DataFrame with every column the report reads.
///
/// Sales has 1 of 3 leavers, Human Resources 1 of 2, Research & Development
/// 0 of 1, so the overall rate is 2 of 6.
pub fn create_employee_dataframe() -> DataFrame {
    df! {
        "Age" => [41i64, 49, 37, 33, 27, 32],
        "Attrition" => ["Yes", "No", "Yes", "No", "No", "No"],
        "BusinessTravel" => ["Travel_Rarely", "Travel_Frequently", "Travel_Rarely",
                             "Non-Travel", "Travel_Rarely", "Travel_Frequently"],
        "Department" => ["Sales", "Sales", "Human Resources",
                         "Human Resources", "Research & Development", "Sales"],
        "EnvironmentSatisfaction" => [2i64, 3, 4, 4, 1, 4],
        "JobRole" => ["Sales Executive", "Sales Executive", "Human Resources",
                      "Human Resources", "Research Scientist", "Sales Executive"],
        "JobSatisfaction" => [4i64, 2, 3, 3, 2, 4],
        "MonthlyIncome" => [5993i64, 5130, 2090, 2909, 3468, 3068],
        "WorkLifeBalance" => [1i64, 3, 3, 3, 3, 2],
        "YearsAtCompany" => [6i64, 10, 0, 8, 2, 7],
    }
    .unwrap()
}

/// Create a larger random employee DataFrame.
///
/// Roughly a fifth of employees leave; leavers skew younger and shorter
/// tenured.
pub fn create_random_employee_dataframe(rows: usize, seed: u64) -> DataFrame {
    use rand::prelude::*;
    use rand::SeedableRng;

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let left: Vec<bool> = (0..rows).map(|_| rng.gen::<f64>() < 0.2).collect();

    let attrition: Vec<&str> = left.iter().map(|&l| if l { "Yes" } else { "No" }).collect();
    let age: Vec<i64> = left
        .iter()
        .map(|&l| if l { rng.gen_range(18..40) } else { rng.gen_range(25..60) })
        .collect();
    let years: Vec<i64> = left
        .iter()
        .map(|&l| if l { rng.gen_range(0..5) } else { rng.gen_range(0..30) })
        .collect();
    let department: Vec<&str> = (0..rows)
        .map(|_| DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())])
        .collect();
    let travel: Vec<&str> = (0..rows)
        .map(|_| TRAVEL[rng.gen_range(0..TRAVEL.len())])
        .collect();
    let role: Vec<&str> = (0..rows).map(|_| ROLES[rng.gen_range(0..ROLES.len())]).collect();
    let income: Vec<i64> = (0..rows)
        .map(|_| {
            let v = rng.gen::<f64>();
            1000 + (v * v * 19000.0) as i64
        })
        .collect();
    let wlb: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..5)).collect();
    let job_sat: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..5)).collect();
    let env_sat: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..5)).collect();

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
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("employee_attrition.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a CSV written from raw text
pub fn create_temp_csv_text(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("employee_attrition.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that two rates agree to within floating point noise
pub fn assert_rate_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "Rate mismatch: expected {:.6}, got {:.6}",
        expected,
        actual
    );
}
