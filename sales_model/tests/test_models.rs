use assert_approx_eq::assert_approx_eq;
use sales_model::config::{BinaryVar, ModelSpec};
use sales_model::{build_design_matrix, DataLoader, OlsRegression, SalesError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn year_period_spec() -> ModelSpec {
    ModelSpec::new(
        "Year",
        vec![BinaryVar::new(
            "Period",
            vec![
                ("eid_fitri".to_string(), 1.0),
                ("eid_adha".to_string(), 0.0),
            ],
        )
        .unwrap()],
        Vec::new(),
    )
}

fn fit(lines: &[&str]) -> Result<sales_model::FittedOls, SalesError> {
    let file = write_csv(lines);
    let table = DataLoader::from_csv(file.path())?;
    let clean = table.coerce_numeric(&["Sales", "Year"])?;
    let design = build_design_matrix(&clean, &year_period_spec(), "Sales")?;
    OlsRegression::new().fit(&design)
}

// Sales = 5 + 10*Year + 2*Period, exactly.
const EXACT_DATA: &[&str] = &[
    "Sales,Year,Period",
    "17,1,eid_fitri",
    "25,2,eid_adha",
    "37,3,eid_fitri",
    "45,4,eid_adha",
    "57,5,eid_fitri",
    "65,6,eid_adha",
    "77,7,eid_fitri",
    "85,8,eid_adha",
];

const NOISY_DATA: &[&str] = &[
    "Sales,Year,Period",
    "17.2,1,eid_fitri",
    "24.7,2,eid_adha",
    "37.1,3,eid_fitri",
    "44.9,4,eid_adha",
    "57.3,5,eid_fitri",
    "64.8,6,eid_adha",
    "76.9,7,eid_fitri",
    "85.2,8,eid_adha",
];

#[test]
fn test_recovers_exact_coefficients() {
    let model = fit(EXACT_DATA).unwrap();

    assert_approx_eq!(model.coefficient("const").unwrap(), 5.0, 1e-8);
    assert_approx_eq!(model.coefficient("Year").unwrap(), 10.0, 1e-8);
    assert_approx_eq!(model.coefficient("Period").unwrap(), 2.0, 1e-8);
    assert_approx_eq!(model.summary().r_squared, 1.0, 1e-12);
    assert_eq!(model.summary().n_obs, 8);
    assert_eq!(model.n_independent(), 2);
}

// The design matrix always has more rows than columns, so the solver
// must handle rectangular systems, not just square ones.
#[test]
fn test_fit_succeeds_with_more_rows_than_columns() {
    let mut lines = vec!["Sales,Year,Period".to_string()];
    for year in 1..=40 {
        let period = if year % 2 == 0 { "eid_adha" } else { "eid_fitri" };
        lines.push(format!("{},{},{}", 5 + 10 * year, year, period));
    }
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let model = fit(&refs).unwrap();

    assert_eq!(model.summary().n_obs, 40);
    assert!(model.coefficients().all(|(_, c)| c.is_finite()));
    assert_approx_eq!(model.coefficient("Year").unwrap(), 10.0, 1e-6);
}

#[test]
fn test_refitting_is_deterministic() {
    let first = fit(EXACT_DATA).unwrap();
    let second = fit(EXACT_DATA).unwrap();

    assert_eq!(first.columns(), second.columns());
    let a: Vec<f64> = first.coefficients().map(|(_, c)| c).collect();
    let b: Vec<f64> = second.coefficients().map(|(_, c)| c).collect();
    assert_eq!(a, b);
}

#[test]
fn test_fit_statistics_on_noisy_data() {
    let model = fit(NOISY_DATA).unwrap();
    let summary = model.summary();

    assert!(summary.r_squared > 0.99 && summary.r_squared < 1.0);
    assert!(summary.adj_r_squared <= summary.r_squared);
    assert!(summary.f_statistic.is_finite() && summary.f_statistic > 0.0);
    assert!(summary.f_pvalue >= 0.0 && summary.f_pvalue < 0.05);
    assert_eq!(summary.n_obs, 8);
}

#[test]
fn test_too_few_observations_is_fitting_error() {
    let result = fit(&[
        "Sales,Year,Period",
        "17,1,eid_fitri",
        "25,2,eid_adha",
        "37,3,eid_fitri",
    ]);

    assert!(matches!(result.unwrap_err(), SalesError::FittingError(_)));
}

#[test]
fn test_constant_response_is_fitting_error() {
    let result = fit(&[
        "Sales,Year,Period",
        "10,1,eid_fitri",
        "10,2,eid_adha",
        "10,3,eid_fitri",
        "10,4,eid_adha",
        "10,5,eid_fitri",
    ]);

    assert!(matches!(result.unwrap_err(), SalesError::FittingError(_)));
}

#[test]
fn test_predict_rejects_wrong_vector_length() {
    let model = fit(EXACT_DATA).unwrap();

    let result = model.predict(&[1.0]);
    assert!(matches!(result.unwrap_err(), SalesError::ValidationError(_)));
}
