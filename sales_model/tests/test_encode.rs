use pretty_assertions::assert_eq;
use sales_model::config::{BinaryVar, CategoricalVar, ModelSpec};
use sales_model::{build_design_matrix, DataLoader, SalesError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn test_spec() -> ModelSpec {
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
        vec![CategoricalVar::new(
            "Product",
            vec![
                "nastar".to_string(),
                "other".to_string(),
                "rambutan".to_string(),
            ],
            "other",
        )
        .unwrap()],
    )
}

fn encode(lines: &[&str]) -> Result<sales_model::DesignMatrix, SalesError> {
    let file = write_csv(lines);
    let table = DataLoader::from_csv(file.path())?;
    let clean = table.coerce_numeric(&["Sales", "Year"])?;
    build_design_matrix(&clean, &test_spec(), "Sales")
}

#[test]
fn test_column_order_with_reference_dropped() {
    let design = encode(&[
        "Sales,Year,Period,Product",
        "10,1,eid_fitri,nastar",
        "20,2,eid_adha,rambutan",
        "30,3,eid_fitri,other",
        "40,4,eid_adha,nastar",
    ])
    .unwrap();

    // Reference level "other" has no dummy column; the intercept comes first.
    assert_eq!(
        design.columns(),
        &[
            "const",
            "Year",
            "Period",
            "Product_nastar",
            "Product_rambutan"
        ]
    );
    assert_eq!(design.nrows(), 4);
    assert_eq!(design.x().ncols(), 5);
    assert_eq!(design.y().len(), 4);
    assert_eq!(design.response(), "Sales");
}

#[test]
fn test_dummy_cells_match_selections() {
    let design = encode(&[
        "Sales,Year,Period,Product",
        "10,1,eid_fitri,nastar",
        "20,2,eid_adha,rambutan",
        "30,3,eid_fitri,other",
        "40,4,eid_adha,nastar",
    ])
    .unwrap();

    let x = design.x();
    // Row 0: nastar selected
    assert_eq!(x[(0, 0)], 1.0);
    assert_eq!(x[(0, 1)], 1.0);
    assert_eq!(x[(0, 2)], 1.0);
    assert_eq!(x[(0, 3)], 1.0);
    assert_eq!(x[(0, 4)], 0.0);
    // Row 2: reference level leaves the dummy block all zero
    assert_eq!(x[(2, 3)], 0.0);
    assert_eq!(x[(2, 4)], 0.0);
}

#[test]
fn test_unmapped_binary_level_drops_row() {
    let design = encode(&[
        "Sales,Year,Period,Product",
        "10,1,eid_fitri,nastar",
        "20,2,ramadan,rambutan",
        "30,3,eid_adha,other",
        "40,4,eid_fitri,rambutan",
    ])
    .unwrap();

    assert_eq!(design.nrows(), 3);
    assert_eq!(design.y().iter().copied().collect::<Vec<f64>>(), vec![10.0, 30.0, 40.0]);
}

#[test]
fn test_undeclared_categorical_level_drops_row() {
    let design = encode(&[
        "Sales,Year,Period,Product",
        "10,1,eid_fitri,nastar",
        "20,2,eid_adha,croissant",
        "30,3,eid_fitri,other",
        "40,4,eid_adha,rambutan",
    ])
    .unwrap();

    assert_eq!(design.nrows(), 3);
}

#[test]
fn test_constant_column_is_removed() {
    // Every row is eid_fitri, so Period carries no information.
    let design = encode(&[
        "Sales,Year,Period,Product",
        "10,1,eid_fitri,nastar",
        "20,2,eid_fitri,rambutan",
        "30,3,eid_fitri,other",
        "40,4,eid_fitri,nastar",
    ])
    .unwrap();

    assert!(!design.columns().contains(&"Period".to_string()));
    assert!(design.columns().contains(&"Year".to_string()));
}

#[test]
fn test_all_constant_covariates_is_config_error() {
    let result = encode(&[
        "Sales,Year,Period,Product",
        "10,2021,eid_fitri,nastar",
        "20,2021,eid_fitri,nastar",
        "30,2021,eid_fitri,nastar",
    ]);

    assert!(matches!(result.unwrap_err(), SalesError::ConfigError(_)));
}

#[test]
fn test_no_rows_left_is_data_error() {
    let result = encode(&[
        "Sales,Year,Period,Product",
        "10,1,ramadan,nastar",
        "20,2,ramadan,rambutan",
    ]);

    assert!(matches!(result.unwrap_err(), SalesError::DataError(_)));
}
