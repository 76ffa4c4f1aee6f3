//! Tests for constraint compilation.

use approx::assert_abs_diff_eq;

use super::*;
use crate::linear::{Comparison, InequalityRecorder, LinearInequality};
use crate::table::{Column, ColumnData, Table};

fn value_table() -> Table {
    Table::from_columns(vec![
        Column::integer("ID", [1, 2, 3, 4]),
        Column::float("value", [10.0, 20.0, 30.0, 40.0]),
        Column::text("sector", ["A", "A", "B", "B"]),
        Column::integer("rating", [1, 2, 2, 3]),
    ])
    .unwrap()
}

fn compile(constraint: impl Into<Constraint>, table: &Table) -> Vec<LinearInequality> {
    let variables = InequalityRecorder::variables(table.num_rows());
    let constraint: Constraint = constraint.into();
    constraint
        .compile(&InequalityRecorder, &variables, table)
        .unwrap()
}

fn coefficients(inequality: &LinearInequality) -> Vec<f64> {
    inequality.terms.iter().map(|(_, c)| *c).collect()
}

fn assert_coefficients(inequality: &LinearInequality, expected: &[f64]) {
    let actual = coefficients(inequality);
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-12);
    }
}

#[test]
fn test_cardinality_yields_single_sum_bound() {
    let table = value_table();
    let compiled = compile(CardinalityConstraint::new(2).unwrap(), &table);

    assert_eq!(compiled.len(), 1);
    let inequality = &compiled[0];
    assert_eq!(inequality.comparison, Comparison::LessOrEqual);
    assert_eq!(inequality.rhs, 2.0);
    assert_eq!(
        inequality.terms,
        vec![(0, 1.0), (1, 1.0), (2, 1.0), (3, 1.0)]
    );
}

#[test]
fn test_cardinality_rejects_zero() {
    let err = CardinalityConstraint::new(0).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_cardinality_bound_larger_than_universe_compiles() {
    let table = value_table();
    let compiled = compile(CardinalityConstraint::new(100).unwrap(), &table);
    assert_eq!(compiled.len(), 1);
    assert_eq!(compiled[0].rhs, 100.0);
}

#[test]
fn test_cardinality_with_min_assets_adds_lower_bound() {
    let table = value_table();
    let constraint = CardinalityConstraint::new(3).unwrap().with_min_assets(2);
    let compiled = compile(constraint, &table);

    assert_eq!(compiled.len(), 2);
    assert_eq!(compiled[1].comparison, Comparison::GreaterOrEqual);
    assert_eq!(compiled[1].rhs, 2.0);
    assert!(compiled[1].is_satisfied_by(&[true, true, false, false]));
    assert!(!compiled[1].is_satisfied_by(&[true, false, false, false]));
}

#[test]
fn test_mean_band_numeric_default_band() {
    let table = value_table();
    let compiled = compile(MeanBandConstraint::new("value"), &table);

    // mean = 25, tolerance = 0.1
    assert_eq!(compiled.len(), 2);
    assert_eq!(compiled[0].comparison, Comparison::GreaterOrEqual);
    assert_eq!(compiled[0].rhs, 0.0);
    assert_coefficients(&compiled[0], &[-14.9, -4.9, 5.1, 15.1]);
    assert_eq!(compiled[1].comparison, Comparison::LessOrEqual);
    assert_eq!(compiled[1].rhs, 0.0);
    assert_coefficients(&compiled[1], &[-15.1, -5.1, 4.9, 14.9]);
}

#[test]
fn test_mean_band_numeric_selection_semantics() {
    let table = value_table();
    let compiled = compile(
        MeanBandConstraint::new("value").with_tolerance(1.0).unwrap(),
        &table,
    );
    let satisfied = |selection: &[bool]| compiled.iter().all(|i| i.is_satisfied_by(selection));

    assert!(satisfied(&[true, true, true, true]));
    // 10 and 40 average to 25
    assert!(satisfied(&[true, false, false, true]));
    // 40 alone is far above the band
    assert!(!satisfied(&[false, false, false, true]));
    // 10 and 20 average to 15
    assert!(!satisfied(&[true, true, false, false]));
}

#[test]
fn test_mean_band_admits_empty_selection() {
    let table = value_table();
    for column in ["value", "sector"] {
        let compiled = compile(MeanBandConstraint::new(column), &table);
        assert!(compiled.iter().all(|i| i.is_satisfied_by(&[false; 4])));
    }
}

#[test]
fn test_mean_band_explicit_bounds_used_verbatim() {
    let table = value_table();
    let constraint = MeanBandConstraint::new("value")
        .with_min_value(12.0)
        .with_max_value(18.0);
    let compiled = compile(constraint, &table);

    assert_coefficients(&compiled[0], &[-2.0, 8.0, 18.0, 28.0]);
    assert_coefficients(&compiled[1], &[-8.0, 2.0, 12.0, 22.0]);
}

#[test]
fn test_mean_band_single_override_keeps_other_side() {
    let table = value_table();
    let compiled = compile(MeanBandConstraint::new("value").with_max_value(30.0), &table);

    assert_coefficients(&compiled[0], &[-14.9, -4.9, 5.1, 15.1]);
    assert_coefficients(&compiled[1], &[-20.0, -10.0, 0.0, 10.0]);
}

#[test]
fn test_mean_band_integer_column_is_numeric() {
    let table = value_table();
    let compiled = compile(MeanBandConstraint::new("rating"), &table);
    // mean = 2
    assert_eq!(compiled.len(), 2);
    assert_coefficients(&compiled[0], &[-0.9, 0.1, 0.1, 1.1]);
}

#[test]
fn test_mean_band_categorical_two_per_category() {
    let table = value_table();
    let compiled = compile(
        MeanBandConstraint::new("sector").with_tolerance(0.01).unwrap(),
        &table,
    );

    assert_eq!(compiled.len(), 4);
    // "A" first: frequency 0.5, band [0.49, 0.51]
    assert_coefficients(&compiled[0], &[0.51, 0.51, -0.49, -0.49]);
    assert_coefficients(&compiled[1], &[0.49, 0.49, -0.51, -0.51]);
    // then "B"
    assert_coefficients(&compiled[2], &[-0.49, -0.49, 0.51, 0.51]);
    assert_coefficients(&compiled[3], &[-0.51, -0.51, 0.49, 0.49]);

    let everything = [true, true, true, true];
    assert!(compiled.iter().all(|i| i.is_satisfied_by(&everything)));
    let one_sided = [true, true, false, false];
    assert!(!compiled.iter().all(|i| i.is_satisfied_by(&one_sided)));
}

#[test]
fn test_mean_band_categorical_count_matches_distinct_values() {
    let table = Table::from_columns(vec![Column::text(
        "region",
        ["eu", "us", "apac", "eu", "us", "latam"],
    )])
    .unwrap();
    let compiled = compile(MeanBandConstraint::new("region"), &table);
    assert_eq!(compiled.len(), 8);
}

#[test]
fn test_mean_band_categorical_overrides_shared_by_all_categories() {
    let table = value_table();
    let constraint = MeanBandConstraint::new("sector")
        .with_min_value(0.25)
        .with_max_value(0.75);
    let compiled = compile(constraint, &table);

    assert_coefficients(&compiled[0], &[0.75, 0.75, -0.25, -0.25]);
    assert_coefficients(&compiled[2], &[-0.25, -0.25, 0.75, 0.75]);
    assert_coefficients(&compiled[1], &[0.25, 0.25, -0.75, -0.75]);
    assert_coefficients(&compiled[3], &[-0.75, -0.75, 0.25, 0.25]);
}

#[test]
fn test_mean_band_rejects_invalid_tolerance() {
    assert!(MeanBandConstraint::new("value")
        .with_tolerance(-0.5)
        .unwrap_err()
        .is_validation());
    assert!(MeanBandConstraint::new("value")
        .with_tolerance(f64::NAN)
        .is_err());
}

#[test]
fn test_mean_band_missing_column() {
    let table = value_table();
    let variables = InequalityRecorder::variables(4);
    let err = MeanBandConstraint::new("duration")
        .compile(&InequalityRecorder, &variables, &table)
        .unwrap_err();

    assert!(err.is_compilation());
    let message = err.to_string();
    assert!(message.contains("mean_band"));
    assert!(message.contains("duration"));
}

#[test]
fn test_mean_band_column_with_missing_cells() {
    let table = Table::from_columns(vec![Column::new(
        "value",
        ColumnData::Float(vec![Some(1.0), None, Some(f64::NAN)]),
    )])
    .unwrap();
    let variables = InequalityRecorder::variables(3);
    let err = MeanBandConstraint::new("value")
        .compile(&InequalityRecorder, &variables, &table)
        .unwrap_err();
    assert!(err.is_compilation());
}

#[test]
fn test_mean_band_empty_table() {
    let table = Table::from_columns(vec![Column::float("value", Vec::new())]).unwrap();
    let err = MeanBandConstraint::new("value")
        .compile(&InequalityRecorder, &[], &table)
        .unwrap_err();
    assert!(err.is_compilation());
}

#[test]
fn test_misaligned_variables_rejected() {
    let table = value_table();
    let variables = InequalityRecorder::variables(3);

    let cardinality = CardinalityConstraint::new(2)
        .unwrap()
        .compile(&InequalityRecorder, &variables, &table);
    assert!(cardinality.unwrap_err().is_compilation());

    let band = MeanBandConstraint::new("value").compile(&InequalityRecorder, &variables, &table);
    assert!(band.unwrap_err().is_compilation());
}

#[test]
fn test_constraint_set_preserves_insertion_order() {
    let table = value_table();
    let set = ConstraintSet::new()
        .with(MeanBandConstraint::new("sector"))
        .with(CardinalityConstraint::new(2).unwrap())
        .with(MeanBandConstraint::new("value"));
    let variables = InequalityRecorder::variables(4);
    let compiled = set
        .compile_all(&InequalityRecorder, &variables, &table)
        .unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(compiled.len(), 4 + 1 + 2);
    assert_eq!(compiled[4].rhs, 2.0);
    assert_eq!(compiled[4].comparison, Comparison::LessOrEqual);

    let again = set
        .compile_all(&InequalityRecorder, &variables, &table)
        .unwrap();
    assert_eq!(compiled, again);
}

#[test]
fn test_constraint_set_does_not_detect_contradictions() {
    let table = value_table();
    let set: ConstraintSet = vec![
        CardinalityConstraint::new(1).unwrap(),
        CardinalityConstraint::new(4).unwrap().with_min_assets(3),
    ]
    .into_iter()
    .collect();
    let variables = InequalityRecorder::variables(4);
    let compiled = set
        .compile_all(&InequalityRecorder, &variables, &table)
        .unwrap();
    assert_eq!(compiled.len(), 3);
}

#[test]
fn test_constraint_set_propagates_first_error() {
    let table = value_table();
    let set = ConstraintSet::new()
        .with(CardinalityConstraint::new(2).unwrap())
        .with(MeanBandConstraint::new("missing"));
    let variables = InequalityRecorder::variables(4);
    let err = set
        .compile_all(&InequalityRecorder, &variables, &table)
        .unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_empty_constraint_set() {
    let table = value_table();
    let set = ConstraintSet::new();
    let variables = InequalityRecorder::variables(4);
    assert!(set.is_empty());
    assert!(set
        .compile_all(&InequalityRecorder, &variables, &table)
        .unwrap()
        .is_empty());
}

#[test]
fn test_constraint_display() {
    let cardinality: Constraint = CardinalityConstraint::new(5).unwrap().into();
    assert_eq!(cardinality.to_string(), "cardinality(n <= 5)");
    assert_eq!(cardinality.name(), "cardinality");

    let band: Constraint = MeanBandConstraint::new("value").with_min_value(1.5).into();
    assert_eq!(band.to_string(), "mean_band(value, tolerance = 0.1, min = 1.5)");
    assert_eq!(band.name(), "mean_band");
}
