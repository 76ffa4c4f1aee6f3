//! End-to-end selection scenarios, run on every backend.

use corefolio_config::OptimizerConfig;
use corefolio_core::{
    AssetId, CardinalityConstraint, Column, ConstraintSet, MeanBandConstraint, Table, Universe,
};
use corefolio_solver::{Optimizer, Sense, SolverKind};
use corefolio_test::{categorical_table, mixed_table, rows_table, universe, value_table, ValueRow};

fn ids(raw: &[i64]) -> Vec<AssetId> {
    raw.iter().map(|&id| AssetId::Integer(id)).collect()
}

#[test]
fn test_two_highest_values_under_cardinality() {
    let universe = universe(value_table());
    let constraints = ConstraintSet::new().with(CardinalityConstraint::new(2).unwrap());

    for kind in SolverKind::ALL {
        let selected = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .optimize()
            .unwrap();
        assert!(selected.len() <= 2);
        assert_eq!(selected, ids(&[3, 4]), "backend {}", kind);
    }
}

#[test]
fn test_upper_bound_alone_selects_nothing_when_minimizing() {
    let universe = universe(value_table());
    let constraints = ConstraintSet::new().with(CardinalityConstraint::new(2).unwrap());

    for kind in SolverKind::ALL {
        let selected = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .with_sense(Sense::Minimize)
            .optimize()
            .unwrap();
        assert!(selected.is_empty(), "backend {}", kind);
    }
}

#[test]
fn test_two_lowest_values_need_lower_bound_when_minimizing() {
    let universe = universe(value_table());
    let constraints =
        ConstraintSet::new().with(CardinalityConstraint::new(2).unwrap().with_min_assets(2));

    for kind in SolverKind::ALL {
        let selected = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .with_sense(Sense::Minimize)
            .optimize()
            .unwrap();
        assert_eq!(selected, ids(&[1, 2]), "backend {}", kind);
    }
}

#[test]
fn test_band_alone_selects_nothing_when_minimizing() {
    let universe = universe(mixed_table());
    let constraints = ConstraintSet::new()
        .with(MeanBandConstraint::new("duration"))
        .with(MeanBandConstraint::new("region"));

    for kind in SolverKind::ALL {
        let selected = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .with_sense(Sense::Minimize)
            .optimize()
            .unwrap();
        assert!(selected.is_empty(), "backend {}", kind);
    }
}

#[test]
fn test_categorical_band_keeps_original_frequencies() {
    let universe = universe(categorical_table());
    let constraints = ConstraintSet::new()
        .with(CardinalityConstraint::new(4).unwrap())
        .with(MeanBandConstraint::new("sector").with_tolerance(0.01).unwrap());

    let optimizer = Optimizer::new(&universe, constraints);
    let compiled = optimizer.compile().unwrap();
    assert_eq!(compiled.len(), 1 + 4);
    assert!(compiled.iter().all(|i| i.is_satisfied_by(&[true; 4])));

    for kind in SolverKind::ALL {
        let selected = optimizer.clone().with_solver(kind).optimize().unwrap();
        assert_eq!(selected, ids(&[1, 2, 3, 4]), "backend {}", kind);
    }
}

#[test]
fn test_generated_identifiers_follow_row_order() {
    let table = Table::from_columns(vec![Column::float("value", [5.0, 1.0, 4.0, 2.0, 3.0])])
        .unwrap();
    let universe = Universe::from_table(table).unwrap();
    assert_eq!(universe.ids(), ids(&[1, 2, 3, 4, 5]).as_slice());

    let constraints = ConstraintSet::new().with(CardinalityConstraint::new(2).unwrap());
    for kind in SolverKind::ALL {
        let selected = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .optimize()
            .unwrap();
        assert_eq!(selected, ids(&[1, 3]), "backend {}", kind);
    }
}

#[test]
fn test_numeric_mean_band_with_cardinality() {
    // duration averages 5.0; the band is [4.5, 5.5]
    let universe = universe(mixed_table());
    let constraints = ConstraintSet::new()
        .with(CardinalityConstraint::new(3).unwrap())
        .with(MeanBandConstraint::new("duration").with_tolerance(0.5).unwrap());

    for kind in SolverKind::ALL {
        let selection = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .solve()
            .unwrap();
        assert_eq!(selection.ids(), ids(&[101, 104, 106]).as_slice(), "backend {}", kind);
        assert!((selection.objective_value() - 19.0).abs() < 1e-9);
    }
}

#[test]
fn test_categorical_band_with_cardinality() {
    // region frequencies: eu 1/2, us 1/3, apac 1/6
    let universe = universe(mixed_table());
    let constraints = ConstraintSet::new()
        .with(CardinalityConstraint::new(4).unwrap())
        .with(MeanBandConstraint::new("region"));

    for kind in SolverKind::ALL {
        let selected = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .optimize()
            .unwrap();
        assert_eq!(selected, ids(&[101, 102, 104, 106]), "backend {}", kind);
    }
}

#[test]
fn test_text_identifiers_are_returned() {
    let table = Table::from_columns(vec![
        Column::text("ticker", ["AAA", "BBB", "CCC"]),
        Column::float("value", [3.0, 1.0, 2.0]),
    ])
    .unwrap();
    let universe = Universe::new(table, "ticker").unwrap();
    let constraints = ConstraintSet::new().with(CardinalityConstraint::new(2).unwrap());

    for kind in SolverKind::ALL {
        let selected = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .optimize()
            .unwrap();
        assert_eq!(selected, vec![AssetId::from("AAA"), AssetId::from("CCC")]);
    }
}

#[test]
fn test_selection_is_subset_within_bound() {
    let rows: Vec<ValueRow> = (0..12)
        .map(|i| ValueRow::new(100 + i, ((i * 7) % 11) as f64 - 3.0))
        .collect();
    let universe = universe(rows_table(&rows));

    for max_assets in 1..=5 {
        let constraints =
            ConstraintSet::new().with(CardinalityConstraint::new(max_assets).unwrap());
        for kind in SolverKind::ALL {
            let selected = Optimizer::new(&universe, constraints.clone())
                .with_solver(kind)
                .optimize()
                .unwrap();
            assert!(selected.len() <= max_assets);
            assert!(selected.iter().all(|id| universe.ids().contains(id)));
        }
    }
}

#[test]
fn test_backends_agree() {
    let universe = universe(mixed_table());
    let programs = vec![
        ConstraintSet::new().with(CardinalityConstraint::new(2).unwrap()),
        ConstraintSet::new()
            .with(CardinalityConstraint::new(3).unwrap())
            .with(MeanBandConstraint::new("duration").with_tolerance(0.5).unwrap()),
        ConstraintSet::new()
            .with(CardinalityConstraint::new(4).unwrap())
            .with(MeanBandConstraint::new("region")),
        ConstraintSet::new()
            .with(CardinalityConstraint::new(4).unwrap().with_min_assets(2))
            .with(MeanBandConstraint::new("rating").with_min_value(1.5).with_max_value(2.5)),
    ];

    for constraints in programs {
        let good_lp = Optimizer::new(&universe, constraints.clone())
            .with_solver(SolverKind::GoodLp)
            .solve()
            .unwrap();
        let microlp = Optimizer::new(&universe, constraints)
            .with_solver(SolverKind::MicroLp)
            .solve()
            .unwrap();
        assert!((good_lp.objective_value() - microlp.objective_value()).abs() < 1e-9);
    }
}

#[test]
fn test_contradictory_constraints_are_solve_errors() {
    let universe = universe(value_table());
    let constraints = ConstraintSet::new()
        .with(CardinalityConstraint::new(1).unwrap())
        .with(CardinalityConstraint::new(4).unwrap().with_min_assets(3));

    for kind in SolverKind::ALL {
        let err = Optimizer::new(&universe, constraints.clone())
            .with_solver(kind)
            .optimize()
            .unwrap_err();
        assert!(err.is_solve(), "backend {}: {}", kind, err);
    }
}

#[test]
fn test_configured_run() {
    let config = OptimizerConfig::from_toml_str(
        r#"
        solver = "microlp"
        sense = "maximize"
        max_assets = 3

        [[constraints]]
        type = "mean_band"
        column = "duration"
        tolerance = 0.5
        "#,
    )
    .unwrap();
    let universe = universe(mixed_table());

    let selected = Optimizer::from_config(&universe, &config)
        .unwrap()
        .optimize()
        .unwrap();
    assert_eq!(selected, ids(&[101, 104, 106]));
}
