use std::collections::HashMap;
use std::fs;
use std::path::Path;

use stock_purchasing::io::{inputs, reporting, sample};
use stock_purchasing::model::records::{Item, PricingRecord, Supplier};
use stock_purchasing::planning::model::PurchasingModel;
use stock_purchasing::planning::verify::verify_plan;
use stock_purchasing::{
    MicroLpSolver, PlanSolver, PlannerConfig, PlannerError, PlannerResult, PurchasePlan,
    PurchasePlanner, PurchasingTable,
};

const TOL: f64 = 1e-6;

fn item(id: &str, current: f64, min: f64, max: f64, sale: f64, expiry: f64) -> Item {
    Item {
        item_id: id.to_string(),
        average_daily_sale: sale,
        expiry_days: expiry,
        current_stock: current,
        min_stock: min,
        max_stock: max,
    }
}

fn supplier(id: &str, min: f64, max: f64) -> Supplier {
    Supplier {
        supplier_id: id.to_string(),
        min_pallets: min,
        max_pallets: max,
    }
}

fn price(item: &str, supplier: &str, cost: f64) -> PricingRecord {
    PricingRecord {
        item_id: item.to_string(),
        supplier_id: supplier.to_string(),
        cost_per_pallet: cost,
    }
}

fn solve(table: &PurchasingTable, config: PlannerConfig) -> Result<PurchasePlan, PlannerError> {
    let solver = MicroLpSolver::new(config.verbose);
    PurchasePlanner::new(config, solver)?.plan(table)
}

fn pallets_for(plan: &PurchasePlan, item: &str, supplier: &str) -> f64 {
    plan.orders
        .iter()
        .filter(|o| o.item_id == item && o.supplier_id == supplier)
        .map(|o| o.pallets)
        .sum()
}

fn single_pair_table() -> PurchasingTable {
    PurchasingTable::join(
        vec![item("I1", 50.0, 100.0, 500.0, 10.0, 100.0)],
        vec![supplier("S1", 0.0, 100.0)],
        vec![price("I1", "S1", 10.0)],
        true,
    )
    .unwrap()
}

#[test]
fn single_pair_orders_just_enough_to_reach_min_stock() {
    let plan = solve(&single_pair_table(), PlannerConfig::default()).unwrap();

    let pallets = pallets_for(&plan, "I1", "S1");
    assert!((pallets - 50.0 / 24.0).abs() < TOL, "got {pallets}");
    assert!((plan.total_cost() - pallets * 10.0).abs() < TOL);
}

#[test]
fn single_pair_with_whole_pallets_rounds_up() {
    let config = PlannerConfig {
        integer_pallets: true,
        ..PlannerConfig::default()
    };
    let plan = solve(&single_pair_table(), config).unwrap();

    let pallets = pallets_for(&plan, "I1", "S1");
    assert!((pallets - 3.0).abs() < TOL, "got {pallets}");
    assert!((plan.total_cost() - 30.0).abs() < TOL);
}

#[test]
fn cheaper_supplier_wins_until_its_cap() {
    // I1 needs 240 units = 10 pallets; S1 is cheaper but capped at 4.
    let table = PurchasingTable::join(
        vec![item("I1", 0.0, 240.0, 1000.0, 50.0, 30.0)],
        vec![supplier("S1", 0.0, 4.0), supplier("S2", 0.0, 100.0)],
        vec![price("I1", "S1", 5.0), price("I1", "S2", 8.0)],
        true,
    )
    .unwrap();

    let plan = solve(&table, PlannerConfig::default()).unwrap();
    assert!((pallets_for(&plan, "I1", "S1") - 4.0).abs() < TOL);
    assert!((pallets_for(&plan, "I1", "S2") - 6.0).abs() < TOL);
    assert!((plan.total_cost() - (4.0 * 5.0 + 6.0 * 8.0)).abs() < TOL);
}

#[test]
fn supplier_minimum_forces_extra_orders() {
    // Nothing is short, but S1 insists on 2 pallets across its items.
    let table = PurchasingTable::join(
        vec![
            item("I1", 100.0, 50.0, 1000.0, 20.0, 30.0),
            item("I2", 100.0, 50.0, 1000.0, 20.0, 30.0),
        ],
        vec![supplier("S1", 2.0, 10.0)],
        vec![price("I1", "S1", 7.0), price("I2", "S1", 3.0)],
        true,
    )
    .unwrap();

    let plan = solve(&table, PlannerConfig::default()).unwrap();
    assert!((plan.total_pallets() - 2.0).abs() < TOL);
    assert!((pallets_for(&plan, "I2", "S1") - 2.0).abs() < TOL);
    assert!((plan.total_cost() - 6.0).abs() < TOL);
}

#[test]
fn expiry_cap_makes_an_otherwise_fine_item_infeasible() {
    // MaxStock allows 500, but only 5 * 10 = 50 units sell before expiry.
    let table = PurchasingTable::join(
        vec![item("I1", 0.0, 100.0, 500.0, 5.0, 10.0)],
        vec![supplier("S1", 0.0, 100.0)],
        vec![price("I1", "S1", 1.0)],
        true,
    )
    .unwrap();

    assert!(matches!(
        solve(&table, PlannerConfig::default()),
        Err(PlannerError::Infeasible { .. })
    ));
}

#[test]
fn min_stock_above_max_stock_is_infeasible() {
    let table = PurchasingTable::join(
        vec![item("I1", 0.0, 600.0, 500.0, 100.0, 100.0)],
        vec![supplier("S1", 0.0, 100.0)],
        vec![price("I1", "S1", 1.0)],
        true,
    )
    .unwrap();

    match solve(&table, PlannerConfig::default()) {
        Err(PlannerError::Infeasible { reason }) => assert!(reason.contains("I1")),
        other => panic!("expected infeasible, got {:?}", other),
    }
}

#[test]
fn jointly_infeasible_supplier_cap_is_reported_by_the_solver() {
    // Each bound is fine alone; S1's cap of 1 pallet cannot cover 48 units.
    let table = PurchasingTable::join(
        vec![item("I1", 0.0, 48.0, 500.0, 10.0, 100.0)],
        vec![supplier("S1", 0.0, 1.0)],
        vec![price("I1", "S1", 1.0)],
        true,
    )
    .unwrap();

    assert!(matches!(
        solve(&table, PlannerConfig::default()),
        Err(PlannerError::Infeasible { .. })
    ));
}

#[test]
fn unpriced_pair_never_appears_in_the_plan() {
    let table = PurchasingTable::join(
        vec![
            item("I1", 0.0, 48.0, 500.0, 10.0, 100.0),
            item("I2", 0.0, 48.0, 500.0, 10.0, 100.0),
        ],
        vec![supplier("S1", 0.0, 100.0), supplier("S2", 0.0, 100.0)],
        vec![price("I1", "S1", 9.0), price("I2", "S2", 9.0)],
        false,
    )
    .unwrap();

    let plan = solve(&table, PlannerConfig::default()).unwrap();
    for order in &plan.orders {
        assert!(
            (order.item_id == "I1" && order.supplier_id == "S1")
                || (order.item_id == "I2" && order.supplier_id == "S2"),
            "unexpected pair {:?}",
            order
        );
    }
}

#[test]
fn random_scenarios_respect_every_bound_and_are_repeatable() {
    for seed in 0..5u64 {
        let inputs = sample::generate_sample_inputs(30, 4, seed);
        let costs: HashMap<(String, String), f64> = inputs
            .pricing
            .iter()
            .map(|p| ((p.item_id.clone(), p.supplier_id.clone()), p.cost_per_pallet))
            .collect();
        let table = PurchasingTable::join(
            inputs.items.clone(),
            inputs.suppliers.clone(),
            inputs.pricing.clone(),
            true,
        )
        .unwrap();

        let first = solve(&table, PlannerConfig::default()).unwrap();
        let second = solve(&table, PlannerConfig::default()).unwrap();

        assert!(verify_plan(&table, &first, 24.0, TOL).is_empty());

        let recomputed: f64 = first
            .orders
            .iter()
            .map(|o| o.pallets * costs[&(o.item_id.clone(), o.supplier_id.clone())])
            .sum();
        assert!((recomputed - first.total_cost()).abs() < 1e-6 * recomputed.max(1.0));
        assert!((first.total_cost() - second.total_cost()).abs() < 1e-6 * first.total_cost().max(1.0));
    }
}

#[test]
fn integer_plans_use_whole_pallets() {
    let inputs = sample::generate_sample_inputs(10, 3, 99);
    let table = PurchasingTable::join(inputs.items, inputs.suppliers, inputs.pricing, true).unwrap();
    let config = PlannerConfig {
        integer_pallets: true,
        ..PlannerConfig::default()
    };

    let plan = solve(&table, config).unwrap();
    assert!(verify_plan(&table, &plan, 24.0, TOL).is_empty());
    for order in &plan.orders {
        assert!((order.pallets - order.pallets.round()).abs() < 1e-6);
    }
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

#[test]
fn files_in_plan_out() {
    let dir = tempfile::tempdir().unwrap();
    let items = dir.path().join("items_updated.csv");
    let suppliers = dir.path().join("suppliers.csv");
    let pricing = dir.path().join("pricing.csv");
    let output = dir.path().join("optimal_purchasing_plan.csv");

    write(
        &items,
        "ItemID,AverageDailySale,Expiry (days),CurrentStock,MinStock,MaxStock\n\
         1,10,100,50,100,500\n\
         2,4,100,200,100,300\n",
    );
    write(&suppliers, "SupplierID,MinPallets,MaxPallets\nA,0,100\nB,0,100\n");
    // Item 2 is already stocked; the row for unknown item 3 is dropped.
    write(
        &pricing,
        "ItemID,SupplierID,CostPerPallet\n1,A,12\n1,B,10\n2,A,5\n3,A,1\n",
    );

    let table = inputs::load_purchasing_table(&items, &suppliers, &pricing, false).unwrap();
    assert_eq!(table.rows().len(), 3);

    let plan = solve(&table, PlannerConfig::default()).unwrap();
    reporting::write_purchasing_plan(&output, &plan).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "ItemID,SupplierID,PalletsOrdered\n1,B,2.08\n");
}

#[test]
fn strict_join_rejects_unknown_supplier_files() {
    let dir = tempfile::tempdir().unwrap();
    let items = dir.path().join("items.csv");
    let suppliers = dir.path().join("suppliers.csv");
    let pricing = dir.path().join("pricing.csv");

    write(
        &items,
        "ItemID,AverageDailySale,Expiry (days),CurrentStock,MinStock,MaxStock\n1,10,100,50,100,500\n",
    );
    write(&suppliers, "SupplierID,MinPallets,MaxPallets\nA,0,100\n");
    write(&pricing, "ItemID,SupplierID,CostPerPallet\n1,A,12\n1,Z,3\n");

    assert!(matches!(
        inputs::load_purchasing_table(&items, &suppliers, &pricing, true),
        Err(PlannerError::UnknownSupplier { .. })
    ));
}

#[test]
fn sample_files_round_trip_through_the_planner() {
    let dir = tempfile::tempdir().unwrap();
    let generated = sample::generate_sample_inputs(12, 3, 5);
    sample::write_sample_inputs(dir.path(), &generated).unwrap();

    let table = inputs::load_purchasing_table(
        &dir.path().join("items.csv"),
        &dir.path().join("suppliers.csv"),
        &dir.path().join("pricing.csv"),
        true,
    )
    .unwrap();
    assert_eq!(table.rows().len(), generated.pricing.len());

    let plan = solve(&table, PlannerConfig::default()).unwrap();
    assert!(verify_plan(&table, &plan, 24.0, TOL).is_empty());
}

/// Orders the same number of pallets on every row.
#[derive(Debug)]
struct FlatSolver {
    pallets: f64,
}

impl PlanSolver for FlatSolver {
    fn solve(&self, model: PurchasingModel) -> PlannerResult<Vec<f64>> {
        let parts = model.into_parts();
        assert_eq!(parts.constraints.len(), parts.bounds.len());
        Ok(vec![self.pallets; parts.variables.len()])
    }
}

#[test]
fn planner_accepts_a_solver_defined_outside_the_crate() {
    let planner =
        PurchasePlanner::new(PlannerConfig::default(), FlatSolver { pallets: 3.0 }).unwrap();
    let plan = planner.plan(&single_pair_table()).unwrap();

    assert_eq!(plan.orders.len(), 1);
    assert_eq!(pallets_for(&plan, "I1", "S1"), 3.0);
    assert_eq!(plan.total_cost(), 30.0);

    // 50 + 24 * 1 stays under MinStock 100, so verification rejects it.
    let planner =
        PurchasePlanner::new(PlannerConfig::default(), FlatSolver { pallets: 1.0 }).unwrap();
    assert!(matches!(
        planner.plan(&single_pair_table()),
        Err(PlannerError::Solver { .. })
    ));
}

#[test]
fn non_finite_input_fields_never_reach_the_solver() {
    let dir = tempfile::tempdir().unwrap();
    let items = dir.path().join("items.csv");
    let suppliers = dir.path().join("suppliers.csv");
    let pricing = dir.path().join("pricing.csv");
    fs::write(
        &items,
        "ItemID,AverageDailySale,Expiry (days),CurrentStock,MinStock,MaxStock\n\
         I1,NaN,10,0,50,500\n",
    )
    .unwrap();
    fs::write(&suppliers, "SupplierID,MinPallets,MaxPallets\nS1,0,100\n").unwrap();
    fs::write(&pricing, "ItemID,SupplierID,CostPerPallet\nI1,S1,10\n").unwrap();

    let result = inputs::load_purchasing_table(&items, &suppliers, &pricing, false);
    assert!(matches!(
        result,
        Err(PlannerError::NonFiniteValue { table: "items", .. })
    ));
}
