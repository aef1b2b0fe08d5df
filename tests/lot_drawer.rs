//! End-to-end drawer sessions over the public API

use lotsize::services::{DrawerHost, DrawerProps, LotDrawer, LotSizeAggregator};
use lotsize::types::{DrawerMode, LotField, LotNotice, SavedLot, SizeRow, Specification};

#[derive(Default)]
struct Host {
    saved: Vec<SavedLot>,
    closed: usize,
}

impl DrawerHost for Host {
    fn on_save(&mut self, payload: SavedLot) {
        self.saved.push(payload);
    }

    fn on_close(&mut self) {
        self.closed += 1;
    }
}

fn options(sizes: &[&str]) -> Vec<String> {
    sizes.iter().map(|s| s.to_string()).collect()
}

fn fill(aggregator: &mut LotSizeAggregator, index: usize, values: [&str; 4]) {
    for (field, value) in LotField::ALL.into_iter().zip(values) {
        aggregator.update_field(index, field, value).unwrap();
    }
}

// ========== Full sessions ==========

#[test]
fn test_stone_lot_session() {
    let mut drawer = LotDrawer::new(DrawerProps {
        mode: DrawerMode::Create,
        product_name: "Ring".into(),
        specification: Specification::from("STONE"),
        initial_lot_sizes: Vec::new(),
        size_options: options(&["S", "M", "L"]),
    });
    let mut host = Host::default();

    drawer.set_open(true);
    let aggregator = drawer.aggregator_mut().unwrap();
    fill(aggregator, 0, ["S", "2", "10", "8"]);
    let second = aggregator.add_row().unwrap();
    fill(aggregator, second, ["M", "1", "5", "4"]);

    assert!(drawer.can_save());
    assert!(drawer.save(&mut host));
    assert!(!drawer.is_open());

    let saved = &host.saved[0];
    assert_eq!(saved.lot_sizes[0].avg_gross_wt, "5.000");
    assert_eq!(saved.lot_sizes[0].avg_net_wt, "4.000");
    assert_eq!(saved.lot_sizes[0].avg_spec_wt, "1.000");
    assert_eq!(saved.totals.total_sets, 3.0);
    assert_eq!(saved.totals.total_gross_wt, 15.0);
    assert_eq!(saved.totals.total_net_wt, 12.0);

    let json = serde_json::to_value(saved).unwrap();
    assert_eq!(json["totals"]["totalSets"], 3);
    assert_eq!(json["lotSizes"][1]["avgGrossWt"], "5.000");
}

#[test]
fn test_plane_lot_has_zero_spec_weight() {
    let mut lot = LotSizeAggregator::seeded(Vec::new(), Specification::default(), options(&["6"]));
    fill(&mut lot, 0, ["6", "4", "20", "18"]);

    assert_eq!(lot.rows()[0].avg_spec_wt, "0.000");
    assert_eq!(lot.rows()[0].avg_gross_wt, "5.000");
}

#[test]
fn test_cancel_discards_edits_and_reopen_reseeds() {
    let prior = vec![SizeRow {
        size: "7".into(),
        set: "1".into(),
        gross_wt: "3".into(),
        net_wt: "2".into(),
        ..SizeRow::default()
    }];
    let mut drawer = LotDrawer::new(DrawerProps {
        mode: DrawerMode::Edit,
        product_name: "Ring".into(),
        initial_lot_sizes: prior,
        size_options: options(&["7", "8"]),
        ..DrawerProps::default()
    });
    let mut host = Host::default();

    drawer.set_open(true);
    drawer
        .aggregator_mut()
        .unwrap()
        .update_field(0, LotField::Set, "9")
        .unwrap();
    drawer.cancel(&mut host);

    assert_eq!(host.closed, 1);
    assert!(host.saved.is_empty());

    drawer.set_open(true);
    assert_eq!(drawer.aggregator().unwrap().rows()[0].set, "1");
}

// ========== Notices ==========

#[test]
fn test_duplicate_size_is_rejected() {
    let mut lot = LotSizeAggregator::seeded(Vec::new(), Specification::default(), options(&["S", "M"]));
    lot.update_field(0, LotField::Size, "S").unwrap();
    lot.add_row().unwrap();

    assert_eq!(
        lot.update_field(1, LotField::Size, "S"),
        Err(LotNotice::DuplicateSize { row: 0 })
    );
    assert_eq!(lot.rows()[1].size, "");
}

#[test]
fn test_add_row_with_every_size_used() {
    let mut lot = LotSizeAggregator::seeded(Vec::new(), Specification::default(), options(&["S", "M"]));
    lot.update_field(0, LotField::Size, "S").unwrap();
    lot.add_row().unwrap();
    lot.update_field(1, LotField::Size, "M").unwrap();

    assert_eq!(lot.add_row(), Err(LotNotice::NoSizesAvailable));
    assert_eq!(lot.len(), 2);
}

#[test]
fn test_create_mode_starts_with_one_blank_row() {
    let mut drawer = LotDrawer::new(DrawerProps {
        size_options: options(&["S"]),
        ..DrawerProps::default()
    });
    drawer.set_open(true);

    let lot = drawer.aggregator().unwrap();
    assert_eq!(lot.rows(), &[SizeRow::default()]);
    assert!(!drawer.can_save());
}

// ========== Aggregation ==========

#[test]
fn test_totals_are_sum_of_rows() {
    let rows: Vec<SizeRow> = (1..=4)
        .map(|i| SizeRow {
            size: i.to_string(),
            set: i.to_string(),
            gross_wt: format!("{}.5", i),
            net_wt: format!("{}", i),
            ..SizeRow::default()
        })
        .collect();
    let lot = LotSizeAggregator::seeded(rows, Specification::default(), Vec::new());
    let totals = lot.compute_totals();

    assert_eq!(totals.total_sets, 10.0);
    assert_eq!(totals.total_gross_wt, 12.0);
    assert_eq!(totals.total_net_wt, 10.0);

    let grouped_sets: f64 = lot.group_by_size().iter().map(|g| g.total_sets).sum();
    assert_eq!(grouped_sets, totals.total_sets);
}

#[test]
fn test_save_is_idempotent() {
    let mut lot = LotSizeAggregator::seeded(Vec::new(), Specification::from("STONE"), options(&["S"]));
    fill(&mut lot, 0, ["S", "3", "10", "7"]);

    assert_eq!(lot.save(), lot.save());
}

#[test]
fn test_stock_update_from_saved_lot() {
    let mut lot = LotSizeAggregator::seeded(Vec::new(), Specification::default(), options(&["S", "M"]));
    fill(&mut lot, 0, ["S", "2", "10.5", "8"]);
    lot.add_row().unwrap();
    fill(&mut lot, 1, ["M", "1", "4", "3.25"]);

    let stock = lot.save().stock_update();
    assert_eq!(stock.gross_wt, "14.500");
    assert_eq!(stock.net_wt, "11.250");
    assert_eq!(stock.instock_gram, "14.500");
    assert_eq!(stock.instock_set, "3");
    assert_eq!(stock.sizes, vec!["S", "M"]);
}
