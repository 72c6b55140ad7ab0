//! Thermostat evaluation tests.

use chrono::NaiveDate;
use thermostat_core::{
    error::ThermostatError,
    evaluator::{classify, evaluate, evaluate_default, EvaluatedRecord, ImpactSummary, RiskDistribution, RiskTag},
    generator::{generate, CustomerRecord},
};

fn customer(customer_id: u32, mrr: f64, days: u32) -> CustomerRecord {
    let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    CustomerRecord {
        customer_id,
        pivot_date: date,
        approved_at: date,
        days_delinquent: days,
        monthly_recurring_revenue: mrr,
        device_value: mrr * 12.0,
    }
}

fn evaluate_one(mrr: f64, days: u32) -> EvaluatedRecord {
    evaluate(&[customer(1, mrr, days)], 75.0)
        .unwrap()
        .remove(0)
}

#[test]
fn thirty_days_at_100_mrr_is_red() {
    let e = evaluate_one(100.0, 30);
    assert_eq!(e.daily_recurring_revenue, 3.23);
    assert!((e.cost_to_business - 96.9).abs() < 1e-9,
        "Expected cost 96.9, got {}", e.cost_to_business);
    assert_eq!(e.risk_tag, RiskTag::Red);
}

#[test]
fn current_customer_is_green() {
    let e = evaluate_one(100.0, 0);
    assert_eq!(e.cost_to_business, 0.0);
    assert_eq!(e.risk_tag, RiskTag::Green);
}

#[test]
fn ten_days_at_66_67_mrr_is_yellow() {
    let e = evaluate_one(66.67, 10);
    assert_eq!(e.daily_recurring_revenue, 2.15);
    assert!((e.cost_to_business - 21.5).abs() < 1e-9,
        "Expected cost 21.5, got {}", e.cost_to_business);
    assert_eq!(e.risk_tag, RiskTag::Yellow);
}

#[test]
fn classification_boundaries() {
    assert_eq!(classify(0.0, 75.0), RiskTag::Green);
    assert_eq!(classify(0.01, 75.0), RiskTag::Yellow);
    assert_eq!(classify(75.0, 75.0), RiskTag::Yellow);
    assert_eq!(classify(75.01, 75.0), RiskTag::Red);
    assert_eq!(classify(50.0, 40.0), RiskTag::Red);
    assert_eq!(classify(0.0, 0.0), RiskTag::Green);
    assert_eq!(classify(0.5, 0.0), RiskTag::Red);
}

#[test]
fn derived_fields_hold_for_generated_population() {
    let customers = generate(500);
    let evaluated = evaluate(&customers, 75.0).unwrap();
    assert_eq!(evaluated.len(), customers.len());

    for (e, c) in evaluated.iter().zip(customers.iter()) {
        assert_eq!(&e.record, c, "Base fields must be carried unchanged");

        let daily = (c.monthly_recurring_revenue / 31.0 * 100.0).round() / 100.0;
        assert_eq!(e.daily_recurring_revenue, daily);
        assert_eq!(e.cost_to_business, daily * c.days_delinquent as f64);

        assert_eq!(e.risk_tag == RiskTag::Green, e.cost_to_business == 0.0);
        assert_eq!(e.risk_tag == RiskTag::Red, e.cost_to_business > 75.0);
        if e.cost_to_business > 0.0 && e.cost_to_business <= 75.0 {
            assert_eq!(e.risk_tag, RiskTag::Yellow);
        }
    }
}

#[test]
fn threshold_parameter_is_honored() {
    let records = [customer(1, 100.0, 30)];
    assert_eq!(evaluate(&records, 75.0).unwrap()[0].risk_tag, RiskTag::Red);
    assert_eq!(evaluate(&records, 100.0).unwrap()[0].risk_tag, RiskTag::Yellow);
}

#[test]
fn default_threshold_is_75() {
    let records = [customer(1, 100.0, 23), customer(2, 100.0, 24)];
    // 3.23 * 23 = 74.29, 3.23 * 24 = 77.52
    let evaluated = evaluate_default(&records).unwrap();
    assert_eq!(evaluated[0].risk_tag, RiskTag::Yellow);
    assert_eq!(evaluated[1].risk_tag, RiskTag::Red);
}

#[test]
fn empty_input_evaluates_to_empty_output() {
    assert!(evaluate(&[], 75.0).unwrap().is_empty());
}

#[test]
fn invalid_threshold_is_rejected() {
    let records = [customer(1, 100.0, 30)];
    assert!(matches!(evaluate(&records, -1.0),
        Err(ThermostatError::InvalidThreshold(_))));
    assert!(matches!(evaluate(&records, f64::NAN),
        Err(ThermostatError::InvalidThreshold(_))));
}

#[test]
fn non_numeric_revenue_aborts_the_whole_call() {
    let records = [
        customer(1, 100.0, 3),
        customer(2, f64::NAN, 3),
        customer(3, 100.0, 3),
    ];
    match evaluate(&records, 75.0) {
        Err(ThermostatError::InvalidRecord { customer_id, .. }) => assert_eq!(customer_id, 2),
        other => panic!("Expected InvalidRecord for customer 2, got {other:?}"),
    }

    let negative = [customer(9, -5.0, 1)];
    assert!(evaluate(&negative, 75.0).is_err());
}

#[test]
fn revenue_too_large_to_price_is_rejected() {
    // Finite, but round_cents overflows to infinity.
    let current = [customer(4, 1e308, 0)];
    match evaluate(&current, 75.0) {
        Err(ThermostatError::InvalidRecord { customer_id, .. }) => assert_eq!(customer_id, 4),
        other => panic!("Expected InvalidRecord for customer 4, got {other:?}"),
    }

    let delinquent = [customer(5, 1e308, 12)];
    assert!(matches!(evaluate(&delinquent, 75.0),
        Err(ThermostatError::InvalidRecord { customer_id: 5, .. })));
}

#[test]
fn evaluated_records_serialize_flat() {
    let e = evaluate_one(100.0, 30);
    let json = serde_json::to_value(&e).unwrap();
    assert_eq!(json["customer_id"], 1);
    assert_eq!(json["days_delinquent"], 30);
    assert_eq!(json["daily_recurring_revenue"], 3.23);
    assert_eq!(json["risk_tag"], "red");
}

#[test]
fn distribution_and_summary_count_every_customer() {
    let records = [
        customer(1, 100.0, 0),
        customer(2, 100.0, 0),
        customer(3, 66.67, 10),
        customer(4, 100.0, 30),
    ];
    let evaluated = evaluate(&records, 75.0).unwrap();

    let dist = RiskDistribution::from_records(&evaluated);
    assert_eq!(dist, RiskDistribution { green: 2, yellow: 1, red: 1 });
    assert_eq!(dist.total(), 4);
    assert_eq!(dist.present(), vec![
        (RiskTag::Green, 2),
        (RiskTag::Yellow, 1),
        (RiskTag::Red, 1),
    ]);

    let summary = ImpactSummary::from_records(&evaluated);
    assert_eq!(summary.total_customers, 4);
    assert_eq!(summary.delinquent_customers, 2);
    assert_eq!(summary.total_cost_to_business, 118.4);
    assert!((summary.max_cost_to_business - 96.9).abs() < 1e-9);
}

#[test]
fn tags_carry_fixed_palette_and_labels() {
    assert_eq!(RiskTag::Green.color(), "green");
    assert_eq!(RiskTag::Yellow.color(), "yellow");
    assert_eq!(RiskTag::Red.color(), "red");
    assert_eq!(RiskTag::Green.label(), "No Impact");
    assert_eq!(RiskTag::Yellow.label(), "Medium Impact");
    assert_eq!(RiskTag::Red.label(), "High Impact");
}
