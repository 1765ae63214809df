//! End-to-end projections and scenarios through the public API

use approx::assert_relative_eq;
use chrono::NaiveDate;
use comp_projection::{
    offer::load_offers_from_reader, scenario_impact, BatchScenarioRequest, CompensationOffer,
    CompensationProjector, EquityGrant, GrantKind, ScenarioEngine, VestingFrequency, VestingSchedule,
};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reference_offer() -> CompensationOffer {
    let start = date(2024, 3, 1);
    CompensationOffer::new("Reference", 180_000.0, start)
        .with_bonus_percentage(15.0)
        .with_signing_bonus(25_000.0)
        .with_grant(
            EquityGrant::new(
                GrantKind::Rsu,
                200_000.0,
                VestingSchedule::new(12, 48, VestingFrequency::Monthly),
                start,
            )
            .with_refresh_rate(0.0)
            .with_growth_rate(0.0),
        )
}

#[test]
fn test_reference_offer_equity_by_year() {
    let projector = CompensationProjector::new();
    let projection = projector.project(&reference_offer(), 5);

    let equity: Vec<f64> = projection.years.iter().map(|y| y.equity_value).collect();
    assert_eq!(equity, vec![0.0, 50_000.0, 100_000.0, 150_000.0, 200_000.0]);

    assert_eq!(projection.years[0].bonus, 52_000.0);
    assert_eq!(projection.years[1].bonus, 27_000.0);
    assert_eq!(projection.years[0].total, 232_000.0);
}

#[test]
fn test_totals_always_sum_components() {
    let offer = reference_offer()
        .with_bonus_fixed(7_500.0)
        .with_grant(
            EquityGrant::new(
                GrantKind::StockOption,
                90_000.0,
                VestingSchedule::new(6, 36, VestingFrequency::Quarterly),
                date(2024, 5, 15),
            )
            .with_refresh_rate(20.0)
            .with_growth_rate(0.08),
        );

    let engine = ScenarioEngine::new();
    let descriptors = vec![
        json!({"type": "growth_rate", "growth_rate": -0.2}),
        json!({"type": "refresh_rate", "refresh_rate": 30}),
        json!({"type": "exit", "exit_valuation": 4e9, "exit_year": 2}),
        json!({"type": "start_date", "new_start_date": "2024-09-01"}),
    ];

    for projection in engine.compare_scenarios(&offer, &descriptors, 6) {
        assert_eq!(projection.years.len(), 6);
        for (i, year) in projection.years.iter().enumerate() {
            assert_eq!(year.year, i as u32 + 1);
            assert_eq!(year.total, year.base_salary + year.bonus + year.equity_value);
            assert!(year.equity_value >= 0.0);
        }
    }
}

#[test]
fn test_exit_at_reference_valuation_matches_base() {
    let engine = ScenarioEngine::new();
    let offer = reference_offer();

    let base = engine.project(&offer, 4);
    let exit = engine.simulate_exit(&offer, 1_000_000_000.0, 1, 4);

    for (b, e) in base.years.iter().zip(&exit.years) {
        assert_eq!(b.equity_value, e.equity_value);
        assert_eq!(b.total, e.total);
    }

    let impact = scenario_impact(&base, &exit).unwrap();
    assert_eq!(impact.total_difference, 0.0);
    assert_eq!(impact.percentage_change, 0.0);
}

#[test]
fn test_batch_skips_incomplete_exit() {
    let engine = ScenarioEngine::new();
    let descriptors = vec![
        json!({"type": "growth_rate", "growth_rate": 0.15}),
        json!({"type": "exit"}),
    ];

    let projections = engine.compare_scenarios(&reference_offer(), &descriptors, 4);
    assert_eq!(projections.len(), 2);
    assert_eq!(projections[0].offer_name, "Reference");
    assert_eq!(projections[1].offer_name, "Scenario 1: 15% Growth");

    // 15% growth over one year on 50k vested
    assert_relative_eq!(projections[1].years[1].equity_value, 57_500.0, epsilon = 1e-6);
}

#[test]
fn test_breakdown_sums_to_hundred() {
    let projector = CompensationProjector::new();
    let breakdown = projector.breakdown_percentages(&reference_offer(), 4);
    assert_relative_eq!(breakdown.base + breakdown.bonus + breakdown.equity, 100.0, epsilon = 1e-9);
}

#[test]
fn test_batch_request_from_json() {
    let request: BatchScenarioRequest = serde_json::from_value(json!({
        "base_offer": {
            "offer_name": "Startup",
            "base_salary": 160000,
            "bonus_percentage": 10,
            "start_date": "2024-02-29",
            "equity_grants": [{
                "type": "option",
                "value": 400000,
                "vesting_schedule": {"cliff_months": 12, "duration_months": 48, "frequency": "annually"},
                "start_date": "2024-02-29",
                "refresh_rate": 10
            }]
        },
        "scenarios": [
            {"type": "exit", "exit_valuation": 2500000000u64},
            {"type": "refresh_rate", "refresh_rate": "lots"}
        ]
    }))
    .unwrap();
    request.validate().unwrap();
    assert_eq!(request.projection_years, 4);

    let engine = ScenarioEngine::new();
    let projections = engine.compare_scenarios(&request.base_offer, &request.scenarios, request.projection_years);
    assert_eq!(projections.len(), 2);
    assert_eq!(projections[1].offer_name, "Scenario 1: Exit at $2.5B");

    // Leap-day start: year 2 evaluates on 2025-02-28, still 12 months in
    let base = &projections[0];
    assert_eq!(base.years[1].equity_value, 100_000.0 + 40_000.0);

    // Exit defaults to year 4 and drops refresh value
    let exit = &projections[1];
    assert_eq!(exit.years[2].equity_value, 200_000.0);
    assert_eq!(exit.years[3].equity_value, 300_000.0 * 2.5);
}

#[test]
fn test_sample_offer_file_parses() {
    let json = include_str!("../data/sample_offers.json");
    let offers = load_offers_from_reader(json.as_bytes()).unwrap();
    assert_eq!(offers.len(), 2);

    let projections = CompensationProjector::new().compare(&offers, 4);
    assert_eq!(projections[0].offer_name, offers[0].name);
    assert_eq!(projections[1].offer_name, offers[1].name);
}
