//! Unit tests for insight synthesis and confidence

use confluence::config::{CategoryWeights, InsightConfig};
use confluence::indicators::structure::{derive_opening_range, project_levels};
use confluence::models::{InsightReport, Levels, OpeningRange, OscillatorPoint, RsiSettings, Severity};
use confluence::signals::{synthesize, InsightCategory, InsightSynthesizer};

use crate::test_utils::{assert_close, rsi_points, session_with_tail};

fn run(tail: &[f64], rsi: &[f64]) -> InsightReport {
    run_with(&InsightSynthesizer::default(), tail, rsi)
}

fn run_with(synth: &InsightSynthesizer, tail: &[f64], rsi: &[f64]) -> InsightReport {
    let bars = session_with_tail(tail);
    let (range, levels) = structure();
    synth.synthesize(
        &bars,
        &levels,
        &range,
        &rsi_points(rsi),
        &RsiSettings::default(),
    )
}

fn structure() -> (OpeningRange, Levels) {
    let range = derive_opening_range(&session_with_tail(&[])).unwrap();
    (range, project_levels(range.high, range.low))
}

fn titles(report: &InsightReport) -> Vec<&str> {
    report.insights.iter().map(|i| i.title.as_str()).collect()
}

#[test]
fn test_overbought_rsi_is_bearish() {
    let report = run(&[99.5], &[80.0]);

    assert_eq!(titles(&report), ["RSI overbought"]);
    assert_eq!(report.insights[0].severity, Severity::Bearish);
    assert!(report.insights[0].detail.contains("80.00"));
    assert_eq!(report.bias, Severity::Bearish);
    assert_close(report.confidence, 35.0, 1e-9);
}

#[test]
fn test_oversold_rsi_is_bullish() {
    let report = run(&[99.5], &[20.0]);

    assert_eq!(titles(&report), ["RSI oversold"]);
    assert_eq!(report.bias, Severity::Bullish);
    assert_close(report.confidence, 35.0, 1e-9);
}

#[test]
fn test_threshold_boundaries_are_inclusive() {
    let report = run(&[99.5], &[70.0]);
    assert_eq!(titles(&report), ["RSI overbought"]);
    assert_close(report.confidence, 30.0, 1e-9);

    let report = run(&[99.5], &[30.0]);
    assert_eq!(titles(&report), ["RSI oversold"]);

    assert!(run(&[99.5], &[69.99]).is_empty());
    assert!(run(&[99.5], &[30.01]).is_empty());
}

#[test]
fn test_opening_range_breakout() {
    let report = run(&[100.5], &[]);

    assert_eq!(titles(&report), ["Opening range breakout"]);
    assert_eq!(report.insights[0].severity, Severity::Bullish);
    assert!(report.insights[0].detail.contains("03:45–03:49"));
    assert_eq!(report.bias, Severity::Bullish);
    assert_close(report.confidence, 42.5, 1e-9);
}

#[test]
fn test_opening_range_breakdown() {
    let report = run(&[98.5], &[]);

    assert_eq!(titles(&report), ["Opening range breakdown"]);
    assert_eq!(report.bias, Severity::Bearish);
    assert_close(report.confidence, 42.5, 1e-9);
}

#[test]
fn test_close_on_range_edge_is_inside() {
    assert!(run(&[100.0], &[]).is_empty());
    assert!(run(&[99.0], &[]).is_empty());
}

#[test]
fn test_corroborating_signals_raise_confidence() {
    let breakout = run(&[100.5], &[]);
    let oversold = run(&[99.5], &[20.0]);
    let both = run(&[100.5], &[20.0]);

    assert_eq!(both.bias, Severity::Bullish);
    assert_close(both.confidence, 62.625, 1e-9);
    assert!(both.confidence > breakout.confidence);
    assert!(both.confidence > oversold.confidence);

    // ranked by weight: breakout 0.425 ahead of oversold 0.35
    assert_eq!(titles(&both), ["Opening range breakout", "RSI oversold"]);
}

#[test]
fn test_conflicting_signals_flag_mixed_and_reduce_confidence() {
    let report = run(&[100.27], &[]);

    assert_eq!(
        titles(&report),
        ["Opening range breakout", "Testing resistance R2", "Mixed signals"]
    );
    let mixed = report.insights.last().unwrap();
    assert_eq!(mixed.severity, Severity::Neutral);

    assert_eq!(report.bias, Severity::Bullish);
    assert_close(report.confidence, 14.05, 1e-9);

    let breakout_alone = run(&[100.5], &[]).confidence;
    assert!(report.confidence < breakout_alone);
}

#[test]
fn test_overbought_against_breakout() {
    let report = run(&[100.5], &[80.0]);

    assert_eq!(
        titles(&report),
        ["Opening range breakout", "RSI overbought", "Mixed signals"]
    );
    assert_eq!(report.bias, Severity::Bullish);
    assert_close(report.confidence, 7.5, 1e-9);
}

#[test]
fn test_support_test_is_bullish() {
    let (_, levels) = structure();
    let s2 = levels.supports[1];
    let report = run(&[s2], &[]);

    assert!(titles(&report).contains(&"Testing support S2"));
    assert!(titles(&report).contains(&"Opening range breakdown"));
    let support = report
        .insights
        .iter()
        .find(|i| i.title == "Testing support S2")
        .unwrap();
    assert_eq!(support.severity, Severity::Bullish);
}

#[test]
fn test_nearest_level_wins_within_tolerance() {
    let synth = InsightSynthesizer::new(InsightConfig {
        level_tolerance_pct: 0.01,
        ..InsightConfig::default()
    });
    let report = run_with(&synth, &[100.5], &[]);

    // R1..R4 are all within 1%, R3 (100.63) is closest
    let level_tests: Vec<_> = titles(&report)
        .into_iter()
        .filter(|t| t.starts_with("Testing"))
        .collect();
    assert_eq!(level_tests, ["Testing resistance R3"]);
}

#[test]
fn test_zero_levels_are_skipped() {
    let bars = session_with_tail(&[0.0]);
    let range = OpeningRange {
        high: 0.0,
        low: 0.0,
        start: 0,
        end: 0,
    };
    let levels = project_levels(0.0, 0.0);

    let report = synthesize(&bars, &levels, &range, &[], &RsiSettings::default());
    assert!(report.is_empty());
}

#[test]
fn test_momentum_midline_crossings() {
    let up = run(&[99.5], &[45.0, 55.0]);
    assert_eq!(titles(&up), ["Momentum turning up"]);
    assert_eq!(up.bias, Severity::Bullish);
    assert_close(up.confidence, 15.0, 1e-9);

    let down = run(&[99.5], &[55.0, 45.0]);
    assert_eq!(titles(&down), ["Momentum turning down"]);
    assert_eq!(down.bias, Severity::Bearish);

    // touching the midline from below counts, staying on it does not
    assert_eq!(titles(&run(&[99.5], &[49.0, 50.0])), ["Momentum turning up"]);
    assert!(run(&[99.5], &[50.0, 50.0]).is_empty());
}

#[test]
fn test_nothing_fires_yields_empty_report() {
    let report = run(&[99.5], &[50.0, 50.0]);

    assert!(report.is_empty());
    assert_eq!(report.confidence, 0.0);
    assert_eq!(report.bias, Severity::Neutral);
    assert_eq!(report, InsightReport::empty());
}

#[test]
fn test_no_bars_yields_empty_report() {
    let (range, levels) = structure();
    let rsi: Vec<OscillatorPoint> = rsi_points(&[90.0]);
    let report = synthesize(&[], &levels, &range, &rsi, &RsiSettings::default());
    assert!(report.is_empty());
}

#[test]
fn test_confidence_is_bounded_with_extreme_weights() {
    let synth = InsightSynthesizer::new(InsightConfig {
        level_tolerance_pct: 1.0,
        momentum_midline: 50.0,
        weights: CategoryWeights {
            oscillator_extreme: 10.0,
            oscillator_depth_bonus: 10.0,
            level_test: 10.0,
            range_break: 10.0,
            range_extension_bonus: 10.0,
            momentum_shift: 10.0,
        },
    });

    for (tail, rsi) in [
        (105.0, vec![40.0, 99.0]),
        (90.0, vec![60.0, 1.0]),
        (100.5, vec![10.0]),
    ] {
        let report = run_with(&synth, &[tail], &rsi);
        assert!(!report.is_empty());
        assert!(
            (0.0..=100.0).contains(&report.confidence),
            "confidence {} out of bounds",
            report.confidence
        );
    }
}

#[test]
fn test_evaluate_reports_rules_in_order() {
    let bars = session_with_tail(&[100.5]);
    let (range, levels) = structure();
    let scored = InsightSynthesizer::default().evaluate(
        &bars,
        &levels,
        &range,
        &rsi_points(&[45.0, 20.0]),
        &RsiSettings::default(),
    );

    let categories: Vec<_> = scored.iter().map(|s| s.category).collect();
    assert_eq!(
        categories,
        [InsightCategory::OscillatorExtreme, InsightCategory::RangeBreak]
    );
    assert_close(scored[0].weight, 0.35, 1e-12);
    assert_close(scored[1].weight, 0.425, 1e-12);
}

#[test]
fn test_synthesis_is_idempotent() {
    let first = run(&[100.27], &[45.0, 80.0]);
    let second = run(&[100.27], &[45.0, 80.0]);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_default_weights_verify() {
    assert!(CategoryWeights::default().verify());
    let heavy = CategoryWeights {
        range_break: 0.9,
        ..CategoryWeights::default()
    };
    assert!(!heavy.verify());
}
