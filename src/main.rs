use chrono::{Duration, TimeZone, Utc};
use confluence::config::Config;
use confluence::models::{PriceBar, SmoothingMethod};
use confluence::signals::{MarketAnalysis, SignalEngine};

/// A quiet opening five minutes followed by a steady push higher.
fn demo_session() -> Option<Vec<PriceBar>> {
    let open = Utc.with_ymd_and_hms(2026, 10, 16, 3, 45, 0).single()?;
    let mut bars = Vec::new();
    let mut close = 24_000.0_f64;

    for i in 0..45 {
        let drift = match i {
            0..=4 => [4.0, -6.0, 3.0, -2.0, 1.0][i],
            5..=24 => 2.5,
            _ => if i % 3 == 0 { -3.0 } else { 4.0 },
        };
        let open_price = close;
        close += drift;
        let high = open_price.max(close) + 1.5;
        let low = open_price.min(close) - 1.5;
        let time = open + Duration::minutes(i as i64);
        bars.push(PriceBar::new(open_price, high, low, close, 1_000.0 + i as f64 * 25.0, 0).at(time));
    }

    Some(bars)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let bars = demo_session().ok_or("invalid demo session start")?;

    for smoothing in [SmoothingMethod::Rma, SmoothingMethod::Ema, SmoothingMethod::Sma] {
        let settings = config.settings.with_smoothing(smoothing);
        let analysis = SignalEngine::analyze(&bars, &settings, &config.insights)?;
        println!("{} ({}):", config.symbol, smoothing.label());
        print_analysis(&analysis);
        println!();
    }

    Ok(())
}

fn print_analysis(analysis: &MarketAnalysis) {
    let range = &analysis.opening_range;
    println!(
        "  Opening range: H {:.2} / L {:.2} ({})",
        range.high,
        range.low,
        range.window_label()
    );
    println!(
        "  Last: {:.2} ({:+.2}, {:+.2}%)",
        analysis.market.last, analysis.market.change, analysis.market.change_percent
    );
    let fmt_levels = |levels: &[f64]| {
        levels
            .iter()
            .map(|l| format!("{:.2}", l))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("  Resistances: {}", fmt_levels(&analysis.levels.resistances));
    println!("  Supports: {}", fmt_levels(&analysis.levels.supports));
    match analysis.latest_rsi {
        Some(rsi) => println!("  RSI: {:.2} ({} points)", rsi, analysis.rsi_series.len()),
        None => println!("  RSI: unavailable"),
    }
    println!(
        "  Conviction: {:.0}% {}",
        analysis.report.confidence, analysis.report.bias
    );
    if analysis.report.is_empty() {
        println!("  Waiting for sufficient data to generate actionable intelligence.");
    }
    for (i, insight) in analysis.report.insights.iter().enumerate() {
        println!(
            "    {}. [{}] {}: {}",
            i + 1,
            insight.severity,
            insight.title,
            insight.detail
        );
    }
}
