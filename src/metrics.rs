//! Prometheus metrics for the HTTP surface and the analysis pipeline.

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::signal::InsightReport;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub analyses_total: IntCounter,
    pub insights_emitted_total: IntCounterVec,
    pub last_confidence: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let analyses_total = IntCounter::new(
            "analyses_total",
            "Number of full pipeline recomputations",
        )?;
        let insights_emitted_total = IntCounterVec::new(
            Opts::new("insights_emitted_total", "Insights emitted by severity"),
            &["severity"],
        )?;
        let last_confidence = Gauge::new(
            "last_confidence",
            "Confidence of the most recent insight report",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(analyses_total.clone()))?;
        registry.register(Box::new(insights_emitted_total.clone()))?;
        registry.register(Box::new(last_confidence.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            analyses_total,
            insights_emitted_total,
            last_confidence,
        })
    }

    /// Count one recomputation and the insights it produced.
    pub fn record_report(&self, report: &InsightReport) {
        self.analyses_total.inc();
        for insight in &report.insights {
            self.insights_emitted_total
                .with_label_values(&[insight.severity.as_str()])
                .inc();
        }
        self.last_confidence.set(report.confidence);
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
