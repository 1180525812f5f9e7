//! Telemetry setup for OpenTelemetry integration

use anyhow::Result;
use tracing_subscriber::{Layer, Registry};

/// Layer added in front of the log formatter when export is enabled
pub type OtelLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// What happened during telemetry setup (logged once the subscriber exists)
#[derive(Debug)]
pub enum TelemetryState {
    Disabled,
    #[cfg_attr(feature = "telemetry", allow(dead_code))]
    FeatureMissing,
    #[cfg_attr(not(feature = "telemetry"), allow(dead_code))]
    Enabled { service_name: String, endpoint: String },
}

/// Build the OpenTelemetry layer if enabled
///
/// # Environment Variables
///
/// - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (e.g., http://localhost:4317)
/// - `OTEL_SERVICE_NAME`: Service name (default: registration-backfill)
///
/// # Example
///
/// ```text
/// OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4317 \
/// OTEL_SERVICE_NAME=nursery-backfill \
///     ./registration-backfill
/// ```
pub fn init_layer() -> Result<(Option<OtelLayer>, TelemetryState)> {
    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        return Ok((None, TelemetryState::Disabled));
    };

    #[cfg(feature = "telemetry")]
    let result = init_layer_impl(endpoint);

    #[cfg(not(feature = "telemetry"))]
    let result = {
        drop(endpoint);
        Ok((None, TelemetryState::FeatureMissing))
    };

    result
}

#[cfg(feature = "telemetry")]
fn init_layer_impl(endpoint: String) -> Result<(Option<OtelLayer>, TelemetryState)> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::WithExportConfig;

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "registration-backfill".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()?;

    let provider = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .build();
    let tracer = provider.tracer(service_name.clone());
    opentelemetry::global::set_tracer_provider(provider);

    let layer: OtelLayer = Box::new(tracing_opentelemetry::layer().with_tracer(tracer));

    Ok((
        Some(layer),
        TelemetryState::Enabled {
            service_name,
            endpoint,
        },
    ))
}

/// Flush pending spans before the process exits
pub fn shutdown() {
    #[cfg(feature = "telemetry")]
    opentelemetry::global::shutdown_tracer_provider();
}
