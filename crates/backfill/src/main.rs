//! Registration Backfill - Main Entry Point
//!
//! Assigns `REG-NNNNNN` registration numbers to farmers lacking one, then
//! copies each farmer's number onto the bookings that reference it.
//! Exits 0 on success and 1 on any unhandled failure.

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{BackfillConfig, LogFormat};
use nursery_core::application::{BackfillReport, IndexOutcome, RegistrationBackfill};
use nursery_core::port::SystemTimeProvider;
use nursery_infra_sqlite::{
    create_pool, SqliteBookingRepository, SqliteFarmerRepository, SqliteRegistrationIndex,
};
use crate::telemetry::TelemetryState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> ExitCode {
    // Configuration decides the log format, so it is read before logging exists
    let config = BackfillConfig::from_env();
    let log_format = config
        .as_ref()
        .map(|c| c.log_format)
        .unwrap_or(LogFormat::Pretty);

    let telemetry_state = init_logging(log_format);

    info!("Registration backfill v{} starting...", VERSION);
    match telemetry_state {
        TelemetryState::Disabled => {
            tracing::debug!("OpenTelemetry not configured (OTEL_EXPORTER_OTLP_ENDPOINT not set)")
        }
        TelemetryState::FeatureMissing => {
            warn!("OpenTelemetry endpoint set but feature 'telemetry' not enabled");
        }
        TelemetryState::Enabled {
            service_name,
            endpoint,
        } => info!(service_name = %service_name, endpoint = %endpoint, "OpenTelemetry initialized"),
    }

    let outcome = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e),
    };

    let status = exit_status(&outcome);

    telemetry::shutdown();
    ExitCode::from(status)
}

/// Log the final line for the run and map it to the process exit status
fn exit_status(outcome: &Result<BackfillReport>) -> u8 {
    match outcome {
        Ok(report) => {
            info!(
                farmers = report.farmers_scanned,
                assigned = report.registrations_assigned,
                already_registered = report.already_registered,
                bookings = report.bookings_scanned,
                bookings_updated = report.bookings_updated,
                bookings_unresolved = report.bookings_unresolved,
                index_created = report.index.is_created(),
                "Registration backfill completed"
            );
            0
        }
        Err(e) => {
            error!(error = ?e, "Registration backfill failed");
            1
        }
    }
}

/// Install the global subscriber (pretty or JSON, optionally with OTLP export)
fn init_logging(format: LogFormat) -> TelemetryState {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nursery=info,registration_backfill=info"));

    let (otel_layer, state) = match telemetry::init_layer() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Failed to initialize OpenTelemetry (continuing without it): {e:?}");
            (None, TelemetryState::Disabled)
        }
    };

    match format {
        // Production: JSON structured logging
        LogFormat::Json => tracing_subscriber::registry()
            .with(otel_layer)
            .with(env_filter)
            .with(fmt::layer().json())
            .init(),
        // Development: Pretty formatting with colors
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(otel_layer)
            .with(env_filter)
            .with(fmt::layer().pretty())
            .init(),
    }

    state
}

async fn run(config: BackfillConfig) -> Result<BackfillReport> {
    info!(database_url = %config.database_url, "Connecting to database...");

    let pool = create_pool(&config.database_url)
        .await
        .with_context(|| format!("Database connection failed ({})", config.database_url))?;
    info!("Connected to database");

    // DI wiring
    let service = RegistrationBackfill::new(
        Arc::new(SqliteFarmerRepository::new(pool.clone())),
        Arc::new(SqliteBookingRepository::new(pool.clone())),
        Arc::new(SqliteRegistrationIndex::new(pool.clone())),
        Arc::new(SystemTimeProvider),
    );

    let report = service.run().await.context("Backfill aborted")?;

    if let IndexOutcome::Skipped { reason } = &report.index {
        warn!(reason = %reason, "Registration numbers are not protected by a unique index");
    }

    pool.close().await;
    Ok(report)
}
