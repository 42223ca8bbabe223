//! Log and trace pipeline.
//!
//! Call [`init_tracing`] once at process startup, before the first cycle.
//! Every cycle runs inside a `cycle` span, so with an OTLP endpoint
//! configured each control tick shows up as one trace.
//!
//! | Source | Effect |
//! |---|---|
//! | `RUST_LOG` | Log filter (default `"info"`). |
//! | [`TelemetryConfig::json`] | Newline-delimited JSON instead of compact text. |
//! | [`TelemetryConfig::otlp_endpoint`] | OTLP/HTTP collector base URL; enables span export. |
//!
//! # Example
//!
//! ```rust,no_run
//! use striker_runtime::telemetry::{init_tracing, TelemetryConfig};
//!
//! // Hold the guard for the entire lifetime of the process.
//! let _guard = init_tracing(&TelemetryConfig::new("striker"));
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub json: bool,
    pub otlp_endpoint: Option<String>,
}

impl TelemetryConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Install the global `tracing` subscriber.
///
/// The returned [`TracerProviderGuard`] **must** be held for the lifetime of
/// the process; dropping it flushes pending spans.
pub fn init_tracing(config: &TelemetryConfig) -> TracerProviderGuard {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let provider = config
        .otlp_endpoint
        .as_deref()
        .and_then(|endpoint| build_provider(&config.service_name, endpoint));

    let otel_layer = provider.as_ref().map(|p| {
        tracing_opentelemetry::layer().with_tracer(p.tracer(config.service_name.clone()))
    });
    let (json_layer, compact_layer) = if config.json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer().compact()))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer)
        .with(json_layer)
        .with(compact_layer)
        .init();

    TracerProviderGuard(provider)
}

// ─────────────────────────────────────────────────────────────────────────────
// RAII guard
// ─────────────────────────────────────────────────────────────────────────────

/// Shuts the [`SdkTracerProvider`] down on drop, flushing pending spans.
pub struct TracerProviderGuard(Option<SdkTracerProvider>);

impl TracerProviderGuard {
    pub fn is_exporting(&self) -> bool {
        self.0.is_some()
    }
}

impl Drop for TracerProviderGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.0.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("[striker] OpenTelemetry provider shutdown error: {e}");
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────────────────────────

/// `None` when the endpoint is blank or the exporter cannot be built; the
/// caller then logs to the console only.
fn build_provider(service_name: &str, endpoint: &str) -> Option<SdkTracerProvider> {
    if endpoint.trim().is_empty() {
        return None;
    }

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| eprintln!("[striker] OTLP exporter init failed: {e}"))
        .ok()?;

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    Some(
        SdkTracerProvider::builder()
            .with_resource(resource)
            // The control loop is synchronous; there is no async runtime for
            // a batch exporter to spawn onto.
            .with_simple_exporter(exporter)
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_endpoint_builds_no_provider() {
        assert!(build_provider("striker-test", "").is_none());
        assert!(build_provider("striker-test", "   ").is_none());
    }

    #[test]
    fn guard_without_provider_drops_cleanly() {
        let guard = TracerProviderGuard(None);
        assert!(!guard.is_exporting());
        drop(guard);
    }

    #[test]
    fn config_defaults_to_compact_console_only() {
        let cfg = TelemetryConfig::new("striker");
        assert_eq!(cfg.service_name, "striker");
        assert!(!cfg.json);
        assert!(cfg.otlp_endpoint.is_none());
    }
}
