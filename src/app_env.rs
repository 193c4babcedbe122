/// URL for accessing the PostgreSQL database (should contain a database name in the path)
pub const DB_URL: &str = "DATABASE_URL";
/// Log level configuration for the application. For formatting info, see [EnvFilter's documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL, typically http://localhost:4317 when a collector sidecar is running.
/// Span and metric export is only enabled when both export URLs are set.
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL, typically http://localhost:4317 when a collector sidecar is running.
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

/// Host the HTTP server binds to
pub const SERVER_HOST: &str = "SERVER_HOST";
/// Port the HTTP server binds to
pub const SERVER_PORT: &str = "SERVER_PORT";

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
