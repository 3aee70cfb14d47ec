//! ---
//! crt_section: "02-ambient"
//! crt_subsection: "module"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Shared configuration and logging primitives."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
//! Configuration loading and tracing setup shared by the client runtime
//! tooling.

pub mod config;
pub mod logging;

pub use config::{AppConfig, LoadedAppConfig, LoggingConfig, ReportConfig, ReportFormat};
pub use logging::{init_tracing, LogFormat};
