//! ---
//! crt_section: "04-tooling"
//! crt_subsection: "binary"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Rendering of the compiled-in version metadata."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
use anyhow::Result;
use clap::Args;
use client_runtime::common::{ReportConfig, ReportFormat};
use client_runtime::{VersionDescriptor, VersionInfo};
use tracing::info;

/// Options for `show`.
#[derive(Debug, Default, Args)]
pub struct ShowArgs {
    /// Output format (text, json, extended). Overrides the configuration.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,
}

/// Print the report for this build.
pub fn run(args: &ShowArgs, config: &ReportConfig) -> Result<()> {
    let format = args.format.unwrap_or(config.format);
    let descriptor = VersionDescriptor::current();
    info!(version = %descriptor, channel = %descriptor.channel(), ?format, "rendering version report");
    println!("{}", render(descriptor, format, config.include_build)?);
    Ok(())
}

fn render(
    descriptor: VersionDescriptor<'_>,
    format: ReportFormat,
    include_build: bool,
) -> Result<String> {
    let rendered = match format {
        ReportFormat::Text => descriptor.to_string(),
        ReportFormat::Extended => VersionInfo::with_descriptor(descriptor).extended(),
        ReportFormat::Json if include_build => {
            serde_json::to_string_pretty(&VersionInfo::with_descriptor(descriptor))?
        }
        ReportFormat::Json => serde_json::to_string_pretty(&descriptor)?,
    };
    Ok(rendered)
}
