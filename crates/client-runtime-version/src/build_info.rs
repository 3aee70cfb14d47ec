//! ---
//! crt_section: "01-version-descriptor"
//! crt_subsection: "module"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Build provenance captured by vergen."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
use serde::Serialize;

use crate::descriptor::{Channel, VersionDescriptor};

const UNKNOWN: &str = "UNKNOWN";
// vergen emits this instead of a value when it cannot collect one.
const VERGEN_PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// Version descriptor plus build provenance captured via `vergen`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    /// Version number baked into this build.
    pub number: f64,
    /// Version string baked into this build, lossily decoded.
    pub version: String,
    /// Release classification of [`VersionInfo::version`].
    pub channel: Channel,
    /// Git commit hash captured at build time.
    pub git_sha: String,
    /// Build timestamp from the compilation environment.
    pub build_timestamp: String,
    /// Target triple used for the build.
    pub target: String,
    /// Cargo profile used during compilation.
    pub profile: String,
}

impl VersionInfo {
    /// Construct a new [`VersionInfo`] for this build.
    #[must_use]
    pub fn current() -> Self {
        Self::with_descriptor(VersionDescriptor::current())
    }

    /// Combine an arbitrary descriptor with this build's provenance.
    #[must_use]
    pub fn with_descriptor(descriptor: VersionDescriptor<'_>) -> Self {
        Self {
            number: descriptor.number(),
            version: String::from_utf8_lossy(descriptor.string()).into_owned(),
            channel: descriptor.channel(),
            git_sha: captured(option_env!("VERGEN_GIT_SHA")).to_owned(),
            build_timestamp: captured(option_env!("VERGEN_BUILD_TIMESTAMP")).to_owned(),
            target: captured(option_env!("VERGEN_CARGO_TARGET_TRIPLE")).to_owned(),
            profile: profile_name(option_env!("VERGEN_CARGO_DEBUG")).to_owned(),
        }
    }

    /// Version string, or `dev` when the build carries none.
    #[must_use]
    pub fn display_version(&self) -> &str {
        if self.version.trim().is_empty() {
            "dev"
        } else {
            &self.version
        }
    }

    /// Returns a concise CLI string combining version and git hash.
    #[must_use]
    pub fn cli_string(&self) -> String {
        format!("{} ({})", self.display_version(), self.git_sha)
    }

    /// Human readable banner used in logging surfaces.
    #[must_use]
    pub fn banner(&self) -> String {
        format!(
            "client-runtime v{} (git {})",
            self.display_version(),
            self.git_sha
        )
    }

    /// Extended string containing build metadata suitable for `--version` flags.
    #[must_use]
    pub fn extended(&self) -> String {
        format!(
            "{banner}\nNumber: {number:?}\nChannel: {channel}\nBuilt: {built}\nTarget: {target}\nProfile: {profile}",
            banner = self.banner(),
            number = self.number,
            channel = self.channel,
            built = self.build_timestamp,
            target = self.target,
            profile = self.profile
        )
    }
}

fn captured(value: Option<&'static str>) -> &'static str {
    match value.map(str::trim) {
        None | Some("") | Some(VERGEN_PLACEHOLDER) => UNKNOWN,
        Some(value) => value,
    }
}

fn profile_name(debug: Option<&str>) -> &'static str {
    match debug {
        Some("true") => "debug",
        Some("false") => "release",
        _ => UNKNOWN,
    }
}

/// Helper for Clap commands to print the extended version string.
#[must_use]
pub fn clap_long_version() -> String {
    VersionInfo::current().extended()
}
