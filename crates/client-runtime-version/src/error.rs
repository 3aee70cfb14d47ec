//! ---
//! crt_section: "01-version-descriptor"
//! crt_subsection: "module"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Error types for fallible views over the version string."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
use thiserror::Error;

/// Failure to interpret a version string as text or as semver.
///
/// The raw accessors never fail; only the typed views return this error.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The version string bytes are not UTF-8.
    #[error("version string is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// The version string is text but not a semantic version.
    #[error("version string {value:?} is not valid semver")]
    InvalidSemver {
        /// Offending version string.
        value: String,
        /// Parser error.
        #[source]
        source: semver::Error,
    },
}
