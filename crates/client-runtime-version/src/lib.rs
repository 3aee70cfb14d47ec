//! ---
//! crt_section: "01-version-descriptor"
//! crt_subsection: "module"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Build-time version number and version string."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Version metadata of the client runtime.
//!
//! [`VERSION_NUMBER`] and [`VERSION_STRING`] are generated by the build script
//! from the build environment (see [`build_input`]) and compiled in as
//! constants, so reading them needs no initialisation and no synchronisation.

mod generated {
    include!(concat!(env!("OUT_DIR"), "/version_constants.rs"));
}

pub mod build_info;
pub mod build_input;
pub mod descriptor;
pub mod error;

pub use build_info::{clap_long_version, VersionInfo};
pub use descriptor::{Channel, VersionDescriptor};
pub use error::VersionError;
pub use generated::{VERSION_NUMBER, VERSION_STRING};

/// Version number of this build.
#[inline]
#[must_use]
pub const fn version_number() -> f64 {
    VERSION_NUMBER
}

/// Version string of this build.
///
/// Release builds carry a tag such as `1.2.3`. Unreleased builds may carry an
/// empty or placeholder string; see [`Channel::Development`].
#[inline]
#[must_use]
pub const fn version_string() -> &'static [u8] {
    VERSION_STRING
}
