//! ---
//! crt_section: "03-facade"
//! crt_subsection: "module"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Umbrella crate re-exporting the public client runtime surface."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Umbrella crate for the client runtime.
//!
//! Consumers depend on this crate alone. Every public part of the runtime is
//! re-exported here; a new part gets a `pub use` below and, if it is commonly
//! needed, an entry in [`prelude`].

pub use client_runtime_common as common;
pub use client_runtime_version as version;

pub use client_runtime_version::{
    version_number, version_string, Channel, VersionDescriptor, VersionError, VersionInfo,
    VERSION_NUMBER, VERSION_STRING,
};

/// Items most consumers need, for glob import.
pub mod prelude {
    pub use client_runtime_version::{
        version_number, version_string, Channel, VersionDescriptor, VersionInfo,
    };
}
