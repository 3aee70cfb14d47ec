//! ---
//! crt_section: "01-version-descriptor"
//! crt_subsection: "module"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Typed view over a version number and version string pair."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
use std::fmt;

use semver::Version;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::build_input::BuildInputs;
use crate::error::VersionError;
use crate::{VERSION_NUMBER, VERSION_STRING};

const PLACEHOLDERS: [&str; 4] = ["0.0.0", "unknown", "dev", "snapshot"];

/// Release classification of a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Plain semantic version such as `1.2.3`.
    Release,
    /// Semantic version with pre-release identifiers such as `1.2.3-rc.1`.
    PreRelease,
    /// Empty, placeholder or non-semver string of an unreleased build.
    Development,
}

impl Channel {
    /// Lower-case label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Release => "release",
            Channel::PreRelease => "pre-release",
            Channel::Development => "development",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Channel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A version number paired with a version string.
///
/// [`VersionDescriptor::CURRENT`] describes this build. Other descriptors are
/// plain values, e.g. for inputs of a different build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VersionDescriptor<'a> {
    number: f64,
    string: &'a [u8],
}

impl VersionDescriptor<'static> {
    /// Descriptor of this build.
    pub const CURRENT: Self = Self::new(VERSION_NUMBER, VERSION_STRING);

    /// Descriptor of this build.
    #[inline]
    #[must_use]
    pub const fn current() -> Self {
        Self::CURRENT
    }
}

impl<'a> VersionDescriptor<'a> {
    /// Pair a number with a string.
    #[must_use]
    pub const fn new(number: f64, string: &'a [u8]) -> Self {
        Self { number, string }
    }

    /// Version number.
    #[inline]
    #[must_use]
    pub const fn number(&self) -> f64 {
        self.number
    }

    /// Version string bytes.
    #[inline]
    #[must_use]
    pub const fn string(&self) -> &'a [u8] {
        self.string
    }

    /// Version string as text.
    pub fn as_str(&self) -> Result<&'a str, VersionError> {
        Ok(std::str::from_utf8(self.string)?)
    }

    /// Version string parsed as semver. A leading `v` is accepted.
    pub fn semver(&self) -> Result<Version, VersionError> {
        let text = self.as_str()?;
        Version::parse(text.trim().trim_start_matches('v')).map_err(|source| {
            VersionError::InvalidSemver {
                value: text.to_owned(),
                source,
            }
        })
    }

    /// Classify the version string.
    ///
    /// Anything that is not a usable semantic version is a development build;
    /// this is an accepted state and never an error.
    pub fn channel(&self) -> Channel {
        let Ok(text) = self.as_str() else {
            return Channel::Development;
        };
        let text = text.trim();
        if text.is_empty()
            || PLACEHOLDERS
                .iter()
                .any(|placeholder| text.eq_ignore_ascii_case(placeholder))
        {
            return Channel::Development;
        }
        match self.semver() {
            Ok(version) if version.pre.is_empty() => Channel::Release,
            Ok(_) => Channel::PreRelease,
            Err(_) => Channel::Development,
        }
    }

    /// Whether this describes a published release.
    pub fn is_release(&self) -> bool {
        self.channel() == Channel::Release
    }
}

impl BuildInputs {
    /// Descriptor a build with these inputs reports.
    #[must_use]
    pub fn descriptor(&self) -> VersionDescriptor<'_> {
        VersionDescriptor::new(self.number, self.string.as_bytes())
    }
}

impl fmt::Display for VersionDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?})",
            String::from_utf8_lossy(self.string),
            self.number
        )
    }
}

impl Serialize for VersionDescriptor<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("VersionDescriptor", 3)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("string", &String::from_utf8_lossy(self.string))?;
        state.serialize_field("channel", self.channel().as_str())?;
        state.end()
    }
}
