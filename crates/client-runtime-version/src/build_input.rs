//! ---
//! crt_section: "01-version-descriptor"
//! crt_subsection: "module"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Resolution of the build-time version inputs."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
//! Resolution of the values baked into [`VERSION_NUMBER`](crate::VERSION_NUMBER)
//! and [`VERSION_STRING`](crate::VERSION_STRING).
//!
//! This file is compiled twice: once by `build.rs`, which renders the constants
//! into `OUT_DIR`, and once as part of the library so the same rules can be
//! inspected and tested. It must not reference other modules of the crate.

use semver::Version;
use thiserror::Error;

/// Optional decimal override for the version number.
pub const NUMBER_OVERRIDE_ENV: &str = "CLIENT_RUNTIME_VERSION_NUMBER";
/// Optional override for the version string. An empty value marks a dev build.
pub const STRING_OVERRIDE_ENV: &str = "CLIENT_RUNTIME_VERSION_STRING";
/// Package version set by cargo, used when no override is present.
pub const PACKAGE_VERSION_ENV: &str = "CARGO_PKG_VERSION";
/// File name of the generated constants inside `OUT_DIR`.
pub const CONSTANTS_FILE: &str = "version_constants.rs";
/// Environment variables whose change must trigger a rebuild.
pub const TRACKED_ENV: [&str; 2] = [NUMBER_OVERRIDE_ENV, STRING_OVERRIDE_ENV];

// Each semver component gets three decimal digits in the derived number.
const COMPONENT_LIMIT: u64 = 1_000;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Explicit override supplied by the release tooling.
    Override,
    /// Derived from the cargo package version.
    Package,
}

/// Errors raised while resolving build inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildInputError {
    /// A required variable was absent from the build environment.
    #[error("{0} is not set")]
    Missing(&'static str),
    /// The number override is not a decimal.
    #[error("{var} must be a decimal number, got {value:?}")]
    InvalidNumber {
        /// Variable holding the rejected value.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The number override is NaN, infinite or negative.
    #[error("{var} must be finite and non-negative, got {value}")]
    NumberOutOfRange {
        /// Variable holding the rejected value.
        var: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A version string could not be parsed as semver.
    #[error("version {value:?} is not valid semver: {reason}")]
    InvalidPackageVersion {
        /// Rejected version string.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// A semver component does not fit the derived number encoding.
    #[error("version {value} has a component >= 1000; set CLIENT_RUNTIME_VERSION_NUMBER explicitly")]
    ComponentTooLarge {
        /// Rejected package version.
        value: String,
    },
}

/// Values the build script bakes into the library.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInputs {
    /// Resolved version number.
    pub number: f64,
    /// Resolved version string.
    pub string: String,
    /// Origin of [`BuildInputs::number`].
    pub number_source: InputSource,
    /// Origin of [`BuildInputs::string`].
    pub string_source: InputSource,
}

impl BuildInputs {
    /// Resolve inputs from the process environment of the build script.
    pub fn from_env() -> Result<Self, BuildInputError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve inputs through an arbitrary lookup, overrides first. Without a
    /// number override the number follows the resolved string when it is semver.
    pub fn resolve<F>(lookup: F) -> Result<Self, BuildInputError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let package = lookup(PACKAGE_VERSION_ENV);

        let (string, string_source) = match lookup(STRING_OVERRIDE_ENV) {
            Some(value) => (value.trim().to_owned(), InputSource::Override),
            None => (
                package
                    .clone()
                    .ok_or(BuildInputError::Missing(PACKAGE_VERSION_ENV))?,
                InputSource::Package,
            ),
        };

        let number_override = lookup(NUMBER_OVERRIDE_ENV).filter(|value| !value.trim().is_empty());
        let (number, number_source) = match number_override {
            Some(value) => (parse_number_override(&value)?, InputSource::Override),
            // The number follows the string whenever the string is a version,
            // so a string override alone cannot pair with a stale number.
            None => match number_from_semver(&string) {
                Ok(number) => (number, string_source),
                Err(BuildInputError::InvalidPackageVersion { .. }) => {
                    let package = package
                        .as_deref()
                        .ok_or(BuildInputError::Missing(PACKAGE_VERSION_ENV))?;
                    (number_from_semver(package)?, InputSource::Package)
                }
                Err(err) => return Err(err),
            },
        };

        Ok(Self {
            number,
            string,
            number_source,
            string_source,
        })
    }

    /// Render the inputs as Rust items for `include!`.
    ///
    /// `Debug` formatting yields valid literals for both values and round-trips
    /// the float exactly.
    pub fn render(&self) -> String {
        format!(
            "/// Version number of this build.\n\
             pub const VERSION_NUMBER: f64 = {number:?};\n\
             /// Version string of this build. Empty for unreleased builds.\n\
             pub const VERSION_STRING: &[u8] = {string:?}.as_bytes();\n",
            number = self.number,
            string = self.string,
        )
    }
}

/// Parse an explicit number override.
pub fn parse_number_override(value: &str) -> Result<f64, BuildInputError> {
    let number = value
        .trim()
        .parse::<f64>()
        .map_err(|_| BuildInputError::InvalidNumber {
            var: NUMBER_OVERRIDE_ENV,
            value: value.to_owned(),
        })?;
    if !number.is_finite() || number.is_sign_negative() {
        return Err(BuildInputError::NumberOutOfRange {
            var: NUMBER_OVERRIDE_ENV,
            value: number,
        });
    }
    Ok(number)
}

/// Encode a semver string as `major.mmmppp`, e.g. `2.3.4` becomes `2.003004`.
///
/// Ordering of the result matches semver precedence of the release triple as
/// long as minor and patch stay below 1000. Pre-release and build identifiers
/// do not contribute.
pub fn number_from_semver(value: &str) -> Result<f64, BuildInputError> {
    let version = Version::parse(value.trim().trim_start_matches('v')).map_err(|err| {
        BuildInputError::InvalidPackageVersion {
            value: value.to_owned(),
            reason: err.to_string(),
        }
    })?;
    if version.minor >= COMPONENT_LIMIT || version.patch >= COMPONENT_LIMIT {
        return Err(BuildInputError::ComponentTooLarge {
            value: value.to_owned(),
        });
    }
    // Going through the decimal text keeps the result the nearest f64 to the
    // written value instead of accumulating division error.
    format!("{}.{:03}{:03}", version.major, version.minor, version.patch)
        .parse::<f64>()
        .map_err(|err| BuildInputError::InvalidPackageVersion {
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn package_version_is_the_fallback() {
        let inputs = BuildInputs::resolve(lookup_from(&[(PACKAGE_VERSION_ENV, "1.0.0")]))
            .expect("resolves");
        assert_eq!(inputs.number, 1.0);
        assert_eq!(inputs.string, "1.0.0");
        assert_eq!(inputs.number_source, InputSource::Package);
        assert_eq!(inputs.string_source, InputSource::Package);
    }

    #[test]
    fn overrides_take_precedence() {
        let inputs = BuildInputs::resolve(lookup_from(&[
            (PACKAGE_VERSION_ENV, "1.0.0"),
            (NUMBER_OVERRIDE_ENV, "2.0"),
            (STRING_OVERRIDE_ENV, " 2.0.0 "),
        ]))
        .expect("resolves");
        assert_eq!(inputs.number, 2.0);
        assert_eq!(inputs.string, "2.0.0");
        assert_eq!(inputs.number_source, InputSource::Override);
        assert_eq!(inputs.string_source, InputSource::Override);
    }

    #[test]
    fn empty_string_override_is_a_dev_build() {
        let inputs = BuildInputs::resolve(lookup_from(&[
            (PACKAGE_VERSION_ENV, "1.4.0"),
            (STRING_OVERRIDE_ENV, ""),
        ]))
        .expect("resolves");
        assert!(inputs.string.is_empty());
        assert_eq!(inputs.number, 1.004);
    }

    #[test]
    fn string_override_alone_drives_the_number() {
        let inputs = BuildInputs::resolve(lookup_from(&[
            (PACKAGE_VERSION_ENV, "1.0.0"),
            (STRING_OVERRIDE_ENV, "2.3.4"),
        ]))
        .expect("resolves");
        assert_eq!(inputs.string, "2.3.4");
        assert_eq!(inputs.number, 2.003004);
        assert_eq!(inputs.number_source, InputSource::Override);
    }

    #[test]
    fn non_semver_string_override_keeps_the_package_number() {
        let inputs = BuildInputs::resolve(lookup_from(&[
            (PACKAGE_VERSION_ENV, "1.2.0"),
            (STRING_OVERRIDE_ENV, "nightly-a1b2c3d"),
        ]))
        .expect("resolves");
        assert_eq!(inputs.string, "nightly-a1b2c3d");
        assert_eq!(inputs.number, 1.002);
        assert_eq!(inputs.number_source, InputSource::Package);
    }

    #[test]
    fn oversized_string_override_is_rejected() {
        let err = BuildInputs::resolve(lookup_from(&[
            (PACKAGE_VERSION_ENV, "1.0.0"),
            (STRING_OVERRIDE_ENV, "1.1000.0"),
        ]))
        .expect_err("component too large");
        assert!(matches!(err, BuildInputError::ComponentTooLarge { .. }));
    }

    #[test]
    fn blank_number_override_falls_back_to_package() {
        let inputs = BuildInputs::resolve(lookup_from(&[
            (PACKAGE_VERSION_ENV, "3.2.1"),
            (NUMBER_OVERRIDE_ENV, "   "),
        ]))
        .expect("resolves");
        assert_eq!(inputs.number, 3.002001);
        assert_eq!(inputs.number_source, InputSource::Package);
    }

    #[test]
    fn missing_package_version_is_reported() {
        let err = BuildInputs::resolve(lookup_from(&[])).expect_err("nothing to resolve");
        assert_eq!(err, BuildInputError::Missing(PACKAGE_VERSION_ENV));
    }

    #[test]
    fn overrides_alone_do_not_need_a_package_version() {
        let inputs = BuildInputs::resolve(lookup_from(&[
            (NUMBER_OVERRIDE_ENV, "7"),
            (STRING_OVERRIDE_ENV, "7.0.0"),
        ]))
        .expect("resolves");
        assert_eq!(inputs.number, 7.0);
    }

    #[test]
    fn number_override_rejects_garbage() {
        assert!(matches!(
            parse_number_override("one point oh"),
            Err(BuildInputError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_number_override("NaN"),
            Err(BuildInputError::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            parse_number_override("inf"),
            Err(BuildInputError::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            parse_number_override("-1.0"),
            Err(BuildInputError::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            parse_number_override("-0"),
            Err(BuildInputError::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            parse_number_override("-0.0"),
            Err(BuildInputError::NumberOutOfRange { .. })
        ));
        assert_eq!(parse_number_override("0"), Ok(0.0));
        assert_eq!(parse_number_override(" 12.5 "), Ok(12.5));
    }

    #[test]
    fn derived_numbers_follow_release_ordering() {
        let ordered = ["0.9.999", "1.0.0", "1.0.1", "1.2.0", "1.10.0", "2.0.0"];
        let numbers: Vec<f64> = ordered
            .iter()
            .map(|v| number_from_semver(v).expect("valid semver"))
            .collect();
        assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]), "{numbers:?}");
    }

    #[test]
    fn derived_number_ignores_pre_release_and_leading_v() {
        assert_eq!(number_from_semver("v2.3.4-beta.1+abc"), Ok(2.003004));
    }

    #[test]
    fn oversized_components_are_rejected() {
        assert!(matches!(
            number_from_semver("1.1000.0"),
            Err(BuildInputError::ComponentTooLarge { .. })
        ));
        assert!(matches!(
            number_from_semver("not-a-version"),
            Err(BuildInputError::InvalidPackageVersion { .. })
        ));
    }

    #[test]
    fn render_emits_exact_literals() {
        let inputs = BuildInputs {
            number: 2.003004,
            string: "2.3.4 \"quoted\"".to_owned(),
            number_source: InputSource::Package,
            string_source: InputSource::Override,
        };
        let rendered = inputs.render();
        assert!(rendered.contains("pub const VERSION_NUMBER: f64 = 2.003004;"));
        assert!(rendered.contains(r#"pub const VERSION_STRING: &[u8] = "2.3.4 \"quoted\"".as_bytes();"#));
    }

    #[test]
    fn render_keeps_a_decimal_point_for_whole_numbers() {
        let inputs = BuildInputs {
            number: 1.0,
            string: String::new(),
            number_source: InputSource::Override,
            string_source: InputSource::Override,
        };
        assert!(inputs.render().contains("= 1.0;"));
        assert!(inputs.render().contains(r#"= "".as_bytes();"#));
    }
}
