//! ---
//! crt_section: "04-tooling"
//! crt_subsection: "binary"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Semver requirement checks against the compiled-in version."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use clap::Args;
use client_runtime::VersionDescriptor;
use semver::VersionReq;
use tracing::debug;

/// Options for `satisfies`.
#[derive(Debug, Args)]
pub struct SatisfiesArgs {
    /// Semver requirement, e.g. ">=1.0, <2".
    #[arg(value_name = "REQ")]
    pub requirement: String,
}

/// Returns whether the compiled-in version string satisfies the requirement.
pub fn run(args: &SatisfiesArgs) -> Result<bool> {
    let descriptor = VersionDescriptor::current();
    let matched = check(descriptor, &args.requirement)?;
    let verdict = if matched { "satisfies" } else { "does not satisfy" };
    println!(
        "{} {} {}",
        String::from_utf8_lossy(descriptor.string()),
        verdict,
        args.requirement
    );
    Ok(matched)
}

fn check(descriptor: VersionDescriptor<'_>, requirement: &str) -> Result<bool> {
    let req = VersionReq::parse(requirement)
        .with_context(|| format!("invalid version requirement {:?}", requirement))?;
    let version = descriptor
        .semver()
        .context("this build carries no semantic version")?;
    debug!(%version, %req, "checking version requirement");
    Ok(req.matches(&version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_compatible_requirement() {
        let descriptor = VersionDescriptor::new(1.0, b"1.0.0");
        assert!(check(descriptor, ">=1.0").expect("valid"));
        assert!(!check(descriptor, "^2").expect("valid"));
    }

    #[test]
    fn pre_release_needs_explicit_opt_in() {
        let descriptor = VersionDescriptor::new(2.0, b"2.0.0-rc.1");
        assert!(!check(descriptor, ">=1.0").expect("valid"));
        assert!(check(descriptor, ">=2.0.0-rc.0").expect("valid"));
    }

    #[test]
    fn invalid_requirement_is_an_error() {
        let descriptor = VersionDescriptor::new(1.0, b"1.0.0");
        let err = check(descriptor, "not a req").expect_err("invalid");
        assert!(err.to_string().contains("invalid version requirement"));
    }

    #[test]
    fn dev_build_cannot_be_checked() {
        let descriptor = VersionDescriptor::new(0.0, b"");
        let err = check(descriptor, "*").expect_err("dev build");
        assert!(err.to_string().contains("no semantic version"));
    }
}
