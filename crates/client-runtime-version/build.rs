//! ---
//! crt_section: "01-version-descriptor"
//! crt_subsection: "build"
//! crt_type: "source"
//! crt_scope: "build"
//! crt_description: "Build script resolving and emitting the version constants."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
use std::path::PathBuf;

use vergen::EmitBuilder;

#[allow(dead_code)]
#[path = "src/build_input.rs"]
mod build_input;

use build_input::BuildInputs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Git metadata is best effort: source tarballs build without a repository.
    EmitBuilder::builder()
        .all_build()
        .all_cargo()
        .all_git()
        .emit()?;

    let inputs = BuildInputs::from_env()?;
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    std::fs::write(out_dir.join(build_input::CONSTANTS_FILE), inputs.render())?;

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/build_input.rs");
    for var in build_input::TRACKED_ENV {
        println!("cargo:rerun-if-env-changed={var}");
    }
    Ok(())
}
