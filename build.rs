//! Linker setup for the firmware build
//!
//! Host builds (unit tests) link nothing extra.

use std::{env, error::Error, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-env-changed=WOLFSSL_LIB_DIR");

    if env::var("CARGO_CFG_TARGET_OS")? != "none" {
        return Ok(());
    }

    // Put the linker script somewhere the linker can find it
    let out = &PathBuf::from(env::var_os("OUT_DIR").ok_or("OUT_DIR not set")?);
    fs::copy("memory.x", out.join("memory.x"))?;
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    if env::var_os("CARGO_FEATURE_RP235X").is_some() {
        if let Some(dir) = env::var_os("WOLFSSL_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", PathBuf::from(dir).display());
        }
        println!("cargo:rustc-link-lib=static=wolfssl");
    }

    Ok(())
}
