// build.rs

//! build.rs — render the const-correct wrapper header and, with
//! `metis-support`, locate METIS and generate Rust FFI bindings from it.
//!
//! The wrapper header is always written to `$OUT_DIR/metis_shim.h` so the
//! library can audit the exact text bindgen sees.
//!
//! METIS discovery supports two modes:
//!  • Default (pkg-config):  use `pkg_config::probe("metis")`
//!  • Manual    (env-vars):  `METIS_NO_PKG_CONFIG=1` plus `METIS_DIR` or
//!                           (`METIS_LIB_DIR` + `METIS_INCLUDE_DIR`).
//!
//! After generating the bindings we post-process them to replace every
//! `extern "C" { … }` with `unsafe extern "C" { … }`, which edition 2024 requires.

#[allow(dead_code)]
#[path = "src/access/table.rs"]
mod table;

#[allow(dead_code)]
#[path = "src/access/header.rs"]
mod header;

use std::env;
use std::fs::write;
use std::path::{Path, PathBuf};

const HEADER_FILE: &str = "metis_shim.h";

fn render_header(out_dir: &Path) -> PathBuf {
    let path = out_dir.join(HEADER_FILE);
    let text = header::render_wrapper(&table::ENTRY_POINTS);
    write(&path, text).expect("Unable to write wrapper header to OUT_DIR");
    println!("cargo:rerun-if-changed=src/access/table.rs");
    println!("cargo:rerun-if-changed=src/access/header.rs");
    path
}

#[cfg(feature = "metis-support")]
fn flag(name: &str) -> bool {
    env::var_os(name).is_some_and(|v| v != "0")
}

#[cfg(feature = "metis-support")]
fn generate_bindings(out_dir: &Path, header_path: &Path) {
    use regex::Regex;

    let link_kind = if flag("METIS_STATIC") { "static" } else { "dylib" };

    // ─── 1. Find METIS include/lib directories ───────────────────────────────────
    let include_dir = if flag("METIS_NO_PKG_CONFIG") {
        // -------- Manual ----------
        let prefix = env::var("METIS_DIR").ok();
        let inc = env::var("METIS_INCLUDE_DIR")
            .ok()
            .or_else(|| prefix.as_ref().map(|p| format!("{p}/include")))
            .expect("METIS_DIR or METIS_INCLUDE_DIR must be set when METIS_NO_PKG_CONFIG=1");
        let lib = env::var("METIS_LIB_DIR")
            .ok()
            .or_else(|| prefix.as_ref().map(|p| format!("{p}/lib")))
            .expect("METIS_DIR or METIS_LIB_DIR must be set when METIS_NO_PKG_CONFIG=1");

        println!("cargo:rustc-link-search=native={lib}");
        println!("cargo:rustc-link-lib={link_kind}=metis");
        inc
    } else {
        // -------- pkg-config ----------
        let lib = pkg_config::Config::new()
            .statik(link_kind == "static")
            .probe("metis")
            .expect("Could not find METIS via pkg-config; set METIS_NO_PKG_CONFIG=1 to bypass");

        // pkg-config already printed the link-search and link-lib lines.
        lib.include_paths
            .first()
            .unwrap_or_else(|| panic!("pkg-config returned no include path for METIS"))
            .display()
            .to_string()
    };

    if flag("METIS_LINK_GKLIB") {
        println!("cargo:rustc-link-lib={link_kind}=GKlib");
    }

    // ─── 2. Generate + post-process bindings from the wrapper header ────────────
    let header = header_path
        .to_str()
        .expect("OUT_DIR path is not valid UTF-8");

    let bindings = bindgen::Builder::default()
        .header(header)
        .clang_arg(format!("-I{include_dir}"))
        .allowlist_function("METIS_.*")
        .allowlist_type("idx_t")
        .allowlist_type("real_t")
        .allowlist_type("rstatus_et")
        .allowlist_type("m.*_et")
        .allowlist_var("METIS_.*")
        .generate()
        .expect("Failed to generate METIS bindings via bindgen");

    let raw = bindings.to_string();
    let re_extern = Regex::new(r#"(?m)^(?P<prefix>\s*)(?P<block>extern\s+"C"\s*\{)"#)
        .expect("Invalid regex for extern block");
    let patched = re_extern.replace_all(&raw, |caps: &regex::Captures| {
        format!("{}unsafe {}", &caps["prefix"], &caps["block"])
    });

    let out_path = out_dir.join("metis_bindings.rs");
    write(&out_path, patched.as_ref()).expect("Unable to write bindings to OUT_DIR");

    // ─── 3. Re-run triggers ──────────────────────────────────────────────────────
    println!("cargo:rerun-if-env-changed=METIS_NO_PKG_CONFIG");
    println!("cargo:rerun-if-env-changed=METIS_DIR");
    println!("cargo:rerun-if-env-changed=METIS_LIB_DIR");
    println!("cargo:rerun-if-env-changed=METIS_INCLUDE_DIR");
    println!("cargo:rerun-if-env-changed=METIS_STATIC");
    println!("cargo:rerun-if-env-changed=METIS_LINK_GKLIB");
    println!("cargo:rerun-if-changed={include_dir}/metis.h");
}

#[cfg(not(feature = "metis-support"))]
fn generate_bindings(_out_dir: &Path, _header_path: &Path) {
    // No-op when the “metis-support” feature is disabled
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let header_path = render_header(&out_dir);
    generate_bindings(&out_dir, &header_path);
}
