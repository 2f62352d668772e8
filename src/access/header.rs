//! Renders the C wrapper header fed to bindgen.
//!
//! The header includes `metis.h` with the five entry points renamed to their
//! `rs_` aliases, retires the aliases, then re-declares the entry points under
//! their real names with `const` on every read-only pointer. Shared with
//! `build.rs` through `#[path]`, so std-only.

use std::fmt::Write as _;

use super::table::{alias_of, Access, EntryPoint, Param};

/// Header path the wrapper includes.
pub const UPSTREAM_INCLUDE: &str = "#include <metis.h>";

/// C spelling of a single parameter, e.g. `const idx_t *xadj` or `idx_t **r_xadj`.
pub fn render_param(param: &Param) -> String {
    let qualifier = match param.access {
        Access::ReadOnly => "const ",
        Access::ReadWrite => "",
    };
    format!(
        "{qualifier}{} {}{}",
        param.scalar.c_name(),
        "*".repeat(param.depth as usize),
        param.name
    )
}

/// `METIS_API(int)` declaration of one entry point under its real name.
pub fn render_declaration(entry: &EntryPoint) -> String {
    let params: Vec<String> = entry.params.iter().map(render_param).collect();
    format!("METIS_API(int)\n{}({});\n", entry.name, params.join(", "))
}

/// Full wrapper header for `entries`.
pub fn render_wrapper(entries: &[EntryPoint]) -> String {
    let mut out = String::new();
    out.push_str("/* Generated by metis-shim. Do not edit. */\n\n");

    for entry in entries {
        let _ = writeln!(out, "#define {} {}", entry.name, alias_of(entry.name));
    }
    out.push('\n');
    out.push_str(UPSTREAM_INCLUDE);
    out.push_str("\n\n");
    for entry in entries {
        let _ = writeln!(out, "#undef {}", entry.name);
    }

    out.push_str("\n#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
    for entry in entries {
        out.push_str(&render_declaration(entry));
        out.push('\n');
    }
    out.push_str("#ifdef __cplusplus\n}\n#endif\n");
    out
}
