//! Parser for bindgen-generated `extern "C"` function declarations.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ParseError;
use crate::access::{Access, Scalar};

/// One pointer parameter of a generated binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustParam {
    pub name: String,
    pub scalar: Scalar,
    pub depth: u8,
    /// Mutability of the outermost pointer.
    pub access: Access,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustFn {
    pub name: String,
    pub params: Vec<RustParam>,
}

static FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"pub fn (\w+)\s*\(([^)]*)\)").expect("valid fn regex")
});

static PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)\s*:\s*((?:\*\s*(?:const|mut)\s+)+)(?:::)?(?:\w+::)*(\w+)$")
        .expect("valid parameter regex")
});

static POINTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\s*(const|mut)").expect("valid pointer regex"));

fn parse_param(function: &str, text: &str) -> Result<RustParam, ParseError> {
    let caps = PARAM.captures(text).ok_or_else(|| ParseError::Parameter {
        function: function.to_string(),
        text: text.to_string(),
    })?;
    let scalar = Scalar::from_c_name(&caps[3]).ok_or_else(|| ParseError::UnknownType {
        function: function.to_string(),
        ty: caps[3].to_string(),
    })?;
    let pointers: Vec<&str> = POINTER
        .captures_iter(&caps[2])
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    let access = match pointers.first() {
        Some(&"const") => Access::ReadOnly,
        _ => Access::ReadWrite,
    };
    Ok(RustParam {
        name: caps[1].to_string(),
        scalar,
        depth: pointers.len() as u8,
        access,
    })
}

/// Extracts the generated functions whose parameters are all `idx_t`/`real_t`
/// pointers.
///
/// Functions of other shapes (e.g. `METIS_Free(ptr: *mut c_void)`) are
/// skipped, since only the reclassified entry points are compared; a
/// malformed entry point therefore surfaces as a missing binding.
pub fn parse_bindings(text: &str) -> Vec<RustFn> {
    let mut out = Vec::new();
    for caps in FN.captures_iter(text) {
        let name = caps[1].to_string();
        let parsed: Result<Vec<_>, _> = caps[2]
            .split(',')
            .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|p| !p.is_empty())
            .map(|p| parse_param(&name, &p))
            .collect();
        match parsed {
            Ok(params) => out.push(RustFn { name, params }),
            Err(e) => log::trace!("skipping binding {name}: {e}"),
        }
    }
    out
}
