//! Audit of the access-mode table.
//!
//! The table in [`crate::access`] is maintained by hand, so it is checked
//! against three independent sources:
//!
//! * the upstream `metis.h` prototypes — argument count, order, names, scalar
//!   types and pointer depth must be unchanged ([`check_signatures`]);
//! * the outputs documented in the METIS manual — exactly those parameters
//!   may be read-write ([`check_documented`]);
//! * the artifacts produced from the table — the rendered wrapper header must
//!   retire every alias and declare the real names with matching `const`
//!   ([`check_header`]), and bindgen's output must carry matching pointer
//!   mutability with no alias leaking through ([`check_bindings`]).

pub mod bindings;
pub mod prototype;

use std::fmt;

use hashbrown::{HashMap, HashSet};
use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;
use thiserror::Error;

use crate::access::{self, header::UPSTREAM_INCLUDE, Access, EntryPoint, ALIAS_PREFIX};

pub use bindings::{parse_bindings, RustFn, RustParam};
pub use prototype::{
    parse_prototypes, CParam, Prototype, DOCUMENTED_OUTPUTS, UPSTREAM_PROTOTYPES,
};

/// Failure to parse a declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("cannot parse parameter `{text}` of {function}")]
    Parameter { function: String, text: String },
    #[error("unknown type `{ty}` in {function}")]
    UnknownType { function: String, ty: String },
}

/// A discrepancy found by the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// The reference source has no declaration for this entry point.
    MissingDeclaration { function: String, source: &'static str },
    /// Parameter counts differ.
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
    /// Name, scalar type or pointer depth differs at `position`.
    ParamMismatch {
        function: String,
        position: usize,
        expected: String,
        found: String,
    },
    /// The table's classification contradicts the documented access.
    Misclassified {
        function: String,
        param: String,
        declared: &'static str,
        documented: &'static str,
    },
    /// A generated declaration disagrees with the table's classification.
    QualifierMismatch {
        function: String,
        param: String,
        declared: &'static str,
        generated: &'static str,
        source: &'static str,
    },
    /// A temporary alias is not set up before `metis.h` or not retired
    /// after it.
    AliasProtocol { function: String, detail: String },
    /// A declaration still carries the temporary alias name.
    AliasLeaked { symbol: String, source: &'static str },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingDeclaration { function, source } => {
                write!(f, "{function}: no declaration in {source}")
            }
            Finding::ArityMismatch {
                function,
                expected,
                found,
            } => write!(f, "{function}: expected {expected} parameters, found {found}"),
            Finding::ParamMismatch {
                function,
                position,
                expected,
                found,
            } => write!(
                f,
                "{function}: parameter {position} is `{found}`, expected `{expected}`"
            ),
            Finding::Misclassified {
                function,
                param,
                declared,
                documented,
            } => write!(
                f,
                "{function}::{param} is classified {declared} but documented {documented}"
            ),
            Finding::QualifierMismatch {
                function,
                param,
                declared,
                generated,
                source,
            } => write!(
                f,
                "{function}::{param} is {declared} in the table but {generated} in {source}"
            ),
            Finding::AliasProtocol { function, detail } => write!(f, "{function}: {detail}"),
            Finding::AliasLeaked { symbol, source } => {
                write!(f, "alias `{symbol}` leaked into {source}")
            }
        }
    }
}

/// Outcome of an audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Emits one warning per finding.
    pub fn log(&self) {
        for finding in &self.findings {
            log::warn!("access audit: {finding}");
        }
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "access audit: clean");
        }
        writeln!(f, "access audit: {} finding(s)", self.findings.len())?;
        for finding in &self.findings {
            writeln!(f, "  - {finding}")?;
        }
        Ok(())
    }
}

fn describe(name: &str, scalar: access::Scalar, depth: u8) -> String {
    format!("{} {}{}", scalar.c_name(), "*".repeat(depth as usize), name)
}

fn qualifier(is_const: bool) -> &'static str {
    if is_const {
        Access::ReadOnly.as_str()
    } else {
        Access::ReadWrite.as_str()
    }
}

/// Compares the table against `upstream` prototypes, ignoring `const`.
pub fn check_signatures(entries: &[EntryPoint], upstream: &[Prototype]) -> Vec<Finding> {
    let by_name: HashMap<&str, &Prototype> =
        upstream.iter().map(|p| (p.name.as_str(), p)).collect();
    let mut findings = Vec::new();

    for entry in entries {
        let Some(proto) = by_name.get(entry.name) else {
            findings.push(Finding::MissingDeclaration {
                function: entry.name.to_string(),
                source: "metis.h",
            });
            continue;
        };
        if entry.params.len() != proto.params.len() {
            findings.push(Finding::ArityMismatch {
                function: entry.name.to_string(),
                expected: proto.params.len(),
                found: entry.params.len(),
            });
        }
        for (position, pair) in entry.params.iter().zip_longest(&proto.params).enumerate() {
            let (found, expected) = match pair {
                EitherOrBoth::Both(ours, theirs) => (
                    describe(ours.name, ours.scalar, ours.depth),
                    describe(&theirs.name, theirs.scalar, theirs.depth),
                ),
                EitherOrBoth::Left(ours) => (
                    describe(ours.name, ours.scalar, ours.depth),
                    "(none)".to_string(),
                ),
                EitherOrBoth::Right(theirs) => (
                    "(none)".to_string(),
                    describe(&theirs.name, theirs.scalar, theirs.depth),
                ),
            };
            if found != expected {
                findings.push(Finding::ParamMismatch {
                    function: entry.name.to_string(),
                    position,
                    expected,
                    found,
                });
            }
        }
    }
    findings
}

/// Compares the table against the manual's documented outputs.
pub fn check_documented(entries: &[EntryPoint], documented: &[(&str, &[&str])]) -> Vec<Finding> {
    let by_name: HashMap<&str, HashSet<&str>> = documented
        .iter()
        .map(|(f, outs)| (*f, outs.iter().copied().collect()))
        .collect();
    let mut findings = Vec::new();

    for entry in entries {
        let Some(outputs) = by_name.get(entry.name) else {
            findings.push(Finding::MissingDeclaration {
                function: entry.name.to_string(),
                source: "METIS manual",
            });
            continue;
        };
        for p in entry.params {
            let documented = if outputs.contains(p.name) {
                Access::ReadWrite
            } else {
                Access::ReadOnly
            };
            if p.access != documented {
                findings.push(Finding::Misclassified {
                    function: entry.name.to_string(),
                    param: p.name.to_string(),
                    declared: p.access.as_str(),
                    documented: documented.as_str(),
                });
            }
        }
    }
    findings
}

/// Checks the rename/alias protocol and the final declarations of a
/// rendered wrapper header.
pub fn check_header(entries: &[EntryPoint], header: &str) -> Result<Vec<Finding>, ParseError> {
    let mut findings = Vec::new();
    let lines: Vec<&str> = header.lines().map(str::trim).collect();
    let line_of = |wanted: &str| lines.iter().position(|l| *l == wanted);
    let include = line_of(UPSTREAM_INCLUDE);

    for entry in entries {
        let function = entry.name.to_string();
        let define = line_of(&format!(
            "#define {} {}",
            entry.name,
            access::alias_of(entry.name)
        ));
        let undef = line_of(&format!("#undef {}", entry.name));
        let detail = match (define, include, undef) {
            (None, _, _) => Some("alias is never defined"),
            (_, None, _) => Some("metis.h is never included"),
            (_, _, None) => Some("alias is never retired"),
            (Some(d), Some(i), _) if d > i => Some("alias defined after metis.h"),
            (_, Some(i), Some(u)) if u < i => Some("alias retired before metis.h"),
            _ => None,
        };
        if let Some(detail) = detail {
            findings.push(Finding::AliasProtocol {
                function,
                detail: detail.to_string(),
            });
        }
    }

    let declared = parse_prototypes(header)?;
    for proto in &declared {
        if proto.name.starts_with(ALIAS_PREFIX) {
            findings.push(Finding::AliasLeaked {
                symbol: proto.name.clone(),
                source: "wrapper header",
            });
        }
    }
    let by_name: HashMap<&str, &Prototype> =
        declared.iter().map(|p| (p.name.as_str(), p)).collect();
    for entry in entries {
        let Some(proto) = by_name.get(entry.name) else {
            findings.push(Finding::MissingDeclaration {
                function: entry.name.to_string(),
                source: "wrapper header",
            });
            continue;
        };
        findings.extend(check_signatures(std::slice::from_ref(entry), &[(*proto).clone()]));
        for (ours, theirs) in entry.params.iter().zip(&proto.params) {
            if ours.is_read_only() != theirs.is_const {
                findings.push(Finding::QualifierMismatch {
                    function: entry.name.to_string(),
                    param: ours.name.to_string(),
                    declared: ours.access.as_str(),
                    generated: qualifier(theirs.is_const),
                    source: "wrapper header",
                });
            }
        }
    }
    Ok(findings)
}

/// Checks bindgen output: every entry point present under its real name, no
/// alias leaked, outer pointer mutability matching the table.
pub fn check_bindings(entries: &[EntryPoint], generated: &str) -> Vec<Finding> {
    let fns = parse_bindings(generated);
    let mut findings: Vec<Finding> = fns
        .iter()
        .filter(|f| f.name.starts_with(ALIAS_PREFIX))
        .map(|f| Finding::AliasLeaked {
            symbol: f.name.clone(),
            source: "generated bindings",
        })
        .collect();
    let by_name: HashMap<&str, &RustFn> = fns.iter().map(|f| (f.name.as_str(), f)).collect();

    for entry in entries {
        let Some(binding) = by_name.get(entry.name) else {
            findings.push(Finding::MissingDeclaration {
                function: entry.name.to_string(),
                source: "generated bindings",
            });
            continue;
        };
        if binding.params.len() != entry.params.len() {
            findings.push(Finding::ArityMismatch {
                function: entry.name.to_string(),
                expected: entry.params.len(),
                found: binding.params.len(),
            });
        }
        for (position, (ours, theirs)) in entry.params.iter().zip(&binding.params).enumerate() {
            let expected = describe(ours.name, ours.scalar, ours.depth);
            let found = describe(&theirs.name, theirs.scalar, theirs.depth);
            if expected != found {
                findings.push(Finding::ParamMismatch {
                    function: entry.name.to_string(),
                    position,
                    expected,
                    found,
                });
            }
            if ours.access != theirs.access {
                findings.push(Finding::QualifierMismatch {
                    function: entry.name.to_string(),
                    param: ours.name.to_string(),
                    declared: ours.access.as_str(),
                    generated: theirs.access.as_str(),
                    source: "generated bindings",
                });
            }
        }
    }
    findings
}

/// Audits `entries` against the upstream prototypes, the documented outputs
/// and `header`.
pub fn audit_table(entries: &[EntryPoint], header: &str) -> Result<AuditReport, ParseError> {
    let upstream = parse_prototypes(UPSTREAM_PROTOTYPES)?;
    let mut report = AuditReport::default();
    report.extend(check_signatures(entries, &upstream));
    report.extend(check_documented(entries, DOCUMENTED_OUTPUTS));
    report.extend(check_header(entries, header)?);
    Ok(report)
}

#[cfg(feature = "metis-support")]
fn generated_bindings() -> Option<&'static str> {
    Some(crate::ffi::BINDINGS_SOURCE)
}

#[cfg(not(feature = "metis-support"))]
fn generated_bindings() -> Option<&'static str> {
    None
}

/// Audits the built-in table and the header the build script rendered, plus
/// the generated bindings when they exist.
pub fn run() -> Result<AuditReport, ParseError> {
    let mut report = audit_table(&access::ENTRY_POINTS, access::WRAPPER_HEADER)?;
    if let Some(generated) = generated_bindings() {
        report.extend(check_bindings(&access::ENTRY_POINTS, generated));
    }
    report.log();
    Ok(report)
}

#[cfg(test)]
mod tests;
