//! C prototypes: parser plus the upstream reference declarations.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ParseError;
use crate::access::Scalar;

/// The five entry points as declared by `metis.h` 5.1.0, without any `const`.
pub const UPSTREAM_PROTOTYPES: &str = r#"
METIS_API(int) METIS_PartGraphRecursive(idx_t *nvtxs, idx_t *ncon, idx_t *xadj,
                  idx_t *adjncy, idx_t *vwgt, idx_t *vsize, idx_t *adjwgt,
                  idx_t *nparts, real_t *tpwgts, real_t *ubvec, idx_t *options,
                  idx_t *edgecut, idx_t *part);

METIS_API(int) METIS_PartGraphKway(idx_t *nvtxs, idx_t *ncon, idx_t *xadj,
                  idx_t *adjncy, idx_t *vwgt, idx_t *vsize, idx_t *adjwgt,
                  idx_t *nparts, real_t *tpwgts, real_t *ubvec, idx_t *options,
                  idx_t *edgecut, idx_t *part);

METIS_API(int) METIS_MeshToDual(idx_t *ne, idx_t *nn, idx_t *eptr, idx_t *eind,
                  idx_t *ncommon, idx_t *numflag, idx_t **r_xadj, idx_t **r_adjncy);

METIS_API(int) METIS_PartMeshNodal(idx_t *ne, idx_t *nn, idx_t *eptr, idx_t *eind,
                  idx_t *vwgt, idx_t *vsize, idx_t *nparts, real_t *tpwgts,
                  idx_t *options, idx_t *objval, idx_t *epart, idx_t *npart);

METIS_API(int) METIS_PartMeshDual(idx_t *ne, idx_t *nn, idx_t *eptr, idx_t *eind,
                  idx_t *vwgt, idx_t *vsize, idx_t *ncommon, idx_t *nparts,
                  real_t *tpwgts, idx_t *options, idx_t *objval, idx_t *epart,
                  idx_t *npart);
"#;

/// Parameters the METIS 5.1 manual lists as outputs, per entry point.
/// Everything else is documented as input.
pub const DOCUMENTED_OUTPUTS: &[(&str, &[&str])] = &[
    ("METIS_MeshToDual", &["r_xadj", "r_adjncy"]),
    ("METIS_PartGraphKway", &["edgecut", "part"]),
    ("METIS_PartGraphRecursive", &["edgecut", "part"]),
    ("METIS_PartMeshDual", &["objval", "epart", "npart"]),
    ("METIS_PartMeshNodal", &["objval", "epart", "npart"]),
];

/// One parameter of a C prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CParam {
    pub name: String,
    pub scalar: Scalar,
    pub depth: u8,
    /// Leading `const`, i.e. a pointer to const data.
    pub is_const: bool,
}

/// A `METIS_API(int)` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<CParam>,
}

static DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"METIS_API\(int\)\s*(\w+)\s*\(([^)]*)\)\s*;").expect("valid declaration regex")
});

static PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(const\s+)?(\w+)\s*(\*+)\s*(\w+)$").expect("valid parameter regex")
});

pub fn parse_param(function: &str, text: &str) -> Result<CParam, ParseError> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let caps = PARAM.captures(&text).ok_or_else(|| ParseError::Parameter {
        function: function.to_string(),
        text: text.clone(),
    })?;
    let scalar = Scalar::from_c_name(&caps[2]).ok_or_else(|| ParseError::UnknownType {
        function: function.to_string(),
        ty: caps[2].to_string(),
    })?;
    Ok(CParam {
        name: caps[4].to_string(),
        scalar,
        depth: caps[3].len() as u8,
        is_const: caps.get(1).is_some(),
    })
}

/// Extracts every `METIS_API(int)` declaration from `text`, in order.
pub fn parse_prototypes(text: &str) -> Result<Vec<Prototype>, ParseError> {
    DECL.captures_iter(text)
        .map(|caps| {
            let name = caps[1].to_string();
            let params = caps[2]
                .split(',')
                .map(|p| parse_param(&name, p))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Prototype { name, params })
        })
        .collect()
}
