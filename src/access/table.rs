//! Access-mode table for the reclassified METIS entry points.
//!
//! Every pointer parameter of the five partitioning entry points is listed in
//! declaration order together with whether libmetis writes through it. The
//! table is the single source of truth for the rendered wrapper header (and
//! therefore for the bindgen output), so it must stay std-only: `build.rs`
//! pulls this file in with `#[path]`.
//!
//! "Input" holds for C numbering only. With `METIS_OPTION_NUMBERING` set to 1
//! libmetis renumbers `xadj`/`adjncy` and `eptr`/`eind` in place and restores
//! them before returning, and the mesh routines also store to `options`.
//! Callers passing Fortran arrays must hand it memory they own.

/// Scalar type behind a pointer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// `idx_t`
    Idx,
    /// `real_t`
    Real,
}

impl Scalar {
    /// C spelling as used by `metis.h`.
    pub const fn c_name(self) -> &'static str {
        match self {
            Scalar::Idx => "idx_t",
            Scalar::Real => "real_t",
        }
    }

    /// Parses the C spelling back.
    pub fn from_c_name(name: &str) -> Option<Scalar> {
        match name {
            "idx_t" => Some(Scalar::Idx),
            "real_t" => Some(Scalar::Real),
            _ => None,
        }
    }
}

/// Whether the callee may write through a pointer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// The callee only reads; callers may hand out shared borrows.
    ReadOnly,
    /// The callee writes; callers must guarantee exclusive access.
    ReadWrite,
}

impl Access {
    pub const fn as_str(self) -> &'static str {
        match self {
            Access::ReadOnly => "read-only",
            Access::ReadWrite => "read-write",
        }
    }
}

/// What a parameter carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A scalar count or flag passed by pointer (`ne`, `nparts`, `numflag`, ...).
    Size,
    /// An input array (adjacency, mesh connectivity, weights).
    Array,
    /// Target partition weights and imbalance tolerances.
    Tuning,
    /// The `METIS_NOPTIONS` options array.
    Options,
    /// Anything the callee fills in.
    Output,
}

/// One pointer parameter of an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: &'static str,
    pub scalar: Scalar,
    /// Number of `*` in the C declaration.
    pub depth: u8,
    pub role: Role,
    pub access: Access,
}

impl Param {
    const fn input(name: &'static str, scalar: Scalar, role: Role) -> Param {
        Param {
            name,
            scalar,
            depth: 1,
            role,
            access: Access::ReadOnly,
        }
    }

    const fn output(name: &'static str, depth: u8) -> Param {
        Param {
            name,
            scalar: Scalar::Idx,
            depth,
            role: Role::Output,
            access: Access::ReadWrite,
        }
    }

    /// `true` when the callee only reads through this parameter.
    pub const fn is_read_only(&self) -> bool {
        matches!(self.access, Access::ReadOnly)
    }
}

/// A reclassified METIS entry point. All of them return a C `int` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryPoint {
    /// Exported symbol name.
    pub name: &'static str,
    pub params: &'static [Param],
}

impl EntryPoint {
    pub fn param(&self, name: &str) -> Option<&'static Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &'static Param> + '_ {
        self.params.iter().filter(|p| p.is_read_only())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &'static Param> + '_ {
        self.params.iter().filter(|p| !p.is_read_only())
    }
}

/// Prefix given to the upstream declarations while `metis.h` is included.
pub const ALIAS_PREFIX: &str = "rs_";

/// Temporary name of an entry point during inclusion of `metis.h`.
pub fn alias_of(name: &str) -> String {
    format!("{ALIAS_PREFIX}{name}")
}

use Role::{Array, Options, Size, Tuning};
use Scalar::{Idx, Real};

pub const MESH_TO_DUAL: EntryPoint = EntryPoint {
    name: "METIS_MeshToDual",
    params: &[
        Param::input("ne", Idx, Size),
        Param::input("nn", Idx, Size),
        Param::input("eptr", Idx, Array),
        Param::input("eind", Idx, Array),
        Param::input("ncommon", Idx, Size),
        Param::input("numflag", Idx, Size),
        // libmetis allocates both arrays and stores the pointers here
        Param::output("r_xadj", 2),
        Param::output("r_adjncy", 2),
    ],
};

const PART_GRAPH_PARAMS: &[Param] = &[
    Param::input("nvtxs", Idx, Size),
    Param::input("ncon", Idx, Size),
    Param::input("xadj", Idx, Array),
    Param::input("adjncy", Idx, Array),
    Param::input("vwgt", Idx, Array),
    Param::input("vsize", Idx, Array),
    Param::input("adjwgt", Idx, Array),
    Param::input("nparts", Idx, Size),
    Param::input("tpwgts", Real, Tuning),
    Param::input("ubvec", Real, Tuning),
    Param::input("options", Idx, Options),
    Param::output("edgecut", 1),
    Param::output("part", 1),
];

pub const PART_GRAPH_KWAY: EntryPoint = EntryPoint {
    name: "METIS_PartGraphKway",
    params: PART_GRAPH_PARAMS,
};

pub const PART_GRAPH_RECURSIVE: EntryPoint = EntryPoint {
    name: "METIS_PartGraphRecursive",
    params: PART_GRAPH_PARAMS,
};

pub const PART_MESH_DUAL: EntryPoint = EntryPoint {
    name: "METIS_PartMeshDual",
    params: &[
        Param::input("ne", Idx, Size),
        Param::input("nn", Idx, Size),
        Param::input("eptr", Idx, Array),
        Param::input("eind", Idx, Array),
        Param::input("vwgt", Idx, Array),
        Param::input("vsize", Idx, Array),
        Param::input("ncommon", Idx, Size),
        Param::input("nparts", Idx, Size),
        Param::input("tpwgts", Real, Tuning),
        Param::input("options", Idx, Options),
        Param::output("objval", 1),
        Param::output("epart", 1),
        Param::output("npart", 1),
    ],
};

pub const PART_MESH_NODAL: EntryPoint = EntryPoint {
    name: "METIS_PartMeshNodal",
    params: &[
        Param::input("ne", Idx, Size),
        Param::input("nn", Idx, Size),
        Param::input("eptr", Idx, Array),
        Param::input("eind", Idx, Array),
        Param::input("vwgt", Idx, Array),
        Param::input("vsize", Idx, Array),
        Param::input("nparts", Idx, Size),
        Param::input("tpwgts", Real, Tuning),
        Param::input("options", Idx, Options),
        Param::output("objval", 1),
        Param::output("epart", 1),
        Param::output("npart", 1),
    ],
};

/// The five reclassified entry points, in header order.
pub const ENTRY_POINTS: [EntryPoint; 5] = [
    MESH_TO_DUAL,
    PART_GRAPH_KWAY,
    PART_GRAPH_RECURSIVE,
    PART_MESH_DUAL,
    PART_MESH_NODAL,
];
