//! Fine-tuning parameters for the partitioning routines.
//!
//! Every routine takes a `[Idx; NOPTIONS]` array. An entry of `-1` selects
//! the library default; the typed values below write a single entry through
//! [`Opt`].

use crate::ffi::{self, Idx, NOPTIONS};

mod private {
    pub trait Sealed {}
}

/// An options array with every entry set to the library default.
pub const fn default_options() -> [Idx; NOPTIONS] {
    [-1; NOPTIONS]
}

/// A single METIS option.
///
/// See [`crate::Graph::set_option`] and [`crate::Mesh::set_option`].
pub trait Opt: private::Sealed {
    /// Index of the option in the options array.
    const INDEX: usize;

    /// The value stored at [`Opt::INDEX`].
    fn value(self) -> Idx;
}

/// Writes `option` into an options array.
pub fn apply<O: Opt>(options: &mut [Idx; NOPTIONS], option: O) {
    options[O::INDEX] = option.value();
}

/// Partitioning method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PType {
    /// Multilevel recursive bisection.
    Rb,
    /// Multilevel k-way partitioning.
    Kway,
}

impl private::Sealed for PType {}
impl Opt for PType {
    const INDEX: usize = ffi::OPTION_PTYPE;

    fn value(self) -> Idx {
        match self {
            PType::Rb => ffi::PTYPE_RB,
            PType::Kway => ffi::PTYPE_KWAY,
        }
    }
}

/// Objective to minimise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjType {
    /// Edge-cut.
    Cut,
    /// Total communication volume.
    Vol,
}

impl private::Sealed for ObjType {}
impl Opt for ObjType {
    const INDEX: usize = ffi::OPTION_OBJTYPE;

    fn value(self) -> Idx {
        match self {
            ObjType::Cut => ffi::OBJTYPE_CUT,
            ObjType::Vol => ffi::OBJTYPE_VOL,
        }
    }
}

/// Matching scheme used during coarsening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CType {
    /// Random matching.
    Rm,
    /// Sorted heavy-edge matching.
    Shem,
}

impl private::Sealed for CType {}
impl Opt for CType {
    const INDEX: usize = ffi::OPTION_CTYPE;

    fn value(self) -> Idx {
        match self {
            CType::Rm => ffi::CTYPE_RM,
            CType::Shem => ffi::CTYPE_SHEM,
        }
    }
}

/// Algorithm used for the initial partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpType {
    /// Greedy bisection growing.
    Grow,
    /// Random bisection followed by refinement.
    Random,
    /// Separator derived from an edge cut.
    Edge,
    /// Greedy node-based bisection growing.
    Node,
}

impl private::Sealed for IpType {}
impl Opt for IpType {
    const INDEX: usize = ffi::OPTION_IPTYPE;

    fn value(self) -> Idx {
        match self {
            IpType::Grow => ffi::IPTYPE_GROW,
            IpType::Random => ffi::IPTYPE_RANDOM,
            IpType::Edge => ffi::IPTYPE_EDGE,
            IpType::Node => ffi::IPTYPE_NODE,
        }
    }
}

/// Refinement algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RType {
    /// FM-based cut refinement.
    Fm,
    /// Greedy cut and volume refinement.
    Greedy,
    /// Two-sided node FM refinement.
    Sep2Sided,
    /// One-sided node FM refinement.
    Sep1Sided,
}

impl private::Sealed for RType {}
impl Opt for RType {
    const INDEX: usize = ffi::OPTION_RTYPE;

    fn value(self) -> Idx {
        match self {
            RType::Fm => ffi::RTYPE_FM,
            RType::Greedy => ffi::RTYPE_GREEDY,
            RType::Sep2Sided => ffi::RTYPE_SEP2SIDED,
            RType::Sep1Sided => ffi::RTYPE_SEP1SIDED,
        }
    }
}

macro_rules! idx_option {
    ($(#[$doc:meta])* $name:ident => $index:path) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub Idx);

        impl private::Sealed for $name {}
        impl Opt for $name {
            const INDEX: usize = $index;

            fn value(self) -> Idx {
                self.0
            }
        }
    };
}

macro_rules! flag_option {
    ($(#[$doc:meta])* $name:ident => $index:path) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub bool);

        impl private::Sealed for $name {}
        impl Opt for $name {
            const INDEX: usize = $index;

            fn value(self) -> Idx {
                Idx::from(self.0)
            }
        }
    };
}

idx_option!(
    /// Number of partitionings to compute; the best one is kept. Default 1.
    NCuts => ffi::OPTION_NCUTS
);
idx_option!(
    /// Number of separators computed at each nested-dissection level. Default 1.
    NSeps => ffi::OPTION_NSEPS
);
idx_option!(
    /// Refinement iterations per uncoarsening level. Default 10.
    NIter => ffi::OPTION_NITER
);
idx_option!(
    /// Seed of the library's random number generator.
    Seed => ffi::OPTION_SEED
);
idx_option!(
    /// Minimum degree of the vertices ordered last, in tenths of the average
    /// degree. 0 removes nothing.
    PFactor => ffi::OPTION_PFACTOR
);
idx_option!(
    /// Maximum load imbalance as `(1 + x) / 1000`. Defaults to 1 for recursive
    /// bisection and 30 for k-way.
    UFactor => ffi::OPTION_UFACTOR
);

flag_option!(
    /// Minimise the maximum degree of the subdomain graph.
    MinConn => ffi::OPTION_MINCONN
);
flag_option!(
    /// Skip 2-hop matchings when regular matching fails to coarsen enough.
    No2Hop => ffi::OPTION_NO2HOP
);
flag_option!(
    /// Try to produce contiguous parts. Ignored for disconnected graphs.
    Contig => ffi::OPTION_CONTIG
);
flag_option!(
    /// Merge vertices with identical adjacency lists.
    Compress => ffi::OPTION_COMPRESS
);
flag_option!(
    /// Order connected components separately.
    CCOrder => ffi::OPTION_CCORDER
);

/// Numbering scheme of the adjacency or element-node arrays.
///
/// Not an [`Opt`]: it describes the arrays themselves, so it is given when a
/// [`crate::Graph`] or [`crate::Mesh`] is built and validated with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// Numbering starts at 0.
    C,
    /// Numbering starts at 1.
    Fortran,
}

impl Numbering {
    pub const fn flag(self) -> Idx {
        match self {
            Numbering::C => 0,
            Numbering::Fortran => 1,
        }
    }

    pub const fn from_flag(flag: Idx) -> Option<Numbering> {
        match flag {
            0 => Some(Numbering::C),
            1 => Some(Numbering::Fortran),
            _ => None,
        }
    }
}

/// Progress and debugging output printed by libmetis. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DbgLvl {
    /// Diagnostic messages.
    pub info: bool,
    /// Timing analysis.
    pub time: bool,
    /// Coarsening statistics.
    pub coarsen: bool,
    /// Refinement statistics.
    pub refine: bool,
    /// Initial partitioning statistics.
    pub ipart: bool,
    /// Vertex moves during refinement.
    pub move_info: bool,
    /// Vertex separators.
    pub sep_info: bool,
    /// Subdomain connectivity minimisation.
    pub conn_info: bool,
    /// Connected component elimination.
    pub contig_info: bool,
}

impl private::Sealed for DbgLvl {}
impl Opt for DbgLvl {
    const INDEX: usize = ffi::OPTION_DBGLVL;

    fn value(self) -> Idx {
        let bits = [
            self.info,
            self.time,
            self.coarsen,
            self.refine,
            self.ipart,
            self.move_info,
            self.sep_info,
            self.conn_info,
            self.contig_info,
        ];
        bits.iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .fold(0, |acc: Idx, (bit, _)| acc | ((1 as Idx) << bit))
    }
}
