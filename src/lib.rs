#![cfg_attr(docsrs, feature(doc_cfg))]
//! # metis-shim
//!
//! Const-correct bindings to the METIS graph and mesh partitioner.
//!
//! `metis.h` declares every pointer parameter mutable, even the ones libmetis
//! only reads, so a straight bindgen run forces `&mut` borrows on inputs.
//! This crate keeps a hand-maintained access-mode table for the five
//! partitioning entry points (`METIS_MeshToDual`, `METIS_PartGraphKway`,
//! `METIS_PartGraphRecursive`, `METIS_PartMeshDual`, `METIS_PartMeshNodal`),
//! renders a wrapper header from it that re-declares them with `const` inputs
//! under their original names, and generates the bindings from that header.
//! The safe builders then borrow inputs shared and only outputs exclusively.
//!
//! ## Features
//! - [`access`]: the access-mode table and the wrapper header renderer
//! - [`audit`]: checks of the table against `metis.h`, the METIS manual,
//!   the rendered header and the generated bindings
//! - [`Graph`] / [`Mesh`] builders, [`mesh_to_dual_with`], [`CsrGraph`]
//! - [`backend::Backend`] seam, with the libmetis [`backend::Native`] backend
//!   behind `metis-support`
//! - [`Partition`] for `sprs` adjacency matrices behind the `sprs` feature
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! metis-shim = { version = "0.1", features = ["metis-support"] }
//! ```
//!
//! With `metis-support`, METIS is located through `pkg-config`, or through
//! `METIS_NO_PKG_CONFIG=1` plus `METIS_DIR` (or `METIS_INCLUDE_DIR` and
//! `METIS_LIB_DIR`). `METIS_STATIC=1` links statically and
//! `METIS_LINK_GKLIB=1` also links a separately installed GKlib.
//!
//! ## Errors
//! libmetis reports failures through an integer status; [`Status`] maps it
//! without loss and [`MetisError`] adds the builders' argument checks.

pub mod access;
pub mod audit;
pub mod backend;
pub mod csr;
pub mod ffi;
pub mod graph;
pub mod mesh;
pub mod metis_error;
pub mod option;
#[cfg(feature = "sprs")]
mod sprs;

pub use csr::{CsrGraph, Partition};
pub use ffi::{Idx, NOPTIONS, Real};
pub use graph::Graph;
#[cfg(feature = "metis-support")]
pub use mesh::mesh_to_dual;
pub use mesh::{mesh_to_dual_with, Dual, DualInput, Mesh};
pub use metis_error::{MetisError, Result, Status};

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::access::{Access, EntryPoint, ENTRY_POINTS};
    pub use crate::backend::Backend;
    #[cfg(feature = "metis-support")]
    pub use crate::backend::Native;
    pub use crate::csr::{CsrGraph, Partition};
    pub use crate::ffi::{Idx, Real, NOPTIONS};
    pub use crate::graph::Graph;
    pub use crate::mesh::{Dual, Mesh};
    pub use crate::metis_error::{MetisError, Result, Status};
    pub use crate::option::Opt;
}
