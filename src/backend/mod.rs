//! Seam between the safe builders and whatever executes the partitioning.
//!
//! The builders validate their arguments and hand themselves to a
//! [`Backend`] by shared reference; only the output arrays travel as `&mut`.
//! That split follows the access table in [`crate::access`]: one method per
//! reclassified entry point, read-only parameters behind `&`, read-write ones
//! behind `&mut`.
//!
//! [`Native`] (feature `metis-support`) forwards to libmetis.

#[cfg(feature = "metis-support")]
mod native;

#[cfg(feature = "metis-support")]
pub use native::Native;

use crate::ffi::Idx;
use crate::graph::Graph;
use crate::mesh::{Dual, DualInput, Mesh};
use crate::metis_error::Result;

/// Executes the five reclassified METIS entry points.
///
/// Implementations may assume the builder already checked every array
/// length. Errors coming from libmetis must keep their status code
/// (see [`crate::Status::into_result`]).
pub trait Backend {
    /// `METIS_PartGraphKway`. Fills `part`, returns the edge-cut.
    fn part_graph_kway(&self, graph: &Graph<'_>, part: &mut [Idx]) -> Result<Idx>;

    /// `METIS_PartGraphRecursive`. Fills `part`, returns the edge-cut.
    fn part_graph_recursive(&self, graph: &Graph<'_>, part: &mut [Idx]) -> Result<Idx>;

    /// `METIS_PartMeshDual`. Fills `epart`/`npart`, returns the objective.
    fn part_mesh_dual(&self, mesh: &Mesh<'_>, epart: &mut [Idx], npart: &mut [Idx])
    -> Result<Idx>;

    /// `METIS_PartMeshNodal`. Fills `epart`/`npart`, returns the objective.
    fn part_mesh_nodal(
        &self,
        mesh: &Mesh<'_>,
        epart: &mut [Idx],
        npart: &mut [Idx],
    ) -> Result<Idx>;

    /// `METIS_MeshToDual`.
    fn mesh_to_dual(&self, input: &DualInput<'_>) -> Result<Dual>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn part_graph_kway(&self, graph: &Graph<'_>, part: &mut [Idx]) -> Result<Idx> {
        (**self).part_graph_kway(graph, part)
    }

    fn part_graph_recursive(&self, graph: &Graph<'_>, part: &mut [Idx]) -> Result<Idx> {
        (**self).part_graph_recursive(graph, part)
    }

    fn part_mesh_dual(
        &self,
        mesh: &Mesh<'_>,
        epart: &mut [Idx],
        npart: &mut [Idx],
    ) -> Result<Idx> {
        (**self).part_mesh_dual(mesh, epart, npart)
    }

    fn part_mesh_nodal(
        &self,
        mesh: &Mesh<'_>,
        epart: &mut [Idx],
        npart: &mut [Idx],
    ) -> Result<Idx> {
        (**self).part_mesh_nodal(mesh, epart, npart)
    }

    fn mesh_to_dual(&self, input: &DualInput<'_>) -> Result<Dual> {
        (**self).mesh_to_dual(input)
    }
}
