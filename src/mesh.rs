//! Mesh partitioning and dual-graph construction.
//!
//! A mesh is given as `eptr`/`eind`: the nodes of element `i` are
//! `eind[eptr[i]..eptr[i + 1]]`. As for [`crate::Graph`], all inputs are
//! borrowed shared; only `epart`/`npart` are exclusive.
//!
//! With Fortran numbering libmetis shifts `eptr`/`eind` to 0-based and back
//! in place, so the native backend hands it private copies on that path.

use crate::backend::Backend;
use crate::ffi::{self, Idx, NOPTIONS, Real};
use crate::graph::{check_csr, check_len, check_positive, numbering_option};
use crate::metis_error::{MetisError, Result};
use crate::option::{self, Numbering, Opt};

fn check_mesh(eptr: &[Idx], eind: &[Idx], nn: Idx, numbering: Numbering) -> Result<Idx> {
    check_csr(("eptr", "eind"), eptr, eind, numbering.flag(), Some(nn))
}

/// Builder for a mesh partition computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<'a> {
    ne: Idx,
    nn: Idx,
    nparts: Idx,
    /// Nodes two elements must share to be adjacent in the dual graph.
    ncommon: Idx,
    eptr: &'a [Idx],
    eind: &'a [Idx],
    /// Required size: `ne` for the dual partitioning, `nn` for the nodal one.
    vwgt: Option<&'a [Idx]>,
    /// Required size: `ne` for the dual partitioning, `nn` for the nodal one.
    vsize: Option<&'a [Idx]>,
    /// Required size: `nparts`.
    tpwgts: Option<&'a [Real]>,
    numbering: Numbering,
    options: [Idx; NOPTIONS],
}

impl<'a> Mesh<'a> {
    /// Creates a mesh of `nn` nodes to be split in `nparts` parts, in C
    /// numbering.
    ///
    /// Fails if `nn` or `nparts` is not strictly positive, if `eptr` is empty,
    /// does not start at 0 or decreases, if `eind.len()` differs from the last
    /// offset, or if `eind` names a node outside `0..nn`.
    pub fn new(nn: Idx, nparts: Idx, eptr: &'a [Idx], eind: &'a [Idx]) -> Result<Mesh<'a>> {
        Mesh::with_numbering(nn, nparts, eptr, eind, Numbering::C)
    }

    /// Like [`Mesh::new`], for arrays in the given numbering. With
    /// [`Numbering::Fortran`] libmetis fills `epart`/`npart` 1-based.
    pub fn with_numbering(
        nn: Idx,
        nparts: Idx,
        eptr: &'a [Idx],
        eind: &'a [Idx],
        numbering: Numbering,
    ) -> Result<Mesh<'a>> {
        check_positive("nn", nn)?;
        check_positive("nparts", nparts)?;
        let ne = check_mesh(eptr, eind, nn, numbering)?;
        log::trace!("mesh: ne={ne} nn={nn} nparts={nparts} {numbering:?}");

        let mut options = option::default_options();
        options[ffi::OPTION_NUMBERING] = numbering_option(numbering);
        Ok(Mesh {
            ne,
            nn,
            nparts,
            ncommon: 1,
            eptr,
            eind,
            vwgt: None,
            vsize: None,
            tpwgts: None,
            numbering,
            options,
        })
    }

    /// Sets how many nodes two elements must share to be dual-adjacent.
    /// Only used by [`Mesh::part_dual`]. Default 1.
    pub fn set_ncommon(mut self, ncommon: Idx) -> Result<Mesh<'a>> {
        check_positive("ncommon", ncommon)?;
        self.ncommon = ncommon;
        Ok(self)
    }

    /// Computational weights of the partitioned graph's vertices: one per
    /// element for [`Mesh::part_dual_with`], one per node for
    /// [`Mesh::part_nodal_with`]. The length is checked by those calls.
    pub fn set_vwgt(mut self, vwgt: &'a [Idx]) -> Mesh<'a> {
        self.vwgt = Some(vwgt);
        self
    }

    /// Communication weights, sized like [`Mesh::set_vwgt`].
    pub fn set_vsize(mut self, vsize: &'a [Idx]) -> Mesh<'a> {
        self.vsize = Some(vsize);
        self
    }

    /// Target weight of each part.
    pub fn set_tpwgts(mut self, tpwgts: &'a [Real]) -> Result<Mesh<'a>> {
        check_len("tpwgts", tpwgts.len(), self.nparts as usize)?;
        self.tpwgts = Some(tpwgts);
        Ok(self)
    }

    /// Replaces the whole options array. The numbering slot keeps following
    /// the numbering the mesh was built with.
    pub fn set_options(mut self, options: &[Idx; NOPTIONS]) -> Mesh<'a> {
        self.options = *options;
        self.options[ffi::OPTION_NUMBERING] = numbering_option(self.numbering);
        self
    }

    pub fn set_option<O: Opt>(mut self, option: O) -> Mesh<'a> {
        option::apply(&mut self.options, option);
        self
    }

    pub fn ne(&self) -> Idx {
        self.ne
    }

    pub fn nn(&self) -> Idx {
        self.nn
    }

    pub fn nparts(&self) -> Idx {
        self.nparts
    }

    pub fn ncommon(&self) -> Idx {
        self.ncommon
    }

    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    pub fn eptr(&self) -> &'a [Idx] {
        self.eptr
    }

    pub fn eind(&self) -> &'a [Idx] {
        self.eind
    }

    pub fn vwgt(&self) -> Option<&'a [Idx]> {
        self.vwgt
    }

    pub fn vsize(&self) -> Option<&'a [Idx]> {
        self.vsize
    }

    pub fn tpwgts(&self) -> Option<&'a [Real]> {
        self.tpwgts
    }

    pub fn options(&self) -> &[Idx; NOPTIONS] {
        &self.options
    }

    /// `vertices` is the vertex count of the graph being partitioned.
    fn check_call(&self, vertices: Idx, epart: &[Idx], npart: &[Idx]) -> Result<()> {
        if let Some(vwgt) = self.vwgt {
            check_len("vwgt", vwgt.len(), vertices as usize)?;
        }
        if let Some(vsize) = self.vsize {
            check_len("vsize", vsize.len(), vertices as usize)?;
        }
        check_len("epart", epart.len(), self.ne as usize)?;
        check_len("npart", npart.len(), self.nn as usize)
    }

    /// Partitions the mesh through its dual graph. Returns the objective value.
    pub fn part_dual_with<B: Backend + ?Sized>(
        &self,
        backend: &B,
        epart: &mut [Idx],
        npart: &mut [Idx],
    ) -> Result<Idx> {
        self.check_call(self.ne, epart, npart)?;
        backend.part_mesh_dual(self, epart, npart)
    }

    /// Partitions the mesh through its nodal graph; `ncommon` is not used.
    /// Returns the objective value.
    pub fn part_nodal_with<B: Backend + ?Sized>(
        &self,
        backend: &B,
        epart: &mut [Idx],
        npart: &mut [Idx],
    ) -> Result<Idx> {
        self.check_call(self.nn, epart, npart)?;
        backend.part_mesh_nodal(self, epart, npart)
    }

    /// Equivalent of `METIS_PartMeshDual`.
    #[cfg(feature = "metis-support")]
    pub fn part_dual(&self, epart: &mut [Idx], npart: &mut [Idx]) -> Result<Idx> {
        self.part_dual_with(&crate::backend::Native, epart, npart)
    }

    /// Equivalent of `METIS_PartMeshNodal`.
    #[cfg(feature = "metis-support")]
    pub fn part_nodal(&self, epart: &mut [Idx], npart: &mut [Idx]) -> Result<Idx> {
        self.part_nodal_with(&crate::backend::Native, epart, npart)
    }
}

/// Validated arguments of `METIS_MeshToDual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualInput<'a> {
    pub ne: Idx,
    pub nn: Idx,
    pub eptr: &'a [Idx],
    pub eind: &'a [Idx],
    pub ncommon: Idx,
    pub numflag: Idx,
}

impl<'a> DualInput<'a> {
    pub fn new(
        nn: Idx,
        eptr: &'a [Idx],
        eind: &'a [Idx],
        ncommon: Idx,
        numbering: Numbering,
    ) -> Result<DualInput<'a>> {
        check_positive("nn", nn)?;
        check_positive("ncommon", ncommon)?;
        let ne = check_mesh(eptr, eind, nn, numbering)?;
        Ok(DualInput {
            ne,
            nn,
            eptr,
            eind,
            ncommon,
            numflag: numbering.flag(),
        })
    }

    /// Any flag other than 0 counts as Fortran, so a backend copies the
    /// arrays rather than lend them out for renumbering.
    pub fn numbering(&self) -> Numbering {
        match self.numflag {
            0 => Numbering::C,
            _ => Numbering::Fortran,
        }
    }
}

/// Dual graph of a mesh, in CSR form. Result of [`mesh_to_dual`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dual {
    xadj: Vec<Idx>,
    adjncy: Vec<Idx>,
    numflag: Idx,
}

impl Dual {
    /// Wraps CSR arrays produced by a backend.
    ///
    /// `xadj` must hold `ne + 1` non-decreasing offsets starting at
    /// `numflag`, and `adjncy` exactly the elements its last offset announces.
    pub fn from_raw(xadj: Vec<Idx>, adjncy: Vec<Idx>, numflag: Idx) -> Result<Dual> {
        let numbering = Numbering::from_flag(numflag).ok_or(MetisError::InvalidNumbering(numflag))?;
        check_csr(("xadj", "adjncy"), &xadj, &adjncy, numbering.flag(), None)?;
        Ok(Dual {
            xadj,
            adjncy,
            numflag,
        })
    }

    /// Adjacency offsets, `ne + 1` entries.
    pub fn xadj(&self) -> &[Idx] {
        &self.xadj
    }

    /// Concatenated neighbour lists.
    pub fn adjncy(&self) -> &[Idx] {
        &self.adjncy
    }

    /// 0 for C numbering, 1 for Fortran numbering.
    pub fn numflag(&self) -> Idx {
        self.numflag
    }

    pub fn numbering(&self) -> Numbering {
        if self.numflag == 0 {
            Numbering::C
        } else {
            Numbering::Fortran
        }
    }

    /// Number of vertices (mesh elements).
    pub fn len(&self) -> usize {
        self.xadj.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbours of element `i`, in the graph's own numbering.
    pub fn neighbors(&self, i: usize) -> &[Idx] {
        let start = (self.xadj[i] - self.numflag) as usize;
        let end = (self.xadj[i + 1] - self.numflag) as usize;
        &self.adjncy[start..end]
    }

    pub fn into_raw(self) -> (Vec<Idx>, Vec<Idx>) {
        (self.xadj, self.adjncy)
    }
}

/// Builds the dual graph of a mesh through `backend`.
///
/// Two elements are adjacent when they share at least `ncommon` nodes.
pub fn mesh_to_dual_with<B: Backend + ?Sized>(
    backend: &B,
    nn: Idx,
    eptr: &[Idx],
    eind: &[Idx],
    ncommon: Idx,
    numbering: Numbering,
) -> Result<Dual> {
    let input = DualInput::new(nn, eptr, eind, ncommon, numbering)?;
    let dual = backend.mesh_to_dual(&input)?;
    check_len("xadj", dual.xadj.len(), eptr.len())?;
    Ok(dual)
}

/// Equivalent of `METIS_MeshToDual`.
#[cfg(feature = "metis-support")]
pub fn mesh_to_dual(
    nn: Idx,
    eptr: &[Idx],
    eind: &[Idx],
    ncommon: Idx,
    numbering: Numbering,
) -> Result<Dual> {
    mesh_to_dual_with(&crate::backend::Native, nn, eptr, eind, ncommon, numbering)
}
