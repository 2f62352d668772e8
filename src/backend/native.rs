//! Backend calling into libmetis through the generated bindings.
//!
//! Read-only arguments go through `as_ptr()`/`&T` and outputs through
//! `as_mut_ptr()`/`&mut T`; the const-correct declarations make that the
//! whole story, with no casts from shared to mutable pointers.
//!
//! Two exceptions come from libmetis itself. Under Fortran numbering it
//! shifts the CSR or mesh arrays to 0-based and back while it runs, and the
//! mesh routines store to the numbering slot of `options`. Those arrays are
//! copied into [`Renumbered`] buffers and `options` into a local array, so
//! the caller's borrows are never written through.

use std::os::raw::c_void;
use std::ptr;
use std::slice;

use super::Backend;
use crate::ffi::bindings as m;
use crate::ffi::Idx;
use crate::graph::Graph;
use crate::mesh::{Dual, DualInput, Mesh};
use crate::metis_error::{Result, Status};
use crate::option::Numbering;

fn opt_ptr<T>(array: Option<&[T]>) -> *const T {
    array.map_or(ptr::null(), <[T]>::as_ptr)
}

/// An input array libmetis renumbers in place under Fortran numbering.
enum Renumbered<'a> {
    Shared(&'a [Idx]),
    Owned(Vec<Idx>),
}

impl<'a> Renumbered<'a> {
    fn new(array: &'a [Idx], numbering: Numbering) -> Renumbered<'a> {
        match numbering {
            Numbering::C => Renumbered::Shared(array),
            Numbering::Fortran => Renumbered::Owned(array.to_vec()),
        }
    }

    /// The copy's pointer comes from `as_mut_ptr`, so libmetis may store
    /// through it.
    fn as_ptr(&mut self) -> *const Idx {
        match self {
            Renumbered::Shared(array) => array.as_ptr(),
            Renumbered::Owned(copy) => copy.as_mut_ptr(),
        }
    }
}

/// An array allocated by libmetis, released with `METIS_Free`.
struct MetisBuf(*mut Idx);

impl Drop for MetisBuf {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: the pointer was returned by METIS_MeshToDual and is
            // released exactly once.
            unsafe {
                m::METIS_Free(self.0 as *mut c_void);
            }
        }
    }
}

impl MetisBuf {
    /// # Safety
    /// The buffer must hold at least `len` initialised elements.
    unsafe fn to_vec(&self, len: usize) -> Vec<Idx> {
        if len == 0 {
            return Vec::new();
        }
        // SAFETY: upheld by the caller.
        unsafe { slice::from_raw_parts(self.0, len) }.to_vec()
    }
}

/// libmetis itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Native;

type PartGraphFn = unsafe extern "C" fn(
    *const Idx,
    *const Idx,
    *const Idx,
    *const Idx,
    *const Idx,
    *const Idx,
    *const Idx,
    *const Idx,
    *const m::real_t,
    *const m::real_t,
    *const Idx,
    *mut Idx,
    *mut Idx,
) -> std::os::raw::c_int;

fn part_graph(name: &str, f: PartGraphFn, graph: &Graph<'_>, part: &mut [Idx]) -> Result<Idx> {
    let nvtxs = graph.nvtxs();
    let ncon = graph.ncon();
    let nparts = graph.nparts();
    let numbering = graph.numbering();
    log::debug!("{name}: nvtxs={nvtxs} ncon={ncon} nparts={nparts} {numbering:?}");

    let mut xadj = Renumbered::new(graph.xadj(), numbering);
    let mut adjncy = Renumbered::new(graph.adjncy(), numbering);
    let mut options = *graph.options();
    let mut edgecut: Idx = 0;
    // SAFETY: array lengths were checked by the Graph builder. Borrowed
    // inputs are only read; the renumbered copies, `options`, `edgecut`
    // and `part` are exclusively owned or borrowed.
    let code = unsafe {
        f(
            &nvtxs,
            &ncon,
            xadj.as_ptr(),
            adjncy.as_ptr(),
            opt_ptr(graph.vwgt()),
            opt_ptr(graph.vsize()),
            opt_ptr(graph.adjwgt()),
            &nparts,
            opt_ptr(graph.tpwgts()),
            opt_ptr(graph.ubvec()),
            options.as_mut_ptr(),
            &mut edgecut,
            part.as_mut_ptr(),
        )
    };
    Status::from_code(code).into_result()?;
    Ok(edgecut)
}

impl Backend for Native {
    fn part_graph_kway(&self, graph: &Graph<'_>, part: &mut [Idx]) -> Result<Idx> {
        part_graph("METIS_PartGraphKway", m::METIS_PartGraphKway, graph, part)
    }

    fn part_graph_recursive(&self, graph: &Graph<'_>, part: &mut [Idx]) -> Result<Idx> {
        part_graph(
            "METIS_PartGraphRecursive",
            m::METIS_PartGraphRecursive,
            graph,
            part,
        )
    }

    fn part_mesh_dual(
        &self,
        mesh: &Mesh<'_>,
        epart: &mut [Idx],
        npart: &mut [Idx],
    ) -> Result<Idx> {
        let (ne, nn, ncommon, nparts) = (mesh.ne(), mesh.nn(), mesh.ncommon(), mesh.nparts());
        log::debug!("METIS_PartMeshDual: ne={ne} nn={nn} ncommon={ncommon} nparts={nparts}");

        let mut eptr = Renumbered::new(mesh.eptr(), mesh.numbering());
        let mut eind = Renumbered::new(mesh.eind(), mesh.numbering());
        let mut options = *mesh.options();
        let mut objval: Idx = 0;
        // SAFETY: lengths checked by the Mesh builder and its partition
        // methods; everything libmetis stores to is owned here or `&mut`.
        let code = unsafe {
            m::METIS_PartMeshDual(
                &ne,
                &nn,
                eptr.as_ptr(),
                eind.as_ptr(),
                opt_ptr(mesh.vwgt()),
                opt_ptr(mesh.vsize()),
                &ncommon,
                &nparts,
                opt_ptr(mesh.tpwgts()),
                options.as_mut_ptr(),
                &mut objval,
                epart.as_mut_ptr(),
                npart.as_mut_ptr(),
            )
        };
        Status::from_code(code).into_result()?;
        Ok(objval)
    }

    fn part_mesh_nodal(
        &self,
        mesh: &Mesh<'_>,
        epart: &mut [Idx],
        npart: &mut [Idx],
    ) -> Result<Idx> {
        let (ne, nn, nparts) = (mesh.ne(), mesh.nn(), mesh.nparts());
        log::debug!("METIS_PartMeshNodal: ne={ne} nn={nn} nparts={nparts}");

        let mut eptr = Renumbered::new(mesh.eptr(), mesh.numbering());
        let mut eind = Renumbered::new(mesh.eind(), mesh.numbering());
        let mut options = *mesh.options();
        let mut objval: Idx = 0;
        // SAFETY: lengths checked by the Mesh builder and its partition
        // methods; everything libmetis stores to is owned here or `&mut`.
        let code = unsafe {
            m::METIS_PartMeshNodal(
                &ne,
                &nn,
                eptr.as_ptr(),
                eind.as_ptr(),
                opt_ptr(mesh.vwgt()),
                opt_ptr(mesh.vsize()),
                &nparts,
                opt_ptr(mesh.tpwgts()),
                options.as_mut_ptr(),
                &mut objval,
                epart.as_mut_ptr(),
                npart.as_mut_ptr(),
            )
        };
        Status::from_code(code).into_result()?;
        Ok(objval)
    }

    fn mesh_to_dual(&self, input: &DualInput<'_>) -> Result<Dual> {
        log::debug!(
            "METIS_MeshToDual: ne={} nn={} ncommon={} numflag={}",
            input.ne,
            input.nn,
            input.ncommon,
            input.numflag
        );

        let numbering = input.numbering();
        let mut eptr = Renumbered::new(input.eptr, numbering);
        let mut eind = Renumbered::new(input.eind, numbering);
        let mut xadj: *mut Idx = ptr::null_mut();
        let mut adjncy: *mut Idx = ptr::null_mut();
        // SAFETY: eptr/eind lengths checked by DualInput::new and copied when
        // libmetis renumbers them; libmetis allocates the outputs and stores
        // them through the double pointers.
        let code = unsafe {
            m::METIS_MeshToDual(
                &input.ne,
                &input.nn,
                eptr.as_ptr(),
                eind.as_ptr(),
                &input.ncommon,
                &input.numflag,
                &mut xadj,
                &mut adjncy,
            )
        };
        let xadj = MetisBuf(xadj);
        let adjncy = MetisBuf(adjncy);
        Status::from_code(code).into_result()?;

        let ne = input.ne as usize;
        // SAFETY: on success xadj holds ne + 1 offsets and adjncy holds
        // xadj[ne] - numflag entries.
        let xadj = unsafe { xadj.to_vec(ne + 1) };
        let nedges = (xadj[ne] - input.numflag) as usize;
        let adjncy = unsafe { adjncy.to_vec(nedges) };
        Dual::from_raw(xadj, adjncy, input.numflag)
    }
}
