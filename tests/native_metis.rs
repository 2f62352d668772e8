//! End-to-end runs against the installed libmetis.
#![cfg(feature = "metis-support")]

use metis_shim::audit::check_bindings;
use metis_shim::ffi::BINDINGS_SOURCE;
use metis_shim::option::{Numbering, Seed};
use metis_shim::prelude::*;
use metis_shim::{access::ENTRY_POINTS, mesh_to_dual};
use serial_test::serial;

// 3x5 grid, vertex `r * 5 + c`.
const XADJ: [Idx; 16] = [0, 2, 5, 8, 11, 13, 16, 20, 24, 28, 31, 33, 36, 39, 42, 44];
#[rustfmt::skip]
const ADJNCY: [Idx; 44] = [
    1, 5,
    0, 2, 6,
    1, 3, 7,
    2, 4, 8,
    3, 9,
    0, 6, 10,
    1, 5, 7, 11,
    2, 6, 8, 12,
    3, 7, 9, 13,
    4, 8, 14,
    5, 11,
    6, 10, 12,
    7, 11, 13,
    8, 12, 14,
    9, 13,
];

fn assert_parts(part: &[Idx], nparts: Idx) {
    assert!(part.iter().all(|&p| (0..nparts).contains(&p)), "{part:?}");
}

#[test]
#[serial]
fn grid_recursive_bisection() {
    let mut part = vec![-1; 15];
    let cut = Graph::new(1, 2, &XADJ, &ADJNCY)
        .unwrap()
        .part_recursive(&mut part)
        .unwrap();
    assert_parts(&part, 2);
    assert!(part.contains(&0) && part.contains(&1));
    let csr = CsrGraph::from_raw(XADJ.to_vec(), ADJNCY.to_vec(), None).unwrap();
    assert_eq!(cut, csr.edge_cut(&part).unwrap());
}

#[test]
#[serial]
fn grid_kway_cut_matches_reported_objective() {
    let csr = CsrGraph::from_raw(XADJ.to_vec(), ADJNCY.to_vec(), None).unwrap();
    let mut part = vec![-1; 15];
    let cut = csr
        .setup_partition(3)
        .unwrap()
        .set_option(Seed(7))
        .part_kway(&mut part)
        .unwrap();
    assert_parts(&part, 3);
    assert_eq!(cut, csr.edge_cut(&part).unwrap());
}

#[test]
#[serial]
fn inputs_are_untouched() {
    let xadj = XADJ;
    let adjncy = ADJNCY;
    let vwgt = [1; 15];
    let mut part = vec![0; 15];
    Graph::new(1, 2, &xadj, &adjncy)
        .unwrap()
        .set_vwgt(&vwgt)
        .unwrap()
        .part_kway(&mut part)
        .unwrap();
    assert_eq!(xadj, XADJ);
    assert_eq!(adjncy, ADJNCY);
    assert_eq!(vwgt, [1; 15]);
}

#[test]
#[serial]
fn two_vertices_split_in_two() {
    let mut part = vec![0; 2];
    let cut = Graph::new(1, 2, &[0, 1, 2], &[1, 0])
        .unwrap()
        .part_recursive(&mut part)
        .unwrap();
    assert_eq!(cut, 1);
    assert_ne!(part[0], part[1]);
}

// Two quads sharing the edge 1-4:
//
//   0 -- 1 -- 2
//   |    |    |
//   3 -- 4 -- 5
const EPTR: [Idx; 3] = [0, 4, 8];
const EIND: [Idx; 8] = [0, 1, 4, 3, 1, 2, 5, 4];

#[test]
#[serial]
fn mesh_dual_and_nodal() {
    let mesh = Mesh::new(6, 2, &EPTR, &EIND).unwrap().set_ncommon(2).unwrap();
    let mut epart = vec![-1; 2];
    let mut npart = vec![-1; 6];
    mesh.part_dual(&mut epart, &mut npart).unwrap();
    assert_parts(&epart, 2);
    assert_parts(&npart, 2);

    let mut epart = vec![-1; 2];
    let mut npart = vec![-1; 6];
    mesh.part_nodal(&mut epart, &mut npart).unwrap();
    assert_parts(&epart, 2);
    assert_parts(&npart, 2);
}

#[test]
#[serial]
fn dual_of_two_triangles() {
    // 0 --- 1
    // |   / |
    // 2 --- 3
    let eptr = [0, 3, 6];
    let eind = [0, 1, 2, 1, 3, 2];
    let dual = mesh_to_dual(4, &eptr, &eind, 2, Numbering::C).unwrap();
    assert_eq!(dual.xadj(), &[0, 1, 2]);
    assert_eq!(dual.adjncy(), &[1, 0]);

    let apart = mesh_to_dual(4, &eptr, &eind, 3, Numbering::C).unwrap();
    assert!(apart.adjncy().is_empty());

    let mut part = vec![0; 2];
    dual.setup_partition(2).unwrap().part_recursive(&mut part).unwrap();
    assert_eq!(dual.edge_cut(&part).unwrap(), 1);
}

// The same two quads, 1-based. Statics live in read-only memory, so any
// store libmetis made through them would fault.
static EPTR_F: [Idx; 3] = [1, 5, 9];
static EIND_F: [Idx; 8] = [1, 2, 5, 4, 2, 3, 6, 5];

// 4-cycle 1-2-3-4, 1-based.
static XADJ_F: [Idx; 5] = [1, 3, 5, 7, 9];
static ADJNCY_F: [Idx; 8] = [2, 4, 1, 3, 2, 4, 3, 1];

#[test]
#[serial]
fn fortran_dual_leaves_static_inputs_alone() {
    let dual = mesh_to_dual(6, &EPTR_F, &EIND_F, 2, Numbering::Fortran).unwrap();
    assert_eq!(dual.numflag(), 1);
    assert_eq!(dual.xadj(), &[1, 2, 3]);
    assert_eq!(dual.adjncy(), &[2, 1]);
    assert_eq!(EPTR_F, [1, 5, 9]);
    assert_eq!(EIND_F, [1, 2, 5, 4, 2, 3, 6, 5]);

    let mut part = vec![0; 2];
    dual.setup_partition(2).unwrap().part_recursive(&mut part).unwrap();
    assert!(part.iter().all(|p| (1..=2).contains(p)), "{part:?}");
}

#[test]
#[serial]
fn fortran_graph_from_statics() {
    let mut part = vec![0; 4];
    let cut = Graph::with_numbering(1, 2, &XADJ_F, &ADJNCY_F, Numbering::Fortran)
        .unwrap()
        .part_kway(&mut part)
        .unwrap();
    assert!(part.iter().all(|p| (1..=2).contains(p)), "{part:?}");
    let zero_based: Vec<Idx> = part.iter().map(|p| p - 1).collect();
    let csr = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    assert_eq!(cut, csr.edge_cut(&zero_based).unwrap());
    assert_eq!(XADJ_F, [1, 3, 5, 7, 9]);
    assert_eq!(ADJNCY_F, [2, 4, 1, 3, 2, 4, 3, 1]);
}

#[test]
#[serial]
fn fortran_mesh_nodal_with_node_weights() {
    let vwgt = [1, 2, 1, 1, 2, 1];
    let mut epart = vec![0; 2];
    let mut npart = vec![0; 6];
    Mesh::with_numbering(6, 2, &EPTR_F, &EIND_F, Numbering::Fortran)
        .unwrap()
        .set_vwgt(&vwgt)
        .part_nodal(&mut epart, &mut npart)
        .unwrap();
    assert!(epart.iter().chain(&npart).all(|p| (1..=2).contains(p)));
    assert_eq!(EIND_F, [1, 2, 5, 4, 2, 3, 6, 5]);

    let mut epart = vec![-1; 2];
    let mut npart = vec![-1; 6];
    Mesh::new(6, 2, &EPTR, &EIND)
        .unwrap()
        .set_ncommon(2)
        .unwrap()
        .set_vwgt(&[1, 1])
        .part_dual(&mut epart, &mut npart)
        .unwrap();
    assert_parts(&epart, 2);
}

#[test]
#[serial]
fn generated_bindings_follow_the_table() {
    assert!(check_bindings(&ENTRY_POINTS, BINDINGS_SOURCE).is_empty());
    assert!(!BINDINGS_SOURCE.contains("rs_METIS"));
    assert!(metis_shim::audit::run().unwrap().is_clean());
}
