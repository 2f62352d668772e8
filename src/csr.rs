//! Owned CSR graphs and the [`Partition`] convenience trait.
//
// Built from an edge list, a `CsrGraph` is *symmetrised* (i↔j appear in both
// lists) and *self-free* (no loops), which is what libmetis expects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ffi::Idx;
use crate::graph::{check_csr, check_len, idx_len, Graph};
use crate::mesh::Dual;
use crate::metis_error::{MetisError, Result};

/// Something that can set up a [`Graph`] partition over its own arrays.
///
/// # Example
///
/// ```rust
/// # fn main() -> metis_shim::Result<()> {
/// use metis_shim::{CsrGraph, Partition as _};
///
/// //     0 -- 1
/// //     |    |
/// //     3 -- 2
/// let square =
///     CsrGraph::from_weighted_edges(4, &[(0, 1, 42), (1, 2, 42), (2, 3, 42), (3, 0, 42)])?;
/// let graph = square.setup_partition(2)?.set_vwgt(&[2, 2, 1, 1])?;
/// assert_eq!(graph.nvtxs(), 4);
/// # Ok(())
/// # }
/// ```
pub trait Partition {
    /// A single-constraint [`Graph`] to be split into `nparts` parts.
    fn setup_partition(&self, nparts: Idx) -> Result<Graph<'_>>;
}

/// Owned compressed-sparse-row graph, 0-based.
///
/// Deserialisation goes through [`CsrGraph::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCsr")]
pub struct CsrGraph {
    xadj: Vec<Idx>,
    adjncy: Vec<Idx>,
    adjwgt: Option<Vec<Idx>>,
}

#[derive(Deserialize)]
struct RawCsr {
    xadj: Vec<Idx>,
    adjncy: Vec<Idx>,
    adjwgt: Option<Vec<Idx>>,
}

impl TryFrom<RawCsr> for CsrGraph {
    type Error = MetisError;

    fn try_from(raw: RawCsr) -> Result<Self> {
        CsrGraph::from_raw(raw.xadj, raw.adjncy, raw.adjwgt)
    }
}

impl CsrGraph {
    /// Wraps existing CSR arrays after checking their shape: offsets start
    /// at 0 and never decrease, and every neighbour is a vertex.
    pub fn from_raw(xadj: Vec<Idx>, adjncy: Vec<Idx>, adjwgt: Option<Vec<Idx>>) -> Result<Self> {
        check_csr(("xadj", "adjncy"), &xadj, &adjncy, 0, None)?;
        if let Some(w) = &adjwgt {
            check_len("adjwgt", w.len(), adjncy.len())?;
        }
        Ok(CsrGraph {
            xadj,
            adjncy,
            adjwgt,
        })
    }

    /// Unweighted graph on `n` vertices from undirected edges.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let weighted: Vec<_> = edges.iter().map(|&(u, v)| (u, v, 1)).collect();
        let mut g = Self::from_weighted_edges(n, &weighted)?;
        g.adjwgt = None;
        Ok(g)
    }

    /// Weighted graph on `n` vertices. Loops are dropped and weights of
    /// duplicate edges are summed.
    pub fn from_weighted_edges(n: usize, edges: &[(usize, usize, Idx)]) -> Result<Self> {
        let mut adj: Vec<BTreeMap<usize, Idx>> = vec![BTreeMap::new(); n];
        for &(u, v, w) in edges {
            if u >= n || v >= n {
                return Err(MetisError::LengthMismatch {
                    array: "edges",
                    expected: n,
                    found: u.max(v) + 1,
                });
            }
            if u == v {
                continue;
            }
            *adj[u].entry(v).or_insert(0) += w;
            *adj[v].entry(u).or_insert(0) += w;
        }

        let mut xadj = Vec::with_capacity(n + 1);
        let mut adjncy = Vec::new();
        let mut adjwgt = Vec::new();
        xadj.push(0);
        for nbrs in &adj {
            for (&v, &w) in nbrs {
                adjncy.push(idx_len("adjncy", v)?);
                adjwgt.push(w);
            }
            xadj.push(idx_len("adjncy", adjncy.len())?);
        }
        Ok(CsrGraph {
            xadj,
            adjncy,
            adjwgt: Some(adjwgt),
        })
    }

    pub fn xadj(&self) -> &[Idx] {
        &self.xadj
    }

    pub fn adjncy(&self) -> &[Idx] {
        &self.adjncy
    }

    pub fn adjwgt(&self) -> Option<&[Idx]> {
        self.adjwgt.as_deref()
    }

    pub fn num_vertices(&self) -> usize {
        self.xadj.len() - 1
    }

    pub fn num_edges(&self) -> usize {
        self.adjncy.len() / 2
    }

    /// Total weight of edges whose endpoints lie in different parts.
    pub fn edge_cut(&self, part: &[Idx]) -> Result<Idx> {
        check_len("part", part.len(), self.num_vertices())?;
        Ok(csr_edge_cut(&self.xadj, &self.adjncy, self.adjwgt(), 0, part))
    }
}

fn csr_edge_cut(
    xadj: &[Idx],
    adjncy: &[Idx],
    adjwgt: Option<&[Idx]>,
    numflag: Idx,
    part: &[Idx],
) -> Idx {
    let mut cut = 0;
    for u in 0..part.len() {
        let start = (xadj[u] - numflag) as usize;
        let end = (xadj[u + 1] - numflag) as usize;
        for e in start..end {
            let v = (adjncy[e] - numflag) as usize;
            if part[u] != part[v] {
                cut += adjwgt.map_or(1, |w| w[e]);
            }
        }
    }
    // each undirected edge was counted from both ends
    cut / 2
}

impl Partition for CsrGraph {
    fn setup_partition(&self, nparts: Idx) -> Result<Graph<'_>> {
        let graph = Graph::new(1, nparts, &self.xadj, &self.adjncy)?;
        match &self.adjwgt {
            Some(w) => graph.set_adjwgt(w),
            None => Ok(graph),
        }
    }
}

/// The graph keeps the dual's numbering.
impl Partition for Dual {
    fn setup_partition(&self, nparts: Idx) -> Result<Graph<'_>> {
        Graph::with_numbering(1, nparts, self.xadj(), self.adjncy(), self.numbering())
    }
}

impl Dual {
    /// Number of dual edges crossing parts.
    pub fn edge_cut(&self, part: &[Idx]) -> Result<Idx> {
        check_len("part", part.len(), self.len())?;
        Ok(csr_edge_cut(
            self.xadj(),
            self.adjncy(),
            None,
            self.numflag(),
            part,
        ))
    }
}
