//! Graph partitioning builder.
//!
//! [`Graph`] borrows its CSR arrays and weights *shared*: the wrapper header
//! declares every input of `METIS_PartGraphKway`/`METIS_PartGraphRecursive`
//! `const`, so nothing on the Rust side needs exclusive access except the
//! `part` output.
//!
//! With Fortran numbering libmetis shifts `xadj`/`adjncy` to 0-based and back
//! in place, so the native backend hands it private copies on that path.

use crate::backend::Backend;
use crate::ffi::{self, Idx, NOPTIONS, Real};
use crate::metis_error::{MetisError, Result};
use crate::option::{self, Numbering, Opt};

/// Converts an array length to `Idx`.
pub(crate) fn idx_len(array: &'static str, len: usize) -> Result<Idx> {
    Idx::try_from(len).map_err(|_| MetisError::TooLarge(array))
}

pub(crate) fn check_len(array: &'static str, found: usize, expected: usize) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(MetisError::LengthMismatch {
            array,
            expected,
            found,
        })
    }
}

/// Checks a CSR pair and returns its number of rows.
///
/// `offsets` must start at `numflag`, never decrease and end at
/// `numflag + indices.len()`. Every index must lie in
/// `numflag..numflag + bound`, `bound` defaulting to the number of rows.
pub(crate) fn check_csr(
    (offsets_name, indices_name): (&'static str, &'static str),
    offsets: &[Idx],
    indices: &[Idx],
    numflag: Idx,
    bound: Option<Idx>,
) -> Result<Idx> {
    let (Some(&first), Some(&last)) = (offsets.first(), offsets.last()) else {
        return Err(MetisError::EmptyOffsets(offsets_name));
    };
    let rows = idx_len(offsets_name, offsets.len() - 1)?;
    if first != numflag || offsets.windows(2).any(|w| w[0] > w[1]) {
        return Err(MetisError::MalformedOffsets(offsets_name));
    }
    let expected =
        usize::try_from(last - numflag).map_err(|_| MetisError::TooLarge(offsets_name))?;
    check_len(indices_name, indices.len(), expected)?;

    let lower = numflag;
    let upper = numflag.saturating_add(bound.unwrap_or(rows));
    if let Some(&value) = indices.iter().find(|&&v| v < lower || v >= upper) {
        return Err(MetisError::IndexOutOfRange {
            array: indices_name,
            value,
            lower,
            upper,
        });
    }
    Ok(rows)
}

pub(crate) fn check_positive(name: &'static str, value: Idx) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(MetisError::NonPositive { name, value })
    }
}

/// Builder for a graph partition computation.
///
/// # Example
///
/// ```rust,no_run
/// # fn main() -> metis_shim::Result<()> {
/// use metis_shim::Graph;
///
/// // Two vertices joined by one edge.
/// let xadj = [0, 1, 2];
/// let adjncy = [1, 0];
/// let mut part = [0, 0];
///
/// let graph = Graph::new(1, 2, &xadj, &adjncy)?;
/// # #[cfg(feature = "metis-support")]
/// # {
/// graph.part_recursive(&mut part)?;
///
/// // The two vertices are placed in different parts.
/// assert_ne!(part[0], part[1]);
/// # }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<'a> {
    nvtxs: Idx,
    /// Number of balancing constraints.
    ncon: Idx,
    nparts: Idx,
    xadj: &'a [Idx],
    adjncy: &'a [Idx],
    /// Required size: `ncon * nvtxs`.
    vwgt: Option<&'a [Idx]>,
    /// Required size: `nvtxs`.
    vsize: Option<&'a [Idx]>,
    /// Required size: `adjncy.len()`.
    adjwgt: Option<&'a [Idx]>,
    /// Required size: `ncon * nparts`.
    tpwgts: Option<&'a [Real]>,
    /// Required size: `ncon`.
    ubvec: Option<&'a [Real]>,
    numbering: Numbering,
    options: [Idx; NOPTIONS],
}

/// Value of the numbering slot in the options array.
pub(crate) fn numbering_option(numbering: Numbering) -> Idx {
    match numbering {
        Numbering::C => -1,
        Numbering::Fortran => numbering.flag(),
    }
}

impl<'a> Graph<'a> {
    /// Creates a graph with `ncon` constraints to be split in `nparts` parts,
    /// in C numbering.
    ///
    /// Fails if `ncon` or `nparts` is not strictly positive, if `xadj` is
    /// empty, does not start at 0 or decreases, if `adjncy.len()` differs from
    /// the last offset, or if a neighbour is not a vertex.
    pub fn new(ncon: Idx, nparts: Idx, xadj: &'a [Idx], adjncy: &'a [Idx]) -> Result<Graph<'a>> {
        Graph::with_numbering(ncon, nparts, xadj, adjncy, Numbering::C)
    }

    /// Like [`Graph::new`], for arrays in the given numbering. With
    /// [`Numbering::Fortran`] the offsets start at 1, neighbours are 1-based
    /// and libmetis fills `part` with 1-based part numbers.
    pub fn with_numbering(
        ncon: Idx,
        nparts: Idx,
        xadj: &'a [Idx],
        adjncy: &'a [Idx],
        numbering: Numbering,
    ) -> Result<Graph<'a>> {
        check_positive("ncon", ncon)?;
        check_positive("nparts", nparts)?;
        let nvtxs = check_csr(("xadj", "adjncy"), xadj, adjncy, numbering.flag(), None)?;
        log::trace!(
            "graph: nvtxs={nvtxs} nedges={} ncon={ncon} nparts={nparts} {numbering:?}",
            adjncy.len()
        );

        let mut options = option::default_options();
        options[ffi::OPTION_NUMBERING] = numbering_option(numbering);
        Ok(Graph {
            nvtxs,
            ncon,
            nparts,
            xadj,
            adjncy,
            vwgt: None,
            vsize: None,
            adjwgt: None,
            tpwgts: None,
            ubvec: None,
            numbering,
            options,
        })
    }

    fn per_vertex(&self, times: Idx) -> usize {
        (times as usize) * (self.nvtxs as usize)
    }

    /// Computational weights of the vertices. Default: all equal.
    pub fn set_vwgt(mut self, vwgt: &'a [Idx]) -> Result<Graph<'a>> {
        check_len("vwgt", vwgt.len(), self.per_vertex(self.ncon))?;
        self.vwgt = Some(vwgt);
        Ok(self)
    }

    /// Communication weights of the vertices. Default: all equal.
    pub fn set_vsize(mut self, vsize: &'a [Idx]) -> Result<Graph<'a>> {
        check_len("vsize", vsize.len(), self.per_vertex(1))?;
        self.vsize = Some(vsize);
        Ok(self)
    }

    /// Edge weights. Default: all equal.
    pub fn set_adjwgt(mut self, adjwgt: &'a [Idx]) -> Result<Graph<'a>> {
        check_len("adjwgt", adjwgt.len(), self.adjncy.len())?;
        self.adjwgt = Some(adjwgt);
        Ok(self)
    }

    /// Target weight of each part for each constraint. Default: equal split.
    pub fn set_tpwgts(mut self, tpwgts: &'a [Real]) -> Result<Graph<'a>> {
        check_len(
            "tpwgts",
            tpwgts.len(),
            (self.ncon as usize) * (self.nparts as usize),
        )?;
        self.tpwgts = Some(tpwgts);
        Ok(self)
    }

    /// Load imbalance tolerance per constraint. Default: 1.001 for a single
    /// constraint, 1.01 otherwise.
    pub fn set_ubvec(mut self, ubvec: &'a [Real]) -> Result<Graph<'a>> {
        check_len("ubvec", ubvec.len(), self.ncon as usize)?;
        self.ubvec = Some(ubvec);
        Ok(self)
    }

    /// Replaces the whole options array. The numbering slot keeps following
    /// the numbering the graph was built with.
    pub fn set_options(mut self, options: &[Idx; NOPTIONS]) -> Graph<'a> {
        self.options = *options;
        self.options[ffi::OPTION_NUMBERING] = numbering_option(self.numbering);
        self
    }

    /// Sets one option; see [`crate::option`].
    pub fn set_option<O: Opt>(mut self, option: O) -> Graph<'a> {
        option::apply(&mut self.options, option);
        self
    }

    pub fn nvtxs(&self) -> Idx {
        self.nvtxs
    }

    pub fn ncon(&self) -> Idx {
        self.ncon
    }

    pub fn nparts(&self) -> Idx {
        self.nparts
    }

    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    pub fn xadj(&self) -> &'a [Idx] {
        self.xadj
    }

    pub fn adjncy(&self) -> &'a [Idx] {
        self.adjncy
    }

    pub fn vwgt(&self) -> Option<&'a [Idx]> {
        self.vwgt
    }

    pub fn vsize(&self) -> Option<&'a [Idx]> {
        self.vsize
    }

    pub fn adjwgt(&self) -> Option<&'a [Idx]> {
        self.adjwgt
    }

    pub fn tpwgts(&self) -> Option<&'a [Real]> {
        self.tpwgts
    }

    pub fn ubvec(&self) -> Option<&'a [Real]> {
        self.ubvec
    }

    pub fn options(&self) -> &[Idx; NOPTIONS] {
        &self.options
    }

    fn check_part(&self, part: &[Idx]) -> Result<()> {
        check_len("part", part.len(), self.per_vertex(1))
    }

    /// Multilevel k-way partitioning through `backend`. Returns the edge-cut.
    pub fn part_kway_with<B: Backend + ?Sized>(
        &self,
        backend: &B,
        part: &mut [Idx],
    ) -> Result<Idx> {
        self.check_part(part)?;
        backend.part_graph_kway(self, part)
    }

    /// Multilevel recursive bisection through `backend`. Returns the edge-cut.
    pub fn part_recursive_with<B: Backend + ?Sized>(
        &self,
        backend: &B,
        part: &mut [Idx],
    ) -> Result<Idx> {
        self.check_part(part)?;
        backend.part_graph_recursive(self, part)
    }

    /// Equivalent of `METIS_PartGraphKway`. Returns the edge-cut.
    #[cfg(feature = "metis-support")]
    pub fn part_kway(&self, part: &mut [Idx]) -> Result<Idx> {
        self.part_kway_with(&crate::backend::Native, part)
    }

    /// Equivalent of `METIS_PartGraphRecursive`. Returns the edge-cut.
    #[cfg(feature = "metis-support")]
    pub fn part_recursive(&self, part: &mut [Idx]) -> Result<Idx> {
        self.part_recursive_with(&crate::backend::Native, part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const XADJ: [Idx; 5] = [0, 2, 4, 6, 8];
    const ADJNCY: [Idx; 8] = [1, 3, 0, 2, 1, 3, 0, 2];

    #[test]
    fn new_accepts_square() {
        let g = Graph::new(1, 2, &XADJ, &ADJNCY).unwrap();
        assert_eq!(g.nvtxs(), 4);
        assert!(g.options().iter().all(|&o| o == -1));
    }

    #[test]
    fn new_rejects_bad_counts() {
        assert_eq!(
            Graph::new(0, 2, &XADJ, &ADJNCY).unwrap_err(),
            MetisError::NonPositive { name: "ncon", value: 0 }
        );
        assert_eq!(
            Graph::new(1, -1, &XADJ, &ADJNCY).unwrap_err(),
            MetisError::NonPositive { name: "nparts", value: -1 }
        );
    }

    #[test]
    fn new_rejects_empty_xadj() {
        assert_eq!(
            Graph::new(1, 2, &[], &[]).unwrap_err(),
            MetisError::EmptyOffsets("xadj")
        );
    }

    #[test]
    fn new_rejects_truncated_adjncy() {
        let err = Graph::new(1, 2, &XADJ, &ADJNCY[..7]).unwrap_err();
        assert_eq!(
            err,
            MetisError::LengthMismatch { array: "adjncy", expected: 8, found: 7 }
        );
    }

    #[test]
    fn new_rejects_malformed_csr() {
        assert_eq!(
            Graph::new(1, 2, &[0, 3, 2], &[1, 0]).unwrap_err(),
            MetisError::MalformedOffsets("xadj")
        );
        assert_eq!(
            Graph::new(1, 2, &[1, 2, 3], &[1, 0]).unwrap_err(),
            MetisError::MalformedOffsets("xadj")
        );
        assert_eq!(
            Graph::new(1, 2, &[0, 1, 2], &[1, 2]).unwrap_err(),
            MetisError::IndexOutOfRange {
                array: "adjncy",
                value: 2,
                lower: 0,
                upper: 2
            }
        );
    }

    #[test]
    fn fortran_numbering_is_fixed_at_construction() {
        let xadj: Vec<Idx> = XADJ.iter().map(|o| o + 1).collect();
        let adjncy: Vec<Idx> = ADJNCY.iter().map(|v| v + 1).collect();
        assert!(Graph::new(1, 2, &xadj, &adjncy).is_err());

        let g = Graph::with_numbering(1, 2, &xadj, &adjncy, Numbering::Fortran).unwrap();
        assert_eq!(g.numbering(), Numbering::Fortran);
        assert_eq!(g.options()[ffi::OPTION_NUMBERING], 1);
        // a whole options array cannot switch the numbering back
        let g = g.set_options(&option::default_options());
        assert_eq!(g.options()[ffi::OPTION_NUMBERING], 1);

        let c = Graph::new(1, 2, &XADJ, &ADJNCY)
            .unwrap()
            .set_options(&[1; NOPTIONS]);
        assert_eq!(c.options()[ffi::OPTION_NUMBERING], -1);
    }

    #[test]
    fn setters_check_lengths() {
        let g = Graph::new(2, 3, &XADJ, &ADJNCY).unwrap();
        assert!(g.clone().set_vwgt(&[1; 8]).is_ok());
        assert!(matches!(
            g.clone().set_vwgt(&[1; 4]),
            Err(MetisError::LengthMismatch { array: "vwgt", expected: 8, found: 4 })
        ));
        assert!(g.clone().set_vsize(&[1; 4]).is_ok());
        assert!(g.clone().set_adjwgt(&[1; 8]).is_ok());
        assert!(g.clone().set_adjwgt(&[1; 6]).is_err());
        assert!(g.clone().set_tpwgts(&[1.0 / 3.0; 6]).is_ok());
        assert!(g.clone().set_ubvec(&[1.05; 2]).is_ok());
        assert!(g.set_ubvec(&[1.05; 3]).is_err());
    }

    #[test]
    fn inputs_can_be_shared_between_graphs() {
        // Shared borrows: two builders over the same arrays coexist.
        let a = Graph::new(1, 2, &XADJ, &ADJNCY).unwrap();
        let b = Graph::new(1, 4, &XADJ, &ADJNCY).unwrap();
        assert_eq!(a.xadj().as_ptr(), b.xadj().as_ptr());
    }

    proptest! {
        #[test]
        fn new_accepts_iff_adjncy_matches(
            degrees in proptest::collection::vec(0i32..5, 1..20),
            extra in 0usize..3
        ) {
            let mut xadj = vec![0 as Idx];
            for d in &degrees {
                let last = *xadj.last().unwrap();
                xadj.push(last + *d as Idx);
            }
            let nedges = *xadj.last().unwrap() as usize;
            let adjncy = vec![0 as Idx; nedges + extra];
            let res = Graph::new(1, 2, &xadj, &adjncy);
            prop_assert_eq!(res.is_ok(), extra == 0);
            if let Ok(g) = res {
                prop_assert_eq!(g.nvtxs() as usize, degrees.len());
            }
        }
    }
}
