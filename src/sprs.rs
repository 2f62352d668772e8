//! [`Partition`] for adjacency matrices from the [sprs] crate.

use std::ops::Deref;

use ::sprs::CsMatBase;

use crate::csr::Partition;
use crate::ffi::Idx;
use crate::graph::Graph;
use crate::metis_error::Result;

/// Sets up a partition of the graph whose adjacency matrix is `self`. The
/// stored values become the edge weights.
///
/// # Example
///
/// ```
/// # fn main() -> metis_shim::Result<()> {
/// use metis_shim::{Idx, Partition as _};
///
/// //     0 -- 1
/// //     |    |
/// //     3 -- 2
/// let mut a = sprs::TriMatI::new((4, 4));
/// for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
///     a.add_triplet(u, v, 42);
///     a.add_triplet(v, u, 42);
/// }
/// let a: sprs::CsMatI<Idx, Idx> = a.to_csr();
///
/// let graph = a.setup_partition(2)?.set_vwgt(&[2, 2, 1, 1])?;
/// assert_eq!(graph.nvtxs(), 4);
/// assert_eq!(graph.adjwgt(), Some(&[42; 8][..]));
/// # Ok(())
/// # }
/// ```
impl<IptrStorage, IndStorage, DataStorage> Partition
    for CsMatBase<Idx, Idx, IptrStorage, IndStorage, DataStorage, Idx>
where
    IptrStorage: Deref<Target = [Idx]>,
    IndStorage: Deref<Target = [Idx]>,
    DataStorage: Deref<Target = [Idx]>,
{
    fn setup_partition(&self, nparts: Idx) -> Result<Graph<'_>> {
        let (xadj, adjncy, data) = self.view().into_raw_storage();
        Graph::new(1, nparts, xadj, adjncy)?.set_adjwgt(data)
    }
}
