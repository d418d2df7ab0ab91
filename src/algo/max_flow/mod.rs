/*!
# Maximum Flow

Flow algorithms work on a mutable graph that is temporarily extended and restored
afterwards:

- [`GraphAugmentor`] adds a super source and a super sink (created by a vertex factory) and
  connects them to the actual sources and sinks, chosen by an [`AugmentationPlan`]:
  - [`MultiSourceSinkGraphAugmentor`]: every vertex without in-edges is a source and every
    vertex without out-edges is a sink
  - [`BipartiteToMaximumFlowGraphAugmentor`]: explicit source and sink lists
- [`ReversedEdgeAugmentor`] pairs every edge with a reversed edge, adding the missing ones
- [`EdmondsKarpMaximumFlow`] computes a maximum flow with BFS augmenting paths over the
  residual capacities of these pairs
- [`MaximumBipartiteMatching`] chains all of the above and always rolls the graph back

Everything that is added is recorded and removed again by the corresponding rollback, so the
graph ends up with the same vertices and edges it started with.
*/

mod augmentor;
mod edmonds_karp;
mod matching;
mod reversed_edges;

pub use augmentor::*;
pub use edmonds_karp::*;
pub use matching::*;
pub use reversed_edges::*;
