use std::hash::Hash;

use ahash::{HashMap, HashSet, HashSetExt};

/// Best known distance per node.
pub type DistanceMap<N, W> = HashMap<N, W>;

/// Tied-optimal immediate predecessors per node, in relaxation order.
/// Sources map to an empty list.
pub type PredecessorMap<N> = HashMap<N, Vec<N>>;

/// Node sequence from a source to the key node.
pub type PathMap<N> = HashMap<N, Vec<N>>;

/// Optional outputs of a multi-source search.
///
/// The maps are only filled when the caller hands them in, distance-only
/// queries pay for neither.
pub struct SearchOutputs<'a, N> {
    pub predecessors: Option<&'a mut PredecessorMap<N>>,
    pub paths: Option<&'a mut PathMap<N>>,
}

impl<'a, N> Default for SearchOutputs<'a, N> {
    fn default() -> Self {
        Self::none()
    }
}

impl<'a, N> SearchOutputs<'a, N> {
    pub fn none() -> Self {
        SearchOutputs {
            predecessors: None,
            paths: None,
        }
    }

    pub fn predecessors(mut self, predecessors: &'a mut PredecessorMap<N>) -> Self {
        self.predecessors = Some(predecessors);
        self
    }

    pub fn paths(mut self, paths: &'a mut PathMap<N>) -> Self {
        self.paths = Some(paths);
        self
    }
}

/// Constructs the path to `target` from predecessor lists.
///
/// Traces back from `target` along the first predecessor of every node
/// until a node without predecessor is reached. Returns `None` if `target`
/// has no entry.
pub fn reconstruct_path<N>(predecessors: &PredecessorMap<N>, target: &N) -> Option<Vec<N>>
where
    N: Clone + Eq + Hash,
{
    let mut current = predecessors.get_key_value(target)?.0;

    let mut vertices = vec![current.clone()];
    let mut visited = HashSet::new();
    visited.insert(current);

    while let Some(predecessor) = predecessors.get(current).and_then(|list| list.first()) {
        // stale lists left behind by pruning must not loop forever
        if !visited.insert(predecessor) {
            break;
        }
        vertices.push(predecessor.clone());
        current = predecessor;
    }

    // Reverse the path to start from the source vertex.
    vertices.reverse();
    Some(vertices)
}

#[cfg(test)]
mod tests {
    use ahash::{HashMap, HashMapExt};

    use super::{reconstruct_path, PredecessorMap};

    #[test]
    fn follows_first_predecessor() {
        let mut predecessors: PredecessorMap<u32> = HashMap::new();
        predecessors.insert(0, vec![]);
        predecessors.insert(1, vec![0]);
        predecessors.insert(2, vec![0]);
        predecessors.insert(3, vec![2, 1]);

        assert_eq!(reconstruct_path(&predecessors, &3), Some(vec![0, 2, 3]));
        assert_eq!(reconstruct_path(&predecessors, &0), Some(vec![0]));
        assert_eq!(reconstruct_path(&predecessors, &9), None);
    }
}
