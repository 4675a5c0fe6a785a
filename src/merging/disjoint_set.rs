//! Union-find over dense indices

/// Disjoint sets over `0..len`, with union by rank and path compression.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Every index starts in its own set.
    pub fn new(len: usize) -> Self {
        DisjointSet {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Root of the set containing `x`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Path compression: point every node on the walk at the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the sets of `a` and `b`. Returns false if they were already one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let a = self.find(a);
        let b = self.find(b);
        if a == b {
            return false;
        }

        match self.rank[a].cmp(&self.rank[b]) {
            std::cmp::Ordering::Less => self.parent[a] = b,
            std::cmp::Ordering::Greater => self.parent[b] = a,
            std::cmp::Ordering::Equal => {
                self.parent[b] = a;
                self.rank[a] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(sets: &mut DisjointSet, a: usize, b: usize) -> bool {
        sets.find(a) == sets.find(b)
    }

    #[test]
    fn test_starts_disjoint() {
        let mut sets = DisjointSet::new(3);
        assert!(!same(&mut sets, 0, 1));
        assert_eq!(sets.find(2), 2);
    }

    #[test]
    fn test_union_is_transitive() {
        let mut sets = DisjointSet::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(sets.union(1, 4));
        assert!(same(&mut sets, 0, 3));
        assert!(!same(&mut sets, 0, 2));
    }

    #[test]
    fn test_repeated_union_reports_no_change() {
        let mut sets = DisjointSet::new(2);
        assert!(sets.union(0, 1));
        assert!(!sets.union(1, 0));
    }

    #[test]
    fn test_long_chain_compresses() {
        let mut sets = DisjointSet::new(100);
        for i in 1..100 {
            sets.union(i - 1, i);
        }
        let root = sets.find(99);
        assert!((0..100).all(|i| sets.find(i) == root));
    }
}
