use rand::{Rng, seq::SliceRandom};

use crate::{
    error::Result,
    maze::{Coord, Maze},
    step::{Recorder, Step},
};

/// Disjoint sets over cell indices, with path compression and union by rank.
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub(crate) fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub(crate) fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Point every node on the walked chain directly at the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets of `x` and `y`. Returns `false` if they were already joined.
    pub(crate) fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

/// Wall edge between two adjacent cells
#[derive(Clone, Copy)]
struct Edge {
    cell1: Coord,
    cell2: Coord,
}

pub fn randomized_kruskal<R: Rng + ?Sized>(
    maze: &mut Maze,
    rng: &mut R,
    recorder: &mut Recorder,
) -> Result<()> {
    let rows = maze.rows();
    let cols = maze.cols();

    maze.set_all_walls();
    recorder.record(Step::Fill { walled: true })?;

    let mut uf = UnionFind::new(rows * cols);

    // Collect all possible edges (walls between adjacent cells)
    let mut edges: Vec<Edge> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .flat_map(|(row, col)| {
            [
                (col + 1 < cols).then(|| Edge {
                    cell1: (row, col),
                    cell2: (row, col + 1),
                }),
                (row + 1 < rows).then(|| Edge {
                    cell1: (row, col),
                    cell2: (row + 1, col),
                }),
            ]
        })
        .flatten()
        .collect();

    // Fisher-Yates shuffle of the edge list
    edges.shuffle(rng);

    for edge in edges {
        let idx1 = maze.grid().ravel_index(edge.cell1);
        let idx2 = maze.grid().ravel_index(edge.cell2);

        // If cells are not yet connected, remove the wall between them
        if uf.unite(idx1, idx2) {
            maze.remove_wall(edge.cell1, edge.cell2);
            recorder.record(Step::Carve(edge.cell1, edge.cell2))?;
        }
    }

    maze.clear_visited_flags();
    Ok(())
}
