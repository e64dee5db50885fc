//! Common test utilities shared across integration tests.
//!
//! The oracles here work on plain boolean matrices and never touch the
//! crate's search code, so agreement with them is meaningful.

#![allow(dead_code)]

use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use wordrep::graph::Graph;

/// All vertex pairs `(i, j)`, `i < j`, in row-major order.
pub fn pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// The labeled graph whose edge set is given by the bits of `mask` over [`pairs`].
pub fn labeled_graph(n: usize, mask: u64) -> Graph {
    let edges: Vec<_> = pairs(n)
        .into_iter()
        .enumerate()
        .filter(|&(k, _)| mask >> k & 1 == 1)
        .map(|(_, e)| e)
        .collect();
    Graph::from_edges(n, &edges).unwrap()
}

/// Wheel with a `rim`-cycle on `0..rim` and hub `rim`.
pub fn wheel(rim: usize) -> Graph {
    let mut edges: Vec<_> = (0..rim).map(|v| (v, (v + 1) % rim)).collect();
    edges.extend((0..rim).map(|v| (v, rim)));
    Graph::from_edges(rim + 1, &edges).unwrap()
}

pub fn cycle(n: usize) -> Graph {
    let edges: Vec<_> = (0..n).map(|v| (v, (v + 1) % n)).collect();
    Graph::from_edges(n, &edges).unwrap()
}

pub fn rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// Tries all `3^n` colorings.
pub fn brute_force_3_colorable(graph: &Graph) -> bool {
    let n = graph.order();
    let edges = graph.edges();
    let mut colors = vec![0u8; n];
    loop {
        if edges.iter().all(|&(u, v)| colors[u] != colors[v]) {
            return true;
        }
        // Odometer increment in base 3.
        let mut i = 0;
        loop {
            if i == n {
                return false;
            }
            colors[i] += 1;
            if colors[i] < 3 {
                break;
            }
            colors[i] = 0;
            i += 1;
        }
    }
}

/// Tries all `2^m` orientations and checks each one directly.
pub fn brute_force_semi_transitive(graph: &Graph) -> bool {
    let n = graph.order();
    let edges = graph.edges();
    assert!(edges.len() <= 20, "brute force over {} edges", edges.len());
    (0u32..1 << edges.len()).any(|choice| {
        let mut arc = vec![vec![false; n]; n];
        for (k, &(u, v)) in edges.iter().enumerate() {
            if choice >> k & 1 == 0 {
                arc[u][v] = true;
            } else {
                arc[v][u] = true;
            }
        }
        is_acyclic(&arc) && !has_shortcut(&arc)
    })
}

fn is_acyclic(arc: &[Vec<bool>]) -> bool {
    let n = arc.len();
    let mut indegree: Vec<usize> = (0..n)
        .map(|v| (0..n).filter(|&u| arc[u][v]).count())
        .collect();
    let mut ready: Vec<usize> = (0..n).filter(|&v| indegree[v] == 0).collect();
    let mut seen = 0;
    while let Some(u) = ready.pop() {
        seen += 1;
        for v in 0..n {
            if arc[u][v] {
                indegree[v] -= 1;
                if indegree[v] == 0 {
                    ready.push(v);
                }
            }
        }
    }
    seen == n
}

fn has_shortcut(arc: &[Vec<bool>]) -> bool {
    let n = arc.len();
    let mut path = Vec::with_capacity(n);
    (0..n).any(|start| {
        path.clear();
        path.push(start);
        extend_path(arc, &mut path)
    })
}

fn extend_path(arc: &[Vec<bool>], path: &mut Vec<usize>) -> bool {
    let last = path[path.len() - 1];
    for next in 0..arc.len() {
        if !arc[last][next] || path.contains(&next) {
            continue;
        }
        path.push(next);
        let found = (path.len() >= 4 && arc[path[0]][next] && !closed(arc, path))
            || extend_path(arc, path);
        path.pop();
        if found {
            return true;
        }
    }
    false
}

fn closed(arc: &[Vec<bool>], path: &[usize]) -> bool {
    (0..path.len()).all(|i| (i + 1..path.len()).all(|j| arc[path[i]][path[j]]))
}
