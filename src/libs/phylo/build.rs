use super::tree::Tree;
use crate::libs::error::{BgcError, Result};
use crate::libs::matrix::DistanceMatrix;
use std::collections::HashMap;

/// Build a tree from a cluster distance matrix using the UPGMA algorithm.
///
/// UPGMA (Unweighted Pair Group Method with Arithmetic Mean) is a simple
/// agglomerative hierarchical clustering method. Every lower-triangle cell
/// must be filled.
pub fn upgma(matrix: &DistanceMatrix) -> Result<Tree> {
    let lower = matrix.lower_triangle()?;
    let names = matrix.names();
    let n = names.len();

    let mut tree = Tree::new();
    if n == 0 {
        return Ok(tree);
    }

    // Active clusters, as tree node ids. Leaves take ids 0..n.
    let mut active_nodes: Vec<usize> = Vec::with_capacity(n);
    let mut node_heights: Vec<f64> = Vec::with_capacity(2 * n);
    let mut cluster_sizes: Vec<usize> = Vec::with_capacity(2 * n);

    for name in names {
        let id = tree.add_node();
        if let Some(node) = tree.get_node_mut(id) {
            node.set_name(name.as_str());
        }
        active_nodes.push(id);
        node_heights.push(0.0);
        cluster_sizes.push(1);
    }

    // Distances between node ids, keyed (smaller, larger)
    let mut dists: HashMap<(usize, usize), f64> = HashMap::new();
    for (i, row) in lower.iter().enumerate() {
        for (j, &d) in row.iter().enumerate().take(i) {
            dists.insert((j, i), d);
        }
    }
    let key = |a: usize, b: usize| (a.min(b), a.max(b));

    while active_nodes.len() > 1 {
        // 1. Closest pair; the first one found wins ties
        let mut min_dist = f64::MAX;
        let mut pair = (0, 1);
        for i in 0..active_nodes.len() {
            for j in (i + 1)..active_nodes.len() {
                if let Some(&d) = dists.get(&key(active_nodes[i], active_nodes[j])) {
                    if d < min_dist {
                        min_dist = d;
                        pair = (i, j);
                    }
                }
            }
        }

        // 2. Merge
        let (idx1, idx2) = pair;
        let id1 = active_nodes[idx1];
        let id2 = active_nodes[idx2];

        let new_node = tree.add_node();
        let height = min_dist / 2.0;
        node_heights.push(height);

        tree.add_child(new_node, id1).map_err(BgcError::Tree)?;
        tree.add_child(new_node, id2).map_err(BgcError::Tree)?;
        for id in [id1, id2] {
            if let Some(node) = tree.get_node_mut(id) {
                node.length = Some(height - node_heights[id]);
            }
        }

        let size1 = cluster_sizes[id1];
        let size2 = cluster_sizes[id2];
        let new_size = size1 + size2;
        cluster_sizes.push(new_size);

        // 3. Size-weighted average distance to the remaining clusters
        let mut new_dists = Vec::with_capacity(active_nodes.len());
        for (k, &other) in active_nodes.iter().enumerate() {
            if k == idx1 || k == idx2 {
                continue;
            }
            let d1 = dists.get(&key(id1, other)).copied().unwrap_or(f64::MAX);
            let d2 = dists.get(&key(id2, other)).copied().unwrap_or(f64::MAX);
            let d_new = (d1 * size1 as f64 + d2 * size2 as f64) / new_size as f64;
            new_dists.push((other, d_new));
        }

        // idx1 < idx2, so remove the later one first
        active_nodes.remove(idx2);
        active_nodes.remove(idx1);

        active_nodes.push(new_node);
        for (other, d) in new_dists {
            dists.insert(key(new_node, other), d);
        }
    }

    if let Some(&root) = active_nodes.first() {
        tree.set_root(root);
    }

    Ok(tree)
}
