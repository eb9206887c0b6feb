use super::node::{Node, NodeId};
use super::writer;

/// Arena-backed rooted tree.
#[derive(Debug, Default, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    /// Create a new empty tree
    ///
    /// # Example
    /// ```
    /// use bgcdist::libs::phylo::tree::Tree;
    /// let tree = Tree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node. Returns the new node's ID.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn set_root(&mut self, id: NodeId) {
        if id < self.nodes.len() {
            self.root = Some(id);
        }
    }

    /// Add a child to a parent node.
    ///
    /// # Errors
    /// Returns error if either node is unknown, or the child already has a parent.
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
        if parent_id == child_id {
            return Err("Cannot add node as child of itself".to_string());
        }
        if parent_id >= self.nodes.len() {
            return Err(format!("Parent node {} not found", parent_id));
        }
        if child_id >= self.nodes.len() {
            return Err(format!("Child node {} not found", child_id));
        }
        if let Some(old_parent) = self.nodes[child_id].parent {
            return Err(format!("Node {} already has parent {}", child_id, old_parent));
        }

        self.nodes[child_id].parent = Some(parent_id);
        self.nodes[parent_id].children.push(child_id);
        Ok(())
    }

    /// Names of the leaves, in arena order.
    pub fn get_leaf_names(&self) -> Vec<Option<String>> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.name.clone())
            .collect()
    }

    pub fn to_newick(&self) -> String {
        writer::write_newick(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_basic_ops() {
        // 0(root) -> 1, 2
        let mut tree = Tree::new();
        let n0 = tree.add_node();
        let n1 = tree.add_node();
        let n2 = tree.add_node();
        tree.set_root(n0);

        assert_eq!(tree.add_child(n0, n1), Ok(()));
        assert_eq!(tree.add_child(n0, n2), Ok(()));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get_root(), Some(n0));
        assert_eq!(tree.get_node(n0).unwrap().children, vec![n1, n2]);
        assert_eq!(tree.get_node(n2).unwrap().parent, Some(n0));

        assert!(tree.add_child(n1, n2).is_err());
        assert!(tree.add_child(n1, n1).is_err());
        assert!(tree.add_child(n0, 9).is_err());

        tree.get_node_mut(n1).unwrap().set_name("P1");
        assert_eq!(tree.get_leaf_names(), vec![Some("P1".to_string()), None]);
    }
}
