/// NodeId is an index into the Tree's node vector.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    /// Index in the arena
    pub id: NodeId,

    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,

    /// List of child node IDs
    pub children: Vec<NodeId>,

    /// Cluster id on leaves, empty on merge nodes
    pub name: Option<String>,

    /// Branch length to parent
    pub length: Option<f64>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
