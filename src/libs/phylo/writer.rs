use super::node::NodeId;
use super::tree::Tree;

/// Serialize the tree to a Newick string (compact format).
///
/// # Example
/// ```
/// use bgcdist::libs::phylo::tree::Tree;
/// use bgcdist::libs::phylo::writer;
/// let mut tree = Tree::new();
/// let root = tree.add_node();
/// tree.set_root(root);
/// tree.get_node_mut(root).unwrap().set_name("P1");
/// assert_eq!(writer::write_newick(&tree), "P1;");
/// ```
pub fn write_newick(tree: &Tree) -> String {
    match tree.get_root() {
        Some(root) => {
            let mut s = String::new();
            push_subtree(tree, root, &mut s);
            s.push(';');
            s
        }
        None => ";".to_string(),
    }
}

fn push_subtree(tree: &Tree, node_id: NodeId, s: &mut String) {
    let Some(node) = tree.get_node(node_id) else {
        return;
    };

    if !node.children.is_empty() {
        s.push('(');
        for (i, &child) in node.children.iter().enumerate() {
            if i > 0 {
                s.push(',');
            }
            push_subtree(tree, child, s);
        }
        s.push(')');
    }

    if let Some(name) = &node.name {
        s.push_str(&quote_label(name));
    }
    if let Some(len) = node.length {
        s.push_str(&format!(":{}", len));
    }
}

// Cluster ids with Newick metacharacters are single-quoted.
fn quote_label(label: &str) -> String {
    let needs_quote = label.chars().any(|c| "(),:;[]' \t\n".contains(c));
    if needs_quote {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
