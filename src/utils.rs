//! Display helpers for assembled trees.

use std::fmt::Display;

use tracing::info;

use crate::node::NodeId;
use crate::tree::Forest;

/// Renders the subtree under `root` as one indented line per node.
///
/// Unknown ids render nothing; depth is shown with ` | ` markers. Uses an
/// explicit stack, so deep trees cannot exhaust the call stack here.
pub fn render_tree<T: Display>(forest: &Forest<T>, root: NodeId) -> String {
    let mut out = String::new();
    // Stack holds (node, depth) pairs
    let mut stack = vec![(root, 0)];

    while let Some((id, depth)) = stack.pop() {
        let Some(node) = forest.get(id) else { continue };

        let indent = " | ".repeat(depth);
        out.push_str(&format!("{}Node {}: {}\n", indent, id, node.value));

        // Add children to the stack in reverse order (so they print in correct order)
        for &child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    out
}

/// Logs the rendered subtree under `root`, one `info` line per node.
pub fn pretty_print_tree<T: Display>(forest: &Forest<T>, root: NodeId) {
    for line in render_tree(forest, root).lines() {
        info!("{}", line);
    }
}
