use crate::node::Node;
use crate::ops::is_variable_code;
use std::collections::HashSet;

/// Variable codes referenced by a tree, in left-to-right first-appearance
/// order, de-duplicated by first occurrence.
pub(crate) fn collect_vars(root: &Node) -> Vec<String> {
    fn walk(node: &Node, seen: &mut HashSet<String>, out: &mut Vec<String>) {
        if let Some(code) = node.code.as_deref() {
            if is_variable_code(code) && !seen.contains(code) {
                seen.insert(code.to_string());
                out.push(code.to_string());
            }
        }
        if let Some(left) = &node.left {
            walk(left, seen, out);
        }
        if let Some(right) = &node.right {
            walk(right, seen, out);
        }
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(root, &mut seen, &mut out);
    out
}
