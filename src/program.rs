use crate::node::Node;

/// Holds at most one saved computation tree.
///
/// A saved tree is a formula, not a frozen number: restoring re-evaluates it
/// against whatever the registers hold at that moment. Its lifetime is
/// independent of the live tree — a brain reset leaves it alone.
#[derive(Debug, Default, Clone)]
pub struct Program {
    saved: Option<Node>,
}

impl Program {
    pub fn save(&mut self, tree: Node) {
        self.saved = Some(tree);
    }

    pub fn clear(&mut self) {
        self.saved = None;
    }

    pub fn has_saved(&self) -> bool {
        self.saved.is_some()
    }

    pub fn saved(&self) -> Option<&Node> {
        self.saved.as_ref()
    }
}
