use crate::node::{fmt_numeric, Node, PlotFn};
use crate::ops::{self, OpTable, Operation};
use crate::program::Program;
use crate::registers::{Registers, KREG_COUNT};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// The incremental tree builder and the engine's whole public boundary.
///
/// Consumes one key event at a time, mutating a partially built tree plus
/// bookkeeping flags. The display layer feeds it operation codes and raw
/// operands and reads back the current result, the rendered expression, and
/// indicator flags. Single-threaded and synchronous: every call runs to
/// completion before the next event arrives.
pub struct Brain {
    ops: Rc<OpTable>,
    regs: Rc<RefCell<Registers>>,
    program: Program,

    tree: Option<Node>,
    pending: Option<Node>,
    awaiting_operands: bool,
    accumulator: f64,
    prev_op: String,

    k_in_needs_index: bool,
    k_out_needs_index: bool,
    implicit_multiplication: bool,
}

impl Default for Brain {
    fn default() -> Self {
        Self::new()
    }
}

impl Brain {
    pub fn new() -> Self {
        Self {
            ops: Rc::new(OpTable::new()),
            regs: Rc::new(RefCell::new(Registers::new())),
            program: Program::default(),
            tree: None,
            pending: None,
            awaiting_operands: false,
            accumulator: 0.0,
            prev_op: String::new(),
            k_in_needs_index: false,
            k_out_needs_index: false,
            implicit_multiplication: false,
        }
    }

    /// Entry point for every function/operator key. The inverse and
    /// degree-mode key states are folded into the code before lookup;
    /// unknown combined codes are no-ops.
    pub fn apply_operation(&mut self, key: &str, inverse: bool, degree_mode: bool) {
        let code = ops::resolve_code(key, inverse, degree_mode);
        debug!("brain.apply_operation: `{key}` resolved to `{code}`");

        let Some(operation) = self.ops.lookup(&code) else {
            debug!("brain.apply_operation: unknown code `{code}`, ignored");
            return;
        };

        match operation {
            Operation::Memory => self.on_memory(&code),
            Operation::Constant(value) => self.on_symbol(key, value),
            Operation::Random(f) => self.on_symbol(key, f()),
            Operation::Equals => self.on_equals(),
            Operation::Unary(_) => self.on_unary(&code),
            Operation::Binary(_) => self.on_binary(&code),
        }

        self.prev_op = code;
    }

    /// Entry point for completed numeric entry. While a K-register request
    /// is outstanding the number selects the register (1-based on the
    /// keypad); out-of-range selections are dropped. Otherwise it becomes
    /// the new accumulator, and plain entry after a finished computation
    /// starts a fresh one.
    pub fn set_operand(&mut self, value: f64) {
        debug!("brain.set_operand: received {value}");

        if self.k_index_needed() {
            let index = value as i64 - 1;
            if (0..KREG_COUNT as i64).contains(&index) {
                let index = index as usize;
                let mut regs = self.regs.borrow_mut();
                if self.k_in_needs_index {
                    regs.set_indexed(index, self.accumulator);
                    self.k_in_needs_index = false;
                } else {
                    self.accumulator = regs.get_indexed(index);
                    self.k_out_needs_index = false;
                }
            } else {
                debug!("brain.set_operand: K index {value} out of range, ignored");
            }
        } else {
            self.accumulator = value;
        }

        if !self.awaiting_operands {
            self.tree = None;
        }
    }

    /// Clears the live tree, pending subtree, accumulator and builder flags.
    /// Registers and the saved program have their own coarser lifecycles and
    /// are left alone.
    pub fn reset(&mut self) {
        debug!("brain.reset");
        self.tree = None;
        self.pending = None;
        self.accumulator = 0.0;
        self.awaiting_operands = false;
        self.prev_op.clear();
        self.k_in_needs_index = false;
        self.k_out_needs_index = false;
        self.implicit_multiplication = false;
    }

    // --- Display-layer status ---

    pub fn current_result(&self) -> f64 {
        self.accumulator
    }

    pub fn rendered_expression(&self) -> String {
        match (&self.tree, &self.pending) {
            (Some(tree), _) => tree.render(&self.ops),
            (None, Some(pending)) => pending.render(&self.ops),
            (None, None) => fmt_numeric(self.accumulator),
        }
    }

    /// True while the most recent operator still needs its right operand.
    pub fn is_awaiting_operand(&self) -> bool {
        self.awaiting_operands
    }

    /// The last resolved operation code; the display layer uses it to pick
    /// formatting.
    pub fn previous_operation(&self) -> &str {
        &self.prev_op
    }

    pub fn indexed_register_flags(&self) -> [bool; KREG_COUNT] {
        self.regs.borrow().k_flags()
    }

    pub fn memory_has_contents(&self) -> bool {
        self.regs.borrow().memory_has_contents()
    }

    /// True while a K-register request is waiting for its index digit.
    pub fn k_index_needed(&self) -> bool {
        self.k_in_needs_index || self.k_out_needs_index
    }

    // --- Register access for the display and plotting collaborators ---

    /// The collaborator sets this when a digit entry directly precedes a
    /// variable key, so the next reference builds an implicit multiply.
    pub fn set_implicit_multiplication(&mut self, on: bool) {
        self.implicit_multiplication = on;
    }

    /// The `setMemory` path of the display layer: a variable letter stores
    /// the accumulator into that register, anything else is routed to
    /// memory/K-register handling.
    pub fn store_memory(&mut self, code: &str) {
        self.handle_memory(code);
    }

    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.regs.borrow_mut().set(name, value);
    }

    pub fn variable(&self, name: &str) -> f64 {
        self.regs.borrow().get(name)
    }

    pub fn clear_k_registers(&mut self) {
        self.regs.borrow_mut().clear_indexed();
    }

    // --- Program slot ---

    pub fn save_program(&mut self) {
        if let Some(tree) = &self.tree {
            debug!("brain.save_program: {}", tree.render(&self.ops));
            self.program.save(tree.clone());
        }
    }

    pub fn clear_program(&mut self) {
        debug!("brain.clear_program");
        self.program.clear();
    }

    pub fn has_saved_program(&self) -> bool {
        self.program.has_saved()
    }

    pub fn saved_program(&self) -> Option<&Node> {
        self.program.saved()
    }

    /// Re-evaluates the saved tree against the current registers, adopting
    /// it as the live tree. Returns the recomputed value, or `None` when
    /// nothing is saved.
    pub fn restore_program(&mut self) -> Option<f64> {
        let saved = self.program.saved()?.clone();
        let value = self.evaluate(&saved);
        debug!("brain.restore_program: {} = {value}", saved.render(&self.ops));
        self.accumulator = value;
        self.tree = Some(saved);
        self.pending = None;
        self.awaiting_operands = false;
        Some(value)
    }

    /// A zero-argument closure over the saved tree that re-reads the
    /// registers on every call; the plotting collaborator mutates one
    /// variable between calls and invokes it once per sample point.
    pub fn plot_closure(&self) -> Option<PlotFn> {
        self.program
            .saved()
            .map(|tree| tree.as_closure(Rc::clone(&self.regs), Rc::clone(&self.ops)))
    }

    /// Variables referenced by the saved tree, first occurrence first.
    pub fn plot_variables(&self) -> Vec<String> {
        self.program
            .saved()
            .map(Node::variables)
            .unwrap_or_default()
    }

    // --- State transitions ---

    fn on_memory(&mut self, code: &str) {
        // A register read must not bind a concrete value into the tree;
        // the reference node re-reads whatever the register holds when the
        // tree is evaluated.
        if code == "MR" || ops::is_variable_code(code) {
            let reference = Node::op(code);
            self.pending = Some(if self.implicit_multiplication {
                debug!("brain.on_memory: implicit multiplication");
                Node::op("×")
                    .with_left(Node::literal(self.accumulator))
                    .with_right(reference)
                    .implicit()
            } else {
                reference
            });

            if !self.awaiting_operands {
                self.tree = None;
            }
            self.awaiting_operands = true;
            self.implicit_multiplication = false;
        } else {
            self.handle_memory(code);
        }
    }

    fn handle_memory(&mut self, code: &str) {
        debug!("brain.handle_memory: {code}");
        let mut regs = self.regs.borrow_mut();

        if ops::is_variable_code(code) {
            regs.set(code, self.accumulator);
            return;
        }

        match code {
            "MR" => self.accumulator = regs.memory(),
            "inv_MR" => regs.set_memory(self.accumulator),
            "M+" => regs.add_memory(self.accumulator),
            "inv_M+" => regs.add_memory(-self.accumulator),
            "K in" => {
                self.k_in_needs_index = true;
                self.k_out_needs_index = false;
            }
            "K out" => {
                self.k_in_needs_index = false;
                self.k_out_needs_index = true;
            }
            _ => {}
        }
    }

    /// Constants and random draws both become symbol nodes carrying the key
    /// glyph and the produced value.
    fn on_symbol(&mut self, key: &str, value: f64) {
        self.accumulator = value;
        self.pending = Some(Node::symbol(key, value));

        // A numeric symbol after a completed computation starts a new one.
        if !self.awaiting_operands {
            self.tree = None;
        }
        self.awaiting_operands = true;
    }

    fn on_equals(&mut self) {
        if let Some(mut root) = self.tree.take() {
            if self.awaiting_operands {
                let operand = self
                    .pending
                    .take()
                    .unwrap_or_else(|| Node::literal(self.accumulator));
                root.attach_right(operand);
            }
            self.accumulator = self.evaluate(&root);
            self.tree = Some(root);
        } else if let Some(node) = self.pending.take() {
            self.accumulator = self.evaluate(&node);
            self.tree = Some(node);
        }
        // With neither tree nor pending subtree, equals repeats the
        // accumulator. Repeated equals with no new input is idempotent.
        self.pending = None;
        self.awaiting_operands = false;
    }

    fn on_unary(&mut self, code: &str) {
        let operand = self
            .pending
            .take()
            .unwrap_or_else(|| Node::literal(self.accumulator));
        let node = Node::op(code).with_left(operand);
        self.accumulator = self.evaluate(&node);

        self.tree = match self.tree.take() {
            None => Some(node),
            Some(mut root) => {
                if self.awaiting_operands {
                    // Becomes the right operand of the operator in progress.
                    root.attach_right(node);
                    Some(root)
                } else {
                    // Postfix application to the whole prior result.
                    Some(Node::op(code).with_left(root))
                }
            }
        };
        self.awaiting_operands = false;
    }

    fn on_binary(&mut self, code: &str) {
        let current = self
            .pending
            .take()
            .unwrap_or_else(|| Node::literal(self.accumulator));

        self.tree = match self.tree.take() {
            None => Some(Node::op(code).with_left(current)),
            Some(mut root) => {
                if self.awaiting_operands {
                    // Fold: complete the old root, then chain it as the left
                    // child of the new operator. Left-associative, no
                    // precedence.
                    root.attach_right(current);
                }
                Some(Node::op(code).with_left(root))
            }
        };
        // A binary operator always wants a right operand next.
        self.awaiting_operands = true;
    }

    fn evaluate(&self, node: &Node) -> f64 {
        match node.evaluate(&self.regs.borrow(), &self.ops) {
            Ok(value) => value,
            // Unreachable when the builder holds its invariant.
            Err(e) => panic!("malformed computation tree: {e}"),
        }
    }
}
