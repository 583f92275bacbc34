use crate::collect::collect_vars;
use crate::error::EvalError;
use crate::ops::{self, OpTable, Operation};
use crate::registers::Registers;
use std::cell::RefCell;
use std::rc::Rc;

/// A re-invocable thunk over a tree: each call re-reads the current register
/// state, so the plotting collaborator can mutate one variable and call the
/// same closure once per sample point.
pub type PlotFn = Box<dyn Fn() -> Option<f64>>;

/// One node of a computation tree: either a literal value, an operation
/// reference, or a symbol carrying both (π, e, Rnd — the value evaluates,
/// the code renders).
///
/// Children are exclusively owned; attaching moves the child in, and the
/// "replace the root" reshapes in the brain take the old root by value and
/// hand back a new owning root. Nothing is ever aliased.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) value: Option<f64>,
    pub(crate) code: Option<String>,
    pub(crate) implicit: bool,
    pub(crate) left: Option<Box<Node>>,
    pub(crate) right: Option<Box<Node>>,
}

impl Node {
    /// A plain literal leaf.
    pub fn literal(value: f64) -> Self {
        Self {
            value: Some(value),
            code: None,
            implicit: false,
            left: None,
            right: None,
        }
    }

    /// An operation node awaiting children.
    pub fn op(code: impl Into<String>) -> Self {
        Self {
            value: None,
            code: Some(code.into()),
            implicit: false,
            left: None,
            right: None,
        }
    }

    /// A symbol node: evaluates to `value`, renders as `code`.
    pub fn symbol(code: impl Into<String>, value: f64) -> Self {
        Self {
            value: Some(value),
            code: Some(code.into()),
            implicit: false,
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, child: Node) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    pub fn with_right(mut self, child: Node) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    /// Marks a binary node as implicit: its glyph is suppressed when
    /// rendering, so `2 × x` prints as `2x`.
    pub fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    /// Attaches (or replaces) the right child of an existing root.
    pub fn attach_right(&mut self, child: Node) {
        self.right = Some(Box::new(child));
    }

    /// Depth-first numeric evaluation against the current register state.
    ///
    /// Value wins over code: symbol nodes return the value they were created
    /// with, so a captured random draw stays stable when the same tree is
    /// evaluated again.
    pub fn evaluate(&self, regs: &Registers, ops: &OpTable) -> Result<f64, EvalError> {
        if let Some(v) = self.value {
            return Ok(v);
        }
        let code = self.code.as_deref().ok_or(EvalError::EmptyNode)?;
        let op = ops
            .lookup(code)
            .ok_or_else(|| EvalError::UnknownOp(code.into()))?;
        match op {
            Operation::Memory => Ok(read_register(code, regs)),
            Operation::Random(f) => Ok(f()),
            Operation::Constant(v) => Ok(v),
            Operation::Unary(f) => {
                let left = self
                    .left
                    .as_ref()
                    .ok_or_else(|| EvalError::MissingLeftOperand(code.into()))?;
                Ok(f(left.evaluate(regs, ops)?))
            }
            Operation::Binary(f) => {
                let left = self
                    .left
                    .as_ref()
                    .ok_or_else(|| EvalError::MissingLeftOperand(code.into()))?;
                let right = self
                    .right
                    .as_ref()
                    .ok_or_else(|| EvalError::MissingRightOperand(code.into()))?;
                Ok(f(left.evaluate(regs, ops)?, right.evaluate(regs, ops)?))
            }
            Operation::Equals => Err(EvalError::Misplaced(code.into())),
        }
    }

    /// Builds a lazy re-invocable closure with the same dispatch as
    /// `evaluate`, but with register reads deferred to call time. The
    /// composition happens once; each call walks only closures. Results are
    /// never cached between calls.
    pub fn as_closure(&self, regs: Rc<RefCell<Registers>>, ops: Rc<OpTable>) -> PlotFn {
        if let Some(v) = self.value {
            return Box::new(move || Some(v));
        }
        let Some(code) = self.code.clone() else {
            return Box::new(|| None);
        };
        match ops.lookup(&code) {
            Some(Operation::Memory) => {
                Box::new(move || Some(read_register(&code, &regs.borrow())))
            }
            Some(Operation::Random(f)) => Box::new(move || Some(f())),
            Some(Operation::Constant(v)) => Box::new(move || Some(v)),
            Some(Operation::Unary(f)) => match self.left.as_deref() {
                Some(child) => {
                    let child = child.as_closure(regs, ops);
                    Box::new(move || child().map(f))
                }
                None => Box::new(|| None),
            },
            Some(Operation::Binary(f)) => match (self.left.as_deref(), self.right.as_deref()) {
                (Some(l), Some(r)) => {
                    let l = l.as_closure(Rc::clone(&regs), Rc::clone(&ops));
                    let r = r.as_closure(regs, ops);
                    Box::new(move || Some(f(l()?, r()?)))
                }
                _ => Box::new(|| None),
            },
            Some(Operation::Equals) | None => Box::new(|| None),
        }
    }

    /// User-facing expression string.
    ///
    /// Code wins over value here — the mirror image of `evaluate` — so symbol
    /// nodes print their glyph, not the number behind it. Unary operators
    /// render `name(operand)` unless the glyph is postfix, in which case
    /// `(operand)name`. Binary operators render glyph-free when implicit.
    pub fn render(&self, ops: &OpTable) -> String {
        if let Some(code) = self.code.as_deref() {
            if let Some(op) = ops.lookup(code) {
                let symbol = ops::display_symbol(code);
                return match op {
                    Operation::Unary(_) => {
                        let operand = self.render_child(&self.left, ops);
                        if ops::is_postfix_symbol(symbol) {
                            format!("({operand}){symbol}")
                        } else {
                            format!("{symbol}({operand})")
                        }
                    }
                    Operation::Binary(_) => {
                        let glyph = if self.implicit { "" } else { symbol };
                        format!(
                            "{}{glyph}{}",
                            self.render_child(&self.left, ops),
                            self.render_child(&self.right, ops)
                        )
                    }
                    _ => symbol.to_string(),
                };
            }
        }
        match self.value {
            Some(v) => fmt_numeric(v),
            None => "Err".to_string(),
        }
    }

    fn render_child(&self, child: &Option<Box<Node>>, ops: &OpTable) -> String {
        child.as_ref().map(|n| n.render(ops)).unwrap_or_default()
    }

    /// Variable codes referenced by this tree, first-appearance order,
    /// de-duplicated. The plotting collaborator picks its independent axis
    /// from this list.
    pub fn variables(&self) -> Vec<String> {
        collect_vars(self)
    }
}

fn read_register(code: &str, regs: &Registers) -> f64 {
    if code == "MR" {
        regs.memory()
    } else {
        regs.get(code)
    }
}

/// Whole values that fit a signed 64-bit integer print without a decimal
/// point; everything else keeps full floating precision.
pub(crate) fn fmt_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
