//! Interactive calculator engine: turns key-press events into a computation
//! tree, keeps a running result available after every event, and can
//! re-evaluate a saved tree as a function of its registers for plotting.

mod brain;
mod collect;
mod error;
mod node;
mod ops;
mod program;
mod registers;

pub use brain::Brain;
pub use error::EvalError;
pub use node::{Node, PlotFn};
pub use ops::{is_variable_code, resolve_code, OpTable, Operation};
pub use program::Program;
pub use registers::{Registers, KREG_COUNT};
