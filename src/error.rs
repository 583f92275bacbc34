use thiserror::Error;

/// Errors raised while evaluating a computation tree.
///
/// A tree produced by a correct `Brain` never triggers these; they mean the
/// builder attached children wrongly, so callers inside the engine escalate
/// them to a panic instead of papering over them with a default value.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("operation node `{0}` is missing its left operand")]
    MissingLeftOperand(String),
    #[error("binary node `{0}` is missing its right operand")]
    MissingRightOperand(String),
    #[error("node carries unknown operation code `{0}`")]
    UnknownOp(String),
    #[error("operation `{0}` cannot appear inside a tree")]
    Misplaced(String),
    #[error("node has neither a value nor an operation code")]
    EmptyNode,
}
