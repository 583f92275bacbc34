use std::collections::HashMap;
use std::f64::consts::{E, PI};

/// A single calculator operation, tagged by kind.
///
/// Numeric payloads are plain `fn` pointers so the table is `Copy`-friendly
/// and trivially immutable after construction. Two logically inverse codes
/// are independent entries; the table is a flat lookup, not an inverse-pair
/// structure.
#[derive(Clone, Copy, Debug)]
pub enum Operation {
    /// Register reads and memory/K-register bookkeeping.
    Memory,
    Constant(f64),
    Random(fn() -> f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    Equals,
}

/// Fixed mapping from operation code to `Operation`.
#[derive(Debug)]
pub struct OpTable {
    table: HashMap<&'static str, Operation>,
}

impl Default for OpTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OpTable {
    pub fn new() -> Self {
        let mut table: HashMap<&'static str, Operation> = HashMap::new();

        // Completing a calculation.
        table.insert("=", Operation::Equals);
        table.insert("inv_=", Operation::Equals);

        // Memory and K-register traffic.
        for code in [
            "K in", "inv_K in", "K out", "inv_K out", "M+", "inv_M+", "MR", "inv_MR",
        ] {
            table.insert(code, Operation::Memory);
        }

        // Numeric symbols.
        table.insert("π", Operation::Constant(PI));
        table.insert("inv_π", Operation::Constant(PI));
        table.insert("e", Operation::Constant(E));
        table.insert("inv_e", Operation::Constant(E));
        table.insert("Rnd", Operation::Random(uniform_random));
        table.insert("inv_Rnd", Operation::Random(uniform_random));

        // Roots, powers, logs and factorial.
        table.insert("±", Operation::Unary(|x| -x));
        table.insert("inv_±", Operation::Unary(|x| x * x));
        table.insert("√", Operation::Unary(f64::sqrt));
        table.insert("inv_√", Operation::Unary(f64::sqrt));
        table.insert("1/x", Operation::Unary(|x| 1.0 / x));
        table.insert("inv_1/x", Operation::Unary(|x| 1.0 / x));
        table.insert("!", Operation::Unary(factorial));
        table.insert("inv_!", Operation::Unary(factorial));
        table.insert("log", Operation::Unary(f64::log10));
        table.insert("inv_log", Operation::Unary(|x| 10f64.powf(x)));
        table.insert("ln", Operation::Unary(f64::ln));
        table.insert("inv_ln", Operation::Unary(f64::exp));

        // Trig in degrees.
        table.insert("sinDeg", Operation::Unary(|x| x.to_radians().sin()));
        table.insert("cosDeg", Operation::Unary(|x| x.to_radians().cos()));
        table.insert("tanDeg", Operation::Unary(|x| x.to_radians().tan()));
        table.insert("inv_sinDeg", Operation::Unary(|x| x.asin().to_degrees()));
        table.insert("inv_cosDeg", Operation::Unary(|x| x.acos().to_degrees()));
        table.insert("inv_tanDeg", Operation::Unary(|x| x.atan().to_degrees()));

        // Trig in radians.
        table.insert("sinRad", Operation::Unary(f64::sin));
        table.insert("cosRad", Operation::Unary(f64::cos));
        table.insert("tanRad", Operation::Unary(f64::tan));
        table.insert("inv_sinRad", Operation::Unary(f64::asin));
        table.insert("inv_cosRad", Operation::Unary(f64::acos));
        table.insert("inv_tanRad", Operation::Unary(f64::atan));

        // Arithmetic.
        table.insert("+", Operation::Binary(|x, y| x + y));
        table.insert("inv_+", Operation::Binary(|x, y| x + y));
        table.insert("−", Operation::Binary(|x, y| x - y));
        table.insert("inv_−", Operation::Binary(|x, y| x - y));
        table.insert("×", Operation::Binary(|x, y| x * y));
        table.insert("inv_×", Operation::Binary(f64::powf));
        table.insert("÷", Operation::Binary(|x, y| x / y));
        table.insert("inv_÷", Operation::Binary(|x, y| x.powf(1.0 / y)));

        Self { table }
    }

    /// Resolves a code to its operation. Single lowercase letters are always
    /// variable references, regardless of what the table holds; everything
    /// else is a flat lookup. Unknown codes yield `None` and the caller is
    /// expected to ignore the event.
    pub fn lookup(&self, code: &str) -> Option<Operation> {
        if is_variable_code(code) {
            return Some(Operation::Memory);
        }
        self.table.get(code).copied()
    }
}

/// True for exactly one ASCII lowercase letter. These codes are reserved for
/// register references and never collide with real operator codes.
pub fn is_variable_code(code: &str) -> bool {
    let mut chars = code.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_lowercase())
}

/// Folds the inverse and degree/radian key states into the table key: trig
/// codes get a `Deg`/`Rad` suffix, and inverse mode prefixes `inv_`.
pub fn resolve_code(key: &str, inverse: bool, degree_mode: bool) -> String {
    let mut code = String::with_capacity(key.len() + 7);
    if inverse {
        code.push_str("inv_");
    }
    code.push_str(key);
    if matches!(key, "sin" | "cos" | "tan") {
        code.push_str(if degree_mode { "Deg" } else { "Rad" });
    }
    code
}

/// Display glyph for a code. Inverse codes perform a different function than
/// the button label says, so they render under their own symbols.
pub(crate) fn display_symbol(code: &str) -> &str {
    match code {
        "inv_log" => "10^",
        "inv_ln" => "e^",
        "inv_sinDeg" | "inv_sinRad" => "asin",
        "inv_cosDeg" | "inv_cosRad" => "acos",
        "inv_tanDeg" | "inv_tanRad" => "atan",
        "inv_±" => "^2",
        "inv_×" => "^",
        "inv_÷" => "^1/",
        _ => code,
    }
}

/// Unary symbols that render after their operand: `(5)!`, `(5)^2`.
pub(crate) fn is_postfix_symbol(symbol: &str) -> bool {
    matches!(symbol, "!" | "^2")
}

fn factorial(n: f64) -> f64 {
    let n = n as i64;
    if n < 2 {
        return 1.0;
    }
    (2..=n).fold(1.0, |acc, i| acc * i as f64)
}

fn uniform_random() -> f64 {
    rand::random::<f64>()
}
