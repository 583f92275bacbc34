use crate::ops::is_variable_code;
use log::debug;

/// Number of indexed K registers.
pub const KREG_COUNT: usize = 6;

/// Addressable numeric storage shared by every evaluation: 26 single-letter
/// variables, one memory accumulator, and `KREG_COUNT` indexed K registers.
///
/// Constructed per engine instance and passed by reference to whatever needs
/// it; nothing here is global. Out-of-range indexed access is silently
/// dropped — the brain validates user-typed indices before calling in.
#[derive(Debug, Default, Clone)]
pub struct Registers {
    vars: [f64; 26],
    memory: f64,
    k: [f64; KREG_COUNT],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a single-letter variable. Unknown names read as 0.0.
    pub fn get(&self, name: &str) -> f64 {
        match slot(name) {
            Some(i) => self.vars[i],
            None => 0.0,
        }
    }

    /// Writes a single-letter variable. Non-variable names are dropped.
    pub fn set(&mut self, name: &str, value: f64) {
        match slot(name) {
            Some(i) => self.vars[i] = value,
            None => debug!("registers.set: `{name}` is not a variable, ignored"),
        }
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn set_memory(&mut self, value: f64) {
        self.memory = value;
    }

    pub fn add_memory(&mut self, delta: f64) {
        self.memory += delta;
    }

    pub fn memory_has_contents(&self) -> bool {
        self.memory != 0.0
    }

    pub fn get_indexed(&self, index: usize) -> f64 {
        self.k.get(index).copied().unwrap_or(0.0)
    }

    pub fn set_indexed(&mut self, index: usize, value: f64) {
        match self.k.get_mut(index) {
            Some(slot) => *slot = value,
            None => debug!("registers.set_indexed: index {index} out of range, ignored"),
        }
    }

    pub fn clear_indexed(&mut self) {
        self.k = [0.0; KREG_COUNT];
    }

    /// One flag per K register, lit when the register holds a non-zero value.
    pub fn k_flags(&self) -> [bool; KREG_COUNT] {
        self.k.map(|v| v != 0.0)
    }
}

fn slot(name: &str) -> Option<usize> {
    if !is_variable_code(name) {
        return None;
    }
    name.chars().next().map(|c| c as usize - 'a' as usize)
}
