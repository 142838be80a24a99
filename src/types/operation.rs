//! Reversible canvas operations.
//!
//! An `Operation` is one of the six geometric transforms the canvas
//! supports. Every operation has a paired inverse:
//! - `ShiftLeft(d)` <-> `ShiftRight(d)`
//! - `ShiftUp(d)` <-> `ShiftDown(d)`
//! - `RotateCcw` <-> `RotateCw`

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of geometric transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpKind {
    ShiftLeft,
    ShiftRight,
    ShiftUp,
    ShiftDown,
    RotateCcw,
    RotateCw,
}

impl OpKind {
    /// All six kinds, in declaration order.
    pub const ALL: [OpKind; 6] = [
        OpKind::ShiftLeft,
        OpKind::ShiftRight,
        OpKind::ShiftUp,
        OpKind::ShiftDown,
        OpKind::RotateCcw,
        OpKind::RotateCw,
    ];

    /// The kind that undoes this one.
    pub const fn inverse(self) -> Self {
        match self {
            OpKind::ShiftLeft => OpKind::ShiftRight,
            OpKind::ShiftRight => OpKind::ShiftLeft,
            OpKind::ShiftUp => OpKind::ShiftDown,
            OpKind::ShiftDown => OpKind::ShiftUp,
            OpKind::RotateCcw => OpKind::RotateCw,
            OpKind::RotateCw => OpKind::RotateCcw,
        }
    }

    /// Whether this kind takes a distance argument.
    pub const fn is_shift(self) -> bool {
        !self.is_rotation()
    }

    pub const fn is_rotation(self) -> bool {
        matches!(self, OpKind::RotateCcw | OpKind::RotateCw)
    }

    /// Kebab-case name, as used in logs and exports.
    pub const fn name(self) -> &'static str {
        match self {
            OpKind::ShiftLeft => "shift-left",
            OpKind::ShiftRight => "shift-right",
            OpKind::ShiftUp => "shift-up",
            OpKind::ShiftDown => "shift-down",
            OpKind::RotateCcw => "rotate-ccw",
            OpKind::RotateCw => "rotate-cw",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One immutable, invertible canvas transform.
///
/// The argument is a pixel distance for the shift kinds. Rotations ignore
/// it, so it is stored as zero to keep equal rotations comparing equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OperationFields")]
pub struct Operation {
    kind: OpKind,
    argument: usize,
}

/// Serialized shape of an `Operation`, normalized through `Operation::new`
/// on the way in.
#[derive(Deserialize)]
struct OperationFields {
    kind: OpKind,
    #[serde(default)]
    argument: usize,
}

impl From<OperationFields> for Operation {
    fn from(fields: OperationFields) -> Self {
        Operation::new(fields.kind, fields.argument)
    }
}

impl Operation {
    pub const fn new(kind: OpKind, argument: usize) -> Self {
        let argument = if kind.is_rotation() { 0 } else { argument };
        Self { kind, argument }
    }

    pub const fn shift_left(d: usize) -> Self {
        Self::new(OpKind::ShiftLeft, d)
    }

    pub const fn shift_right(d: usize) -> Self {
        Self::new(OpKind::ShiftRight, d)
    }

    pub const fn shift_up(d: usize) -> Self {
        Self::new(OpKind::ShiftUp, d)
    }

    pub const fn shift_down(d: usize) -> Self {
        Self::new(OpKind::ShiftDown, d)
    }

    pub const fn rotate_ccw() -> Self {
        Self::new(OpKind::RotateCcw, 0)
    }

    pub const fn rotate_cw() -> Self {
        Self::new(OpKind::RotateCw, 0)
    }

    pub const fn kind(self) -> OpKind {
        self.kind
    }

    pub const fn argument(self) -> usize {
        self.argument
    }

    /// The operation that exactly cancels this one.
    pub const fn inverse(self) -> Self {
        Self::new(self.kind.inverse(), self.argument)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_shift() {
            write!(f, "{}({})", self.kind, self.argument)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
