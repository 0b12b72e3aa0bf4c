//! Statement (instruction) definitions

use std::fmt;

use super::value::{Reg, Value};

/// Opaque reference to a position in a function's statement stream.
///
/// Labels are minted and resolved by the producer (the front end); the
/// builder stores them without interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Binary arithmetic/logical opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Remainder
    Rem,
    /// Bitwise AND
    BitAnd,
    /// Bitwise OR
    BitOr,
    /// Bitwise XOR
    BitXor,
    /// Left shift
    Shl,
    /// Right shift
    Shr,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
        };
        write!(f, "{}", sym)
    }
}

/// Unary opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    /// Arithmetic negation
    Neg,
    /// Logical/bitwise NOT
    Not,
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        };
        write!(f, "{}", sym)
    }
}

/// The six relational kinds a conditional branch may compare with.
///
/// Being a closed enum, a malformed relational opcode is impossible by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Equal
    Eq,
    /// Not equal
    Ne,
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
        };
        write!(f, "{}", sym)
    }
}

/// One three-address-code statement.
///
/// At most two source operands and one destination register per statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// `target = left op right`
    Binary {
        /// Binary opcode
        op: BinOp,
        /// Destination register
        target: Reg,
        /// Left operand
        left: Value,
        /// Right operand
        right: Value,
    },
    /// `target = op operand`
    Unary {
        /// Unary opcode
        op: UnOp,
        /// Destination register
        target: Reg,
        /// Source operand
        operand: Value,
    },
    /// Store: `target[offset] = value`. The target register holds the
    /// destination address and is a *use*, not a definition.
    IndexAssign {
        /// Register addressing the written memory
        target: Reg,
        /// Byte offset operand
        offset: Value,
        /// Value stored
        value: Value,
    },
    /// Load: `target = value[offset]`
    AssignIndex {
        /// Destination register
        target: Reg,
        /// Operand addressing the read memory
        value: Value,
        /// Byte offset operand
        offset: Value,
    },
    /// Push one call argument
    Param {
        /// Argument value
        value: Value,
    },
    /// `target = call callee` with `arg_count` previously-pushed arguments
    Call {
        /// Destination register
        target: Reg,
        /// Callable operand
        callee: Value,
        /// Number of preceding `Param` statements consumed
        arg_count: u64,
    },
    /// Return from the function, optionally with a value
    Return {
        /// Returned value, if any
        value: Option<Value>,
    },
    /// Conditional branch: jump to `label` when `left rel right` holds
    BranchIf {
        /// Relational kind compared
        rel: RelOp,
        /// Left operand
        left: Value,
        /// Right operand
        right: Value,
        /// Jump target
        label: Label,
    },
    /// Unconditional branch; the operand holds the target in the value place
    Branch {
        /// Jump target carried as a value (typically [`Value::Ptr`])
        target: Value,
    },
    /// Placeholder opened by `insert_at`, overwritten by the next build
    Nop,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Binary {
                op,
                target,
                left,
                right,
            } => write!(f, "{} = {} {} {}", target, left, op, right),
            Instruction::Unary {
                op,
                target,
                operand,
            } => write!(f, "{} = {}{}", target, op, operand),
            Instruction::IndexAssign {
                target,
                offset,
                value,
            } => write!(f, "{}[{}] = {}", target, offset, value),
            Instruction::AssignIndex {
                target,
                value,
                offset,
            } => write!(f, "{} = {}[{}]", target, value, offset),
            Instruction::Param { value } => write!(f, "param {}", value),
            Instruction::Call {
                target,
                callee,
                arg_count,
            } => write!(f, "{} = call {}, {}", target, callee, arg_count),
            Instruction::Return { value: Some(v) } => write!(f, "ret {}", v),
            Instruction::Return { value: None } => write!(f, "ret"),
            Instruction::BranchIf {
                rel,
                left,
                right,
                label,
            } => write!(f, "if {} {} {} goto {}", left, rel, right, label),
            Instruction::Branch { target } => write!(f, "goto {}", target),
            Instruction::Nop => write!(f, "nop"),
        }
    }
}
