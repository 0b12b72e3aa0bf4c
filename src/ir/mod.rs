//! # Three-address-code IR
//!
//! A flat, contiguous statement encoding built in program order by a front
//! end. Each statement has at most two source operands and one destination
//! register; branches carry labels resolved by the producer.
//!
//! ## Module Structure
//!
//! ```text
//! ir/
//! ├── mod.rs          # This file - module definition and re-exports
//! ├── value.rs        # Reg, Value (operand encoding)
//! ├── instruction.rs  # BinOp, UnOp, RelOp, Label, Instruction
//! ├── names.rs        # NameTable (per-function symbol bindings)
//! └── builder.rs      # Builder, FunctionBuilder, Item (construction)
//! ```
//!
//! ## Key Types
//!
//! - [`Reg`] - Virtual register id (parameters negative, locals non-negative)
//! - [`Value`] - Operand: register reference or tagged immediate
//! - [`Instruction`] - One three-address-code statement
//! - [`Builder`] - Ordered item collection with an embedded type interner
//! - [`FunctionBuilder`] - Statement stream, name table, register counters

mod builder;
mod instruction;
mod names;
mod value;

pub use builder::{Builder, FunctionBuilder, Item};
pub use instruction::{BinOp, Instruction, Label, RelOp, UnOp};
pub use names::{Binding, NameTable};
pub use value::{Reg, Value};
