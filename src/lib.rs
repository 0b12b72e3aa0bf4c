//! # opentac - TAC IR Builder and Linear Scan Register Allocator
//!
//! The middle and back end of a compiler: a builder for a three-address-code
//! (TAC) intermediate representation, a structurally-interned type system,
//! and a linear scan register allocator mapping an unbounded virtual
//! register space onto a fixed physical register file plus a spill area.
//!
//! A front end (parser/semantic analyzer, not part of this crate) drives the
//! [`Builder`] in program order; the finished IR is handed read-only to the
//! [`LinearScanAllocator`], whose [`RegisterTable`] a code emitter walks to
//! generate machine instructions.
//!
//! ## Architecture
//!
//! ```text
//! front end → Builder/FunctionBuilder → LinearScanAllocator → RegisterTable → emitter
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use opentac::{BasicType, BinOp, Builder, LinearScanAllocator, Value};
//!
//! # fn main() -> opentac::Result<()> {
//! let mut builder = Builder::new();
//! let i64_ty = builder.types_mut().intern_basic(BasicType::I64);
//!
//! builder.begin_function("add3");
//! let func = builder.function_mut();
//! let x = func.add_param("x", i64_ty)?;
//! let y = func.add_param("y", i64_ty)?;
//! let z = func.add_param("z", i64_ty)?;
//! let t = func.build_binary(BinOp::Add, Value::Reg(x), Value::Reg(y));
//! let sum = func.build_binary(BinOp::Add, t, Value::Reg(z));
//! func.build_return(Some(sum));
//! builder.end_function();
//!
//! let pool = vec!["rax".to_string(), "rcx".to_string(), "rdx".to_string()];
//! let mut allocator = LinearScanAllocator::new(pool);
//! let table = allocator.allocate(&builder);
//!
//! // Five virtual registers, each placed in a register or a spill slot.
//! assert_eq!(table.len(), 5);
//! print!("{}", table);
//! # Ok(())
//! # }
//! ```
//!
//! ## Guarantees
//!
//! - **Type identity**: structurally-equal types share one
//!   [`TypeId`](types::TypeId); equality is identity, never structural
//!   comparison by callers.
//! - **Register id spaces**: parameters take ids -1, -2, ... and locals
//!   0, 1, ...; the spaces never overlap.
//! - **Determinism**: identical IR and an identical register pool always
//!   produce a byte-identical [`RegisterTable`].
//!
//! Construction and allocation are two strictly sequential, single-threaded
//! phases; nothing here blocks, locks, or suspends.

#![warn(missing_docs)]

pub mod error;
pub mod ir;
pub mod regalloc;
pub mod types;

pub use error::{Error, Result};
pub use ir::{
    BinOp, Binding, Builder, FunctionBuilder, Instruction, Item, Label, NameTable, Reg, RelOp,
    UnOp, Value,
};
pub use regalloc::{
    live_intervals, LinearScanAllocator, LiveInterval, Placement, RegisterTable,
    RegisterTableEntry,
};
pub use types::{AggregateKind, BasicType, Type, TypeId, TypeInterner};
