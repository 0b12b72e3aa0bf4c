//! # Linear scan register allocation
//!
//! Consumes a finished [`Builder`](crate::ir::Builder) plus an ordered list
//! of physical register names, computes live intervals per function, and
//! assigns every virtual register a physical register or a spill slot.
//! Allocation runs strictly after construction: it reads final statement
//! indices and register ids.
//!
//! ## Module Structure
//!
//! ```text
//! regalloc/
//! ├── mod.rs        # This file - module definition and re-exports
//! ├── liveness.rs   # LiveInterval computation over a statement stream
//! ├── allocator.rs  # LinearScanAllocator (scan, expiry, spill heuristic)
//! └── table.rs      # Placement, RegisterTable (output + rendering)
//! ```
//!
//! ## Key Types
//!
//! - [`LiveInterval`] - Statement-index range a register's value is needed
//! - [`LinearScanAllocator`] - The allocator itself
//! - [`RegisterTable`] - Deterministic output mapping, ready for an emitter

mod allocator;
mod liveness;
mod table;

pub use allocator::LinearScanAllocator;
pub use liveness::{live_intervals, LiveInterval};
pub use table::{Placement, RegisterTable, RegisterTableEntry};
