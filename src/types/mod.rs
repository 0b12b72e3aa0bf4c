//! # Structurally-interned type system
//!
//! Types are stored in an append-only arena owned by a [`TypeInterner`] and
//! addressed by stable [`TypeId`] handles. Two types are equal iff their
//! `TypeId`s are equal: the interner is the sole authority for equality, and
//! callers never compare structures themselves.
//!
//! ## Key Types
//!
//! - [`TypeId`] - Stable, copyable handle into the interner's arena
//! - [`Type`] - Tagged type descriptor (scalars, pointers, aggregates)
//! - [`TypeInterner`] - Canonical store; structurally-equal requests share
//!   one instance

mod interner;

pub use interner::{AggregateKind, BasicType, Type, TypeId, TypeInterner};
