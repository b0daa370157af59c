//! # flatzig Schema
//!
//! In-memory schema object model consumed by the flatzig code generator.
//!
//! This crate provides:
//! - Type descriptors for the wire format (scalars, strings, vectors,
//!   fixed arrays, object/enum/union references)
//! - Object, field, enum and union definitions
//! - Deterministic field ordering for vtable slot emission
//!
//! The model is produced by a schema loader before generation starts and
//! is read-only for the duration of a generation pass.

pub mod objects;
pub mod types;

pub use objects::{Field, Object, Prelude, Schema};
pub use types::{BaseKind, Enum, EnumVal, TypeDesc};
