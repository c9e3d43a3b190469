//! Composite-type layout lowering for the code generation backend.
//!
//! The frontend hands this crate composite (record/union) declarations with
//! already-computed byte offsets; this crate derives the backend aggregate
//! layout (typed slots interleaved with explicit zero-fill padding), and
//! provides the value operations built on top of it:
//!
//! - [`resolve::resolve_composite`]: idempotent resolution of a declared
//!   type into an [`aggregate::AggregateLayout`], including emission of the
//!   type's default-value image through the host.
//! - [`literal::build_struct_literal`]: constant slot sequences for struct
//!   literals, reproducing the declared byte image bit for bit.
//! - [`locate::field_ptr`]: field addressing, including union members that
//!   share a backend slot at a byte sub-offset.
//! - [`unpad`]: conversion between the padded aggregate and the canonical
//!   unpadded representation used where padding bytes must not leak.
//! - [`cmp::composite_equals`]: equality as one flat comparison over the
//!   full padded byte image. Deliberately padding-sensitive: two values with
//!   equal fields but different padding bytes compare unequal. Callers that
//!   need padding-insensitive comparison must go through the unpadded form.

use basalt_hir::Symbol;
use thiserror::Error;

pub mod aggregate;
pub mod cmp;
pub mod context;
pub mod literal;
pub mod locate;
pub mod resolve;
pub mod unpad;
pub mod zero;

pub use aggregate::{AggregateLayout, FieldInfo, FieldPlacement, ResolveState, Slot, SlotKind};
pub use cmp::composite_equals;
pub use context::{CodegenHost, LowerCtx};
pub use literal::{build_struct_literal, default_image};
pub use locate::field_ptr;
pub use resolve::resolve_composite;
pub use unpad::{pad_value, unpad_value, unpadded_type};
pub use zero::push_zero_fill;

/// Errors that can occur during composite-type lowering.
///
/// Only conditions a well-behaved host can legitimately run into are errors;
/// layout inconsistencies coming from the frontend (mismatched offsets,
/// missing field metadata on a resolved type) are bugs upstream and assert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LowerError {
    #[error("unknown composite symbol: {0}")]
    UnknownComposite(Symbol),

    #[error("no aggregate layout for {0}; the type is only forward-declared")]
    MissingLayout(Symbol),
}
