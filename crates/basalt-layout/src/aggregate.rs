use basalt_hir::Symbol;
use basalt_ir::{BackendType, ConstValue};
use cranelift_codegen::ir::Type as ClifType;

/// Resolution state of a declared composite type.
///
/// `InProgress` is a legitimate state to observe: resolving a type lowers
/// its members, which can reenter the resolver for the same type. The
/// reentry short-circuits instead of cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveState {
    #[default]
    Unresolved,
    InProgress,
    Resolved,
}

/// What occupies one backend aggregate slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotKind {
    /// A declared field, with its backend type.
    Field { field: Symbol, ty: BackendType },
    /// Backend-inserted zero padding of the given scalar chunk type.
    Pad(ClifType),
}

/// One slot of a backend aggregate layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub offset: u64,
    pub size: u64,
    pub kind: SlotKind,
}

/// Where a field lives within the slot sequence.
///
/// Union members that start inside (but not at the start of) the region
/// covered by an earlier slot carry the extra byte sub-offset needed to
/// address them within that shared slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPlacement {
    Direct(usize),
    UnionMember { slot: usize, sub_offset: u64 },
}

/// Backend metadata allocated for one field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub placement: FieldPlacement,
    pub ty: BackendType,
}

/// The derived backend aggregate layout of a composite type with known size.
///
/// Invariant: walking `slots` covers exactly `size` bytes with no gaps and
/// no overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateLayout {
    pub slots: Vec<Slot>,
    pub size: u64,
    /// Default-value image, computed lazily on first use and reused for
    /// every default-constructed instance.
    pub(crate) default_image: Option<ConstValue>,
}

impl AggregateLayout {
    pub fn new(slots: Vec<Slot>, size: u64) -> Self {
        AggregateLayout { slots, size, default_image: None }
    }

    pub fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }
}
