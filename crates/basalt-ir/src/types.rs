use basalt_hir::Symbol;
use cranelift_codegen::ir::Type as ClifType;
use std::sync::Arc;

/// Native word width of the compilation target, in bytes.
///
/// Drives the chunking policy of zero-fill emission: a 64-bit target may use
/// 8-byte zero chunks, a 32-bit target never emits anything wider than 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeWord {
    W4,
    W8,
}

impl NativeWord {
    pub fn bytes(self) -> u64 {
        match self {
            NativeWord::W4 => 4,
            NativeWord::W8 => 8,
        }
    }

    /// The word width of the host.
    pub fn host() -> Self {
        if cfg!(target_pointer_width = "64") {
            NativeWord::W8
        } else {
            NativeWord::W4
        }
    }
}

/// A backend type, as returned by the type-lowering collaborator or derived
/// by the layout stage itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// A scalar slot, named by its Cranelift type.
    Scalar(ClifType),
    /// A fixed-length array of a backend element type.
    Array { elem: Box<BackendType>, len: u64 },
    /// The padded aggregate of a resolved composite, by declared symbol.
    Named(Symbol),
    /// An anonymous slot record, one entry per slot, no implicit padding.
    /// This is the shape of canonical unpadded types.
    Record(Arc<[BackendType]>),
    /// Pointer to a backend type.
    Ptr(Box<BackendType>),
}

impl BackendType {
    pub fn ptr_to(pointee: BackendType) -> BackendType {
        BackendType::Ptr(Box::new(pointee))
    }
}
