//! Backend value model produced by composite-type lowering.
//!
//! Scalars are named by Cranelift's `ir::Type` (`I8`/`I16`/`I32`/`I64`, ...);
//! everything aggregate-shaped is described structurally so the layout stage
//! can build constant slot sequences and emit address/load/store/compare
//! instructions without owning a full code generator.

pub mod constant;
pub mod emit;
pub mod types;

pub use constant::ConstValue;
pub use emit::{CmpPred, FuncEmitter, Inst, ValueId};
pub use types::{BackendType, NativeWord};
