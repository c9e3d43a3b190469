pub mod hir;

pub use hir::*; // Re-export core HIR types
