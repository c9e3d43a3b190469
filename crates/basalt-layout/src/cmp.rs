use crate::context::LowerCtx;
use crate::LowerError;
use basalt_hir::Symbol;
use basalt_ir::{CmpPred, FuncEmitter, ValueId};

/// Emits an equality (or inequality) test between two composite values as
/// one flat byte comparison over the full padded size.
///
/// This is byte-exact by design: the comparison covers backend-inserted
/// padding, so two values with identical fields but different padding bytes
/// compare unequal. Downstream code relies on this contract; comparisons
/// that must ignore padding go through the unpadded representation instead.
pub fn composite_equals(
    emit: &mut FuncEmitter,
    ctx: &LowerCtx,
    pred: CmpPred,
    lhs: ValueId,
    rhs: ValueId,
    sym: Symbol,
) -> Result<ValueId, LowerError> {
    let def = ctx
        .composite_def(sym)
        .ok_or(LowerError::UnknownComposite(sym))?;
    let size = def
        .size
        .unwrap_or_else(|| panic!("comparing composite `{}` with unknown size", def.name));

    let diff = emit.memcmp(lhs, rhs, size);
    Ok(emit.cmp_zero(pred, diff))
}
