use crate::aggregate::FieldPlacement;
use crate::context::{CodegenHost, LowerCtx};
use crate::resolve::resolve_composite;
use crate::LowerError;
use basalt_hir::Symbol;
use basalt_ir::{BackendType, FuncEmitter, ValueId};
use cranelift_codegen::ir::types;
use log::trace;

/// Computes the address of `field` within the composite instance that
/// `base` points to, typed as pointer-to-the-field's-backend-type.
///
/// Union members resolve in two steps: the shared slot's address, then a
/// byte advance by the member's sub-offset through an untyped pointer. The
/// placement match is total; a resolved field always has exactly one
/// placement.
pub fn field_ptr(
    emit: &mut FuncEmitter,
    ctx: &mut LowerCtx,
    host: &mut dyn CodegenHost,
    base: ValueId,
    composite: Symbol,
    field: Symbol,
) -> Result<ValueId, LowerError> {
    resolve_composite(ctx, host, composite)?;
    let layout = ctx.layout(composite).ok_or(LowerError::MissingLayout(composite))?;

    let info = ctx
        .field_info(field)
        .unwrap_or_else(|| {
            panic!("field {field} of composite {composite} has no backend metadata")
        })
        .clone();

    trace!("indexing composite {composite} field {field}: {:?}", info.placement);

    let ptr = match info.placement {
        FieldPlacement::Direct(slot) => {
            let offset = layout.slot(slot).offset;
            emit.slot_addr(base, slot, offset)
        }
        FieldPlacement::UnionMember { slot, sub_offset } => {
            let offset = layout.slot(slot).offset;
            let slot_ptr = emit.slot_addr(base, slot, offset);
            let byte_ptr = emit.ptr_cast(slot_ptr, BackendType::Scalar(types::I8));
            emit.byte_offset(byte_ptr, sub_offset)
        }
    };

    // Cast to pointer-to-field-type; union siblings share a slot whose type
    // belongs to a different member.
    Ok(emit.ptr_cast(ptr, info.ty))
}
