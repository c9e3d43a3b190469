use crate::context::{CodegenHost, LowerCtx};
use crate::locate::field_ptr;
use crate::resolve::resolve_composite;
use crate::LowerError;
use basalt_hir::{DeclType, Symbol};
use basalt_ir::{BackendType, FuncEmitter, ValueId};
use std::sync::Arc;

/// The canonical unpadded backend type of a composite: one slot per
/// declared field, nested composites recursively unpadded, no
/// backend-inserted padding. Union members each get their own slot.
///
/// Memoized in the aggregate type cache: each declared type is translated
/// once per compilation run.
pub fn unpadded_type(
    ctx: &mut LowerCtx,
    host: &mut dyn CodegenHost,
    sym: Symbol,
) -> Result<BackendType, LowerError> {
    if let Some(ty) = ctx.unpadded.get(&sym) {
        return Ok(ty.clone());
    }
    let fields = ctx
        .composite_def(sym)
        .ok_or(LowerError::UnknownComposite(sym))?
        .fields
        .clone();

    let mut slots = Vec::with_capacity(fields.len());
    for field in &fields {
        let slot_ty = match &field.ty {
            // Nested composites are the only members that can contain padding.
            DeclType::Composite(inner) => unpadded_type(ctx, host, *inner)?,
            _ => host.backend_type_of(&field.ty),
        };
        slots.push(slot_ty);
    }
    let ty = BackendType::Record(Arc::from(slots));
    ctx.unpadded.insert(sym, ty.clone());
    Ok(ty)
}

/// Reads the composite instance at `src` into a first-class value of the
/// canonical unpadded type: per-field loads assembled in declaration order
/// with no gaps. Purely structural; defaults are never consulted.
pub fn unpad_value(
    emit: &mut FuncEmitter,
    ctx: &mut LowerCtx,
    host: &mut dyn CodegenHost,
    sym: Symbol,
    src: ValueId,
) -> Result<ValueId, LowerError> {
    resolve_composite(ctx, host, sym)?;
    let uty = unpadded_type(ctx, host, sym)?;
    let fields = ctx
        .composite_def(sym)
        .ok_or(LowerError::UnknownComposite(sym))?
        .fields
        .clone();

    let mut value = emit.undef(uty);
    for (i, field) in fields.iter().enumerate() {
        let fptr = field_ptr(emit, ctx, host, src, sym, field.symbol)?;
        let fval = match &field.ty {
            DeclType::Composite(inner) => unpad_value(emit, ctx, host, *inner, fptr)?,
            _ => {
                let fty = host.backend_type_of(&field.ty);
                emit.load(fty, fptr)
            }
        };
        value = emit.insert_value(value, fval, i);
    }
    Ok(value)
}

/// Undoes [`unpad_value`]: writes the unpadded `value` field by field into
/// the padded instance at `dst`.
pub fn pad_value(
    emit: &mut FuncEmitter,
    ctx: &mut LowerCtx,
    host: &mut dyn CodegenHost,
    sym: Symbol,
    value: ValueId,
    dst: ValueId,
) -> Result<(), LowerError> {
    resolve_composite(ctx, host, sym)?;
    let fields = ctx
        .composite_def(sym)
        .ok_or(LowerError::UnknownComposite(sym))?
        .fields
        .clone();

    for (i, field) in fields.iter().enumerate() {
        let fptr = field_ptr(emit, ctx, host, dst, sym, field.symbol)?;
        let fval = emit.extract_value(value, i);
        match &field.ty {
            DeclType::Composite(inner) => pad_value(emit, ctx, host, *inner, fval, fptr)?,
            _ => {
                emit.store(fval, fptr);
            }
        }
    }
    Ok(())
}
