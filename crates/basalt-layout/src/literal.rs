use crate::context::{CodegenHost, LowerCtx};
use crate::resolve::resolve_composite;
use crate::zero::push_zero_fill;
use crate::LowerError;
use basalt_hir::{DeclType, FieldDef, Symbol};
use basalt_ir::{BackendType, ConstValue};
use log::trace;

/// Builds the constant slot sequence for a struct literal.
///
/// `inits` has one entry per field declaration, in declaration order; a
/// `Some` is an explicit initializer, a `None` means "use this field's
/// default". The returned sequence interleaves initializer values with
/// zero-fill chunks so that, laid out sequentially, it reproduces the
/// type's declared byte image exactly.
///
/// A defaulted field is placed only if there is room: it must start at or
/// after the end of what has been placed, and end at or before the next
/// explicit field's offset. A defaulted union member superseded by an
/// explicitly initialized sibling is dropped; padding covers its bytes.
pub fn build_struct_literal(
    ctx: &mut LowerCtx,
    host: &mut dyn CodegenHost,
    sym: Symbol,
    inits: &[Option<ConstValue>],
) -> Result<Vec<ConstValue>, LowerError> {
    resolve_composite(ctx, host, sym)?;
    let def = ctx
        .composite_def(sym)
        .cloned()
        .ok_or(LowerError::UnknownComposite(sym))?;
    let total = ctx
        .layout(sym)
        .map(|l| l.size)
        .ok_or(LowerError::MissingLayout(sym))?;

    assert_eq!(
        inits.len(),
        def.fields.len(),
        "literal for `{}` needs one initializer slot per field declaration",
        def.name
    );

    // Declaration-order indices of the fields with explicit initializers.
    let explicit: Vec<usize> = (0..inits.len()).filter(|&i| inits[i].is_some()).collect();

    let mut values: Vec<ConstValue> = Vec::new();
    let mut last_offset: u64 = 0;
    let mut last_size: u64 = 0;
    let mut exidx = 0;

    let mut i = 0;
    while i < def.fields.len() {
        // Everything after the last explicit initializer is defaults.
        if exidx >= explicit.len() {
            break;
        }
        let field = &def.fields[i];
        let (os, sz) = (field.offset, field.size);
        let next_os = def.fields[explicit[exidx]].offset;

        let init = match &inits[i] {
            None => {
                // Default-initialize only if there is room: past the placed
                // bytes and small enough to fit before the next explicit
                // field.
                if os >= last_offset + last_size && os + sz <= next_os {
                    if os > last_offset + last_size {
                        push_zero_fill(&mut values, os - (last_offset + last_size), ctx.word());
                    }
                    values.push(field_default(ctx, host, field)?);
                    last_offset = os;
                    last_size = sz;
                }
                i += 1;
                continue;
            }
            Some(init) => init.clone(),
        };

        assert_eq!(
            explicit[exidx], i,
            "explicit initializer for field `{}` of `{}` is out of offset order",
            field.name, def.name
        );
        assert!(
            os >= last_offset + last_size,
            "explicit initializer for field `{}` of `{}` overlaps already-placed bytes",
            field.name, def.name
        );

        if os > last_offset + last_size {
            push_zero_fill(&mut values, os - (last_offset + last_size), ctx.word());
        }
        values.push(init);
        last_offset = os;
        last_size = sz;
        exidx += 1;
        i += 1;
    }

    // Fill out the rest with default initializers.
    if total > last_offset + last_size {
        for field in &def.fields[i..] {
            if field.offset < last_offset + last_size {
                continue;
            }
            if field.offset > last_offset + last_size {
                push_zero_fill(&mut values, field.offset - (last_offset + last_size), ctx.word());
            }
            values.push(field_default(ctx, host, field)?);
            last_offset = field.offset;
            last_size = field.size;
        }
    }

    // Trailing zero padding up to the full padded size.
    if total > last_offset + last_size {
        push_zero_fill(&mut values, total - (last_offset + last_size), ctx.word());
    }

    trace!(
        "literal for `{}`: {} slots, {} bytes",
        def.name,
        values.len(),
        values.iter().map(ConstValue::byte_size).sum::<u64>()
    );
    Ok(values)
}

/// The default-value image of a composite type: its all-default literal.
///
/// Computed lazily, stored on the layout, and reused as the initializer of
/// every default-constructed instance.
pub fn default_image(
    ctx: &mut LowerCtx,
    host: &mut dyn CodegenHost,
    sym: Symbol,
) -> Result<ConstValue, LowerError> {
    resolve_composite(ctx, host, sym)?;
    if let Some(image) = ctx.layouts.get(&sym).and_then(|l| l.default_image.clone()) {
        return Ok(image);
    }
    let nfields = ctx
        .composite_def(sym)
        .map(|d| d.fields.len())
        .ok_or(LowerError::UnknownComposite(sym))?;
    let slots = build_struct_literal(ctx, host, sym, &vec![None; nfields])?;
    let image = ConstValue::Aggregate(slots);
    ctx.layouts
        .get_mut(&sym)
        .ok_or(LowerError::MissingLayout(sym))?
        .default_image = Some(image.clone());
    Ok(image)
}

/// Default constant for one field, by declared kind: scalar zero, zeroed
/// array, or the nested composite's own default image.
fn field_default(
    ctx: &mut LowerCtx,
    host: &mut dyn CodegenHost,
    field: &FieldDef,
) -> Result<ConstValue, LowerError> {
    match &field.ty {
        DeclType::Composite(inner) => default_image(ctx, host, *inner),
        DeclType::Primitive(_) => match host.backend_type_of(&field.ty) {
            BackendType::Scalar(ty) => Ok(ConstValue::Zero(ty)),
            other => Ok(ConstValue::Zeroed { ty: other, size: field.size }),
        },
        DeclType::Array { .. } => Ok(ConstValue::Zeroed {
            ty: host.backend_type_of(&field.ty),
            size: field.size,
        }),
    }
}
