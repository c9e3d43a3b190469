use crate::aggregate::{AggregateLayout, FieldInfo, FieldPlacement, ResolveState, Slot, SlotKind};
use crate::context::{CodegenHost, LowerCtx};
use crate::literal::default_image;
use crate::zero::zero_chunks;
use crate::LowerError;
use basalt_hir::{CompositeDef, DeclType, Symbol};
use log::{debug, warn};

/// Resolves a declared composite type into its backend aggregate layout.
///
/// Idempotent: a second invocation (including reentry while this type's own
/// members are being lowered) is a no-op. For forward declarations only the
/// nominal backend type is requested; resolution completes on a later call
/// once the frontend has filled in the size.
pub fn resolve_composite(
    ctx: &mut LowerCtx,
    host: &mut dyn CodegenHost,
    sym: Symbol,
) -> Result<(), LowerError> {
    match ctx.state(sym) {
        ResolveState::Resolved | ResolveState::InProgress => return Ok(()),
        ResolveState::Unresolved => {}
    }
    let def = ctx
        .composite_def(sym)
        .cloned()
        .ok_or(LowerError::UnknownComposite(sym))?;

    // Guard before doing any further work, so recursive reentry during
    // member lowering short-circuits.
    ctx.set_state(sym, ResolveState::InProgress);

    debug!("resolving composite type `{}` ({} fields)", def.name, def.fields.len());

    // Make sure the nominal backend type exists even when layout
    // construction below is skipped.
    host.backend_type_of(&DeclType::Composite(sym));

    if !def.size_known() {
        debug!("`{}` is a forward declaration; nominal type only", def.name);
        ctx.set_state(sym, ResolveState::Unresolved);
        return Ok(());
    }

    let layout = build_layout(ctx, host, &def);
    ctx.layouts.insert(sym, layout);

    let needs_def = host.must_define(&def);
    if needs_def {
        let image = default_image(ctx, host, sym)?;
        host.define_default_image(&def, &image);
    }

    for member in &def.members {
        host.generate_member(member);
    }

    if needs_def {
        host.emit_type_metadata(&def);
    }

    ctx.set_state(sym, ResolveState::Resolved);
    Ok(())
}

/// Derives the slot sequence and per-field placement metadata for a
/// composite whose size is known.
///
/// Fields are walked in declaration order. A field starting at or past the
/// end of the bytes covered so far opens a new slot (with padding chunks for
/// any gap); a field starting inside the covered region is a union member
/// sharing the slot that covers its offset.
fn build_layout(ctx: &mut LowerCtx, host: &mut dyn CodegenHost, def: &CompositeDef) -> AggregateLayout {
    let size = def.size.expect("layout construction requires a known size");
    let mut slots: Vec<Slot> = Vec::with_capacity(def.fields.len());
    let mut end: u64 = 0;

    for field in &def.fields {
        let fty = host.backend_type_of(&field.ty);
        let placement = if field.offset >= end {
            for chunk in zero_chunks(field.offset - end, ctx.word()) {
                let bytes = chunk.bytes() as u64;
                slots.push(Slot { offset: end, size: bytes, kind: SlotKind::Pad(chunk) });
                end += bytes;
            }
            slots.push(Slot {
                offset: field.offset,
                size: field.size,
                kind: SlotKind::Field { field: field.symbol, ty: fty.clone() },
            });
            end = field.offset + field.size;
            FieldPlacement::Direct(slots.len() - 1)
        } else {
            // Union member: must lie inside the region covered so far.
            assert!(
                field.offset + field.size <= end,
                "field `{}` of `{}` escapes the union region it overlaps",
                field.name,
                def.name
            );
            let slot = slots
                .iter()
                .rposition(|s| {
                    matches!(s.kind, SlotKind::Field { .. })
                        && s.offset <= field.offset
                        && field.offset < s.offset + s.size
                })
                .unwrap_or_else(|| {
                    panic!(
                        "field `{}` of `{}` overlaps padding, not an earlier field slot",
                        field.name, def.name
                    )
                });
            let sub = field.offset - slots[slot].offset;
            if sub == 0 {
                FieldPlacement::Direct(slot)
            } else {
                FieldPlacement::UnionMember { slot, sub_offset: sub }
            }
        };

        if ctx.field_infos.contains_key(&field.symbol) {
            // Defensive reentry guard: keep the existing metadata.
            warn!("field `{}` of `{}` already carries backend metadata", field.name, def.name);
        } else {
            ctx.field_infos
                .insert(field.symbol, FieldInfo { placement, ty: fty });
        }
    }

    assert!(
        end <= size,
        "fields of `{}` extend past its declared size ({} > {})",
        def.name,
        end,
        size
    );
    for chunk in zero_chunks(size - end, ctx.word()) {
        let bytes = chunk.bytes() as u64;
        slots.push(Slot { offset: end, size: bytes, kind: SlotKind::Pad(chunk) });
        end += bytes;
    }
    debug_assert_eq!(end, size);

    AggregateLayout::new(slots, size)
}
