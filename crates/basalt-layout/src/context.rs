use crate::aggregate::{AggregateLayout, FieldInfo, ResolveState};
use basalt_hir::{CompositeDef, DeclType, MemberDecl, Symbol};
use basalt_ir::{BackendType, ConstValue, NativeWord};
use rustc_hash::FxHashMap;

/// The backend collaborators the layout stage calls out to.
///
/// The layout engine never decides what backend type a declared type maps
/// to, whether a type deserves a materialized definition, or how members
/// are generated; it only sequences those calls. All methods are assumed
/// idempotent per input (the caller side memoizes).
pub trait CodegenHost {
    /// Nominal backend type for a declared type. For composites this only
    /// guarantees the nominal type exists; layout is this crate's job.
    fn backend_type_of(&mut self, ty: &DeclType) -> BackendType;

    /// External policy: does this type need a materialized definition
    /// (default-value image global plus runtime type metadata), as opposed
    /// to being referenced opaquely?
    fn must_define(&mut self, def: &CompositeDef) -> bool;

    /// Emit the named, linkable constant global holding the type's
    /// default-value image. Symbol naming and linkage are host concerns.
    fn define_default_image(&mut self, def: &CompositeDef, image: &ConstValue);

    /// Invoke code generation for one direct member declaration.
    fn generate_member(&mut self, member: &MemberDecl);

    /// Emit runtime type-description metadata for a defined type.
    fn emit_type_metadata(&mut self, def: &CompositeDef);
}

/// Owned, compilation-unit-scoped state of the layout stage.
///
/// Holds the declared composite types, their resolution states and derived
/// layouts, per-field backend metadata, and the canonical-unpadded type
/// cache. Single-threaded by construction; every operation runs to
/// completion on the thread driving code generation.
pub struct LowerCtx {
    word: NativeWord,
    pub(crate) defs: FxHashMap<Symbol, CompositeDef>,
    pub(crate) states: FxHashMap<Symbol, ResolveState>,
    pub(crate) layouts: FxHashMap<Symbol, AggregateLayout>,
    pub(crate) field_infos: FxHashMap<Symbol, FieldInfo>,
    /// Aggregate type cache: declared symbol -> canonical unpadded type.
    /// Append-only within a compilation run.
    pub(crate) unpadded: FxHashMap<Symbol, BackendType>,
}

impl LowerCtx {
    pub fn new(word: NativeWord) -> Self {
        LowerCtx {
            word,
            defs: FxHashMap::default(),
            states: FxHashMap::default(),
            layouts: FxHashMap::default(),
            field_infos: FxHashMap::default(),
            unpadded: FxHashMap::default(),
        }
    }

    pub fn with_defs(word: NativeWord, defs: impl IntoIterator<Item = CompositeDef>) -> Self {
        let mut ctx = Self::new(word);
        for def in defs {
            ctx.upsert_def(def);
        }
        ctx
    }

    pub fn word(&self) -> NativeWord {
        self.word
    }

    /// Registers or replaces a composite declaration. Replacing is how a
    /// forward declaration is completed once its size becomes known.
    pub fn upsert_def(&mut self, def: CompositeDef) {
        self.defs.insert(def.symbol, def);
    }

    pub fn composite_def(&self, sym: Symbol) -> Option<&CompositeDef> {
        self.defs.get(&sym)
    }

    pub fn layout(&self, sym: Symbol) -> Option<&AggregateLayout> {
        self.layouts.get(&sym)
    }

    pub fn field_info(&self, field: Symbol) -> Option<&FieldInfo> {
        self.field_infos.get(&field)
    }

    pub fn state(&self, sym: Symbol) -> ResolveState {
        self.states.get(&sym).copied().unwrap_or_default()
    }

    pub(crate) fn set_state(&mut self, sym: Symbol, state: ResolveState) {
        self.states.insert(sym, state);
    }
}
