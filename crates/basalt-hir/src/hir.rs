use miette::SourceSpan;
use std::fmt;
use std::sync::Arc;

// --- Core HIR structures for composite-type lowering ---

/// Unique identifier for a declaration (type, field, function, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub u32);

impl Symbol {
    pub fn new(id: u32) -> Self {
        Symbol(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primitive types the frontend can declare for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Char,
    Ptr,
}

/// The declared type of a field, as the frontend resolved it.
///
/// This is deliberately a closed set of kinds: the layout engine only ever
/// needs to know whether a field is a scalar, an array, or a nested
/// composite. Anything finer-grained (what backend type a primitive maps
/// to) is the type-lowering collaborator's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclType {
    Primitive(PrimitiveType),
    Array { elem: Arc<DeclType>, len: u64 },
    Composite(Symbol),
}

impl DeclType {
    pub fn is_composite(&self) -> bool {
        matches!(self, DeclType::Composite(_))
    }
}

/// A field declaration inside a composite type.
///
/// `offset` and `size` are the frontend's declared byte layout. Offsets are
/// not necessarily increasing in declaration order: union members share an
/// offset range.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub symbol: Symbol,
    pub name: String,
    pub ty: DeclType,
    pub offset: u64,
    pub size: u64,
    pub span: SourceSpan,
}

/// Kinds of direct member declarations carried by a composite type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    NestedType,
    Function,
}

/// A direct member declaration of a composite type. The layout engine does
/// not generate code for members itself; it hands each one to the host's
/// member code-generation entry point once the type is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDecl {
    pub symbol: Symbol,
    pub name: String,
    pub kind: MemberKind,
    pub span: SourceSpan,
}

/// A frontend composite (record or union) type declaration.
///
/// `size` is `None` for forward declarations whose layout the frontend has
/// not finished computing; such types only ever get a nominal backend type.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeDef {
    pub symbol: Symbol,
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub members: Vec<MemberDecl>,
    pub size: Option<u64>,
    pub span: SourceSpan,
}

impl CompositeDef {
    pub fn size_known(&self) -> bool {
        self.size.is_some()
    }

    /// Declaration-order index of a field by symbol.
    pub fn field_index(&self, field: Symbol) -> Option<usize> {
        self.fields.iter().position(|f| f.symbol == field)
    }
}
