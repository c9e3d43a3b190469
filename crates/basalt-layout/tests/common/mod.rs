//! Shared test fixtures: a recording mock of the codegen host and a tiny
//! byte-image evaluator for emitted instruction sequences.
#![allow(dead_code)]

use basalt_hir::{CompositeDef, DeclType, MemberDecl, PrimitiveType, Symbol};
use basalt_ir::{BackendType, CmpPred, ConstValue, FuncEmitter, Inst, ValueId};
use basalt_layout::CodegenHost;
use cranelift_codegen::ir::types;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Records every collaborator call the layout stage makes.
#[derive(Default)]
pub struct MockHost {
    pub define_all: bool,
    pub backend_type_calls: Vec<DeclType>,
    pub defined: Vec<(Symbol, ConstValue)>,
    pub generated_members: Vec<Symbol>,
    pub metadata: Vec<Symbol>,
}

impl MockHost {
    pub fn defining() -> Self {
        MockHost { define_all: true, ..Default::default() }
    }
}

impl CodegenHost for MockHost {
    fn backend_type_of(&mut self, ty: &DeclType) -> BackendType {
        self.backend_type_calls.push(ty.clone());
        lower_decl_type(ty)
    }

    fn must_define(&mut self, _def: &CompositeDef) -> bool {
        self.define_all
    }

    fn define_default_image(&mut self, def: &CompositeDef, image: &ConstValue) {
        self.defined.push((def.symbol, image.clone()));
    }

    fn generate_member(&mut self, member: &MemberDecl) {
        self.generated_members.push(member.symbol);
    }

    fn emit_type_metadata(&mut self, def: &CompositeDef) {
        self.metadata.push(def.symbol);
    }
}

fn lower_decl_type(ty: &DeclType) -> BackendType {
    match ty {
        DeclType::Primitive(p) => BackendType::Scalar(match p {
            PrimitiveType::I8 | PrimitiveType::U8 | PrimitiveType::Bool => types::I8,
            PrimitiveType::I16 | PrimitiveType::U16 => types::I16,
            PrimitiveType::I32 | PrimitiveType::U32 | PrimitiveType::Char => types::I32,
            PrimitiveType::I64 | PrimitiveType::U64 | PrimitiveType::Ptr => types::I64,
            PrimitiveType::F32 => types::F32,
            PrimitiveType::F64 => types::F64,
        }),
        DeclType::Array { elem, len } => BackendType::Array {
            elem: Box::new(lower_decl_type(elem)),
            len: *len,
        },
        DeclType::Composite(sym) => BackendType::Named(*sym),
    }
}

/// A value flowing through the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalValue {
    None,
    Addr(u64),
    Int { bits: u64, width: u8 },
    Agg(Vec<EvalValue>),
}

impl EvalValue {
    fn addr(&self) -> u64 {
        match self {
            EvalValue::Addr(a) => *a,
            other => panic!("expected address, got {other:?}"),
        }
    }
}

/// Executes an emitted instruction sequence against a flat byte buffer.
/// Supports exactly the instruction shapes composite lowering emits; loads
/// and stores must be scalar.
pub struct Evaluator {
    pub mem: Vec<u8>,
}

impl Evaluator {
    pub fn new(size: usize) -> Self {
        Evaluator { mem: vec![0; size] }
    }

    pub fn write_scalar(&mut self, addr: u64, bits: u64, width: u8) {
        let bytes = bits.to_le_bytes();
        self.mem[addr as usize..addr as usize + width as usize]
            .copy_from_slice(&bytes[..width as usize]);
    }

    pub fn run(&mut self, emit: &FuncEmitter, params: &[EvalValue]) -> Vec<EvalValue> {
        let mut values: Vec<EvalValue> = Vec::with_capacity(emit.insts().len());
        for inst in emit.insts() {
            let value = match inst {
                Inst::Param { index, .. } => params[*index].clone(),
                Inst::Undef { ty } => match ty {
                    BackendType::Record(slots) => EvalValue::Agg(vec![EvalValue::None; slots.len()]),
                    _ => EvalValue::None,
                },
                Inst::SlotAddr { base, offset, .. } => {
                    EvalValue::Addr(values[base.0 as usize].addr() + offset)
                }
                Inst::ByteOffset { base, bytes } => {
                    EvalValue::Addr(values[base.0 as usize].addr() + bytes)
                }
                Inst::PtrCast { base, .. } => values[base.0 as usize].clone(),
                Inst::Load { ty, addr } => {
                    let width = scalar_width(ty);
                    let at = values[addr.0 as usize].addr() as usize;
                    let mut bytes = [0u8; 8];
                    bytes[..width as usize].copy_from_slice(&self.mem[at..at + width as usize]);
                    EvalValue::Int { bits: u64::from_le_bytes(bytes), width }
                }
                Inst::Store { value, addr } => {
                    let at = values[addr.0 as usize].addr();
                    match values[value.0 as usize].clone() {
                        EvalValue::Int { bits, width } => self.write_scalar(at, bits, width),
                        other => panic!("store of non-scalar value {other:?}"),
                    }
                    EvalValue::None
                }
                Inst::InsertValue { aggregate, value, index } => {
                    let mut agg = match values[aggregate.0 as usize].clone() {
                        EvalValue::Agg(slots) => slots,
                        other => panic!("insert into non-aggregate {other:?}"),
                    };
                    agg[*index] = values[value.0 as usize].clone();
                    EvalValue::Agg(agg)
                }
                Inst::ExtractValue { aggregate, index } => match &values[aggregate.0 as usize] {
                    EvalValue::Agg(slots) => slots[*index].clone(),
                    other => panic!("extract from non-aggregate {other:?}"),
                },
                Inst::MemCmp { lhs, rhs, len } => {
                    let l = values[lhs.0 as usize].addr() as usize;
                    let r = values[rhs.0 as usize].addr() as usize;
                    let equal = self.mem[l..l + *len as usize] == self.mem[r..r + *len as usize];
                    EvalValue::Int { bits: u64::from(!equal), width: 4 }
                }
                Inst::CmpZero { pred, value } => {
                    let bits = match values[value.0 as usize] {
                        EvalValue::Int { bits, .. } => bits,
                        ref other => panic!("cmp of non-scalar {other:?}"),
                    };
                    let result = match pred {
                        CmpPred::Eq => bits == 0,
                        CmpPred::Ne => bits != 0,
                    };
                    EvalValue::Int { bits: u64::from(result), width: 1 }
                }
            };
            values.push(value);
        }
        values
    }

    pub fn bool_result(values: &[EvalValue], id: ValueId) -> bool {
        match values[id.0 as usize] {
            EvalValue::Int { bits, .. } => bits != 0,
            ref other => panic!("expected boolean result, got {other:?}"),
        }
    }
}

fn scalar_width(ty: &BackendType) -> u8 {
    match ty {
        BackendType::Scalar(t) => t.bytes() as u8,
        other => panic!("evaluator only loads/stores scalars, got {other:?}"),
    }
}
