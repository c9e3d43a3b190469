use crate::types::BackendType;

/// Identifies the result of an emitted instruction within one emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(pub u32);

/// Comparison predicate for aggregate equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpPred {
    Eq,
    Ne,
}

/// One backend instruction. The set is intentionally small: exactly what
/// composite-type lowering needs to address fields, move values between
/// padded and unpadded shapes, and compare byte images.
#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    /// A value handed in from outside the emitted sequence (a function
    /// parameter or an address produced by earlier code generation).
    Param { index: usize, ty: BackendType },
    /// A fresh aggregate value of `ty` with no slot yet defined.
    Undef { ty: BackendType },
    /// Address of slot `slot` (at byte `offset`) within the aggregate that
    /// `base` points to.
    SlotAddr { base: ValueId, slot: usize, offset: u64 },
    /// `base` advanced by `bytes`; only ever applied to byte pointers.
    ByteOffset { base: ValueId, bytes: u64 },
    /// Reinterpret the pointer `base` as pointing to `pointee`.
    PtrCast { base: ValueId, pointee: BackendType },
    /// Load a value of `ty` from `addr`.
    Load { ty: BackendType, addr: ValueId },
    /// Store `value` to `addr`. Produces no meaningful result.
    Store { value: ValueId, addr: ValueId },
    /// `aggregate` with slot `index` replaced by `value`.
    InsertValue { aggregate: ValueId, value: ValueId, index: usize },
    /// Slot `index` of `aggregate`.
    ExtractValue { aggregate: ValueId, index: usize },
    /// Flat byte comparison of `len` bytes at `lhs` and `rhs`; yields zero
    /// when the regions are identical.
    MemCmp { lhs: ValueId, rhs: ValueId, len: u64 },
    /// Boolean comparison of `value` against zero under `pred`.
    CmpZero { pred: CmpPred, value: ValueId },
}

/// Appends instructions for one function body and hands out value ids.
#[derive(Debug, Default)]
pub struct FuncEmitter {
    insts: Vec<Inst>,
}

impl FuncEmitter {
    pub fn new() -> Self {
        FuncEmitter { insts: Vec::new() }
    }

    fn push(&mut self, inst: Inst) -> ValueId {
        let id = ValueId(self.insts.len() as u32);
        self.insts.push(inst);
        id
    }

    pub fn param(&mut self, index: usize, ty: BackendType) -> ValueId {
        self.push(Inst::Param { index, ty })
    }

    pub fn undef(&mut self, ty: BackendType) -> ValueId {
        self.push(Inst::Undef { ty })
    }

    pub fn slot_addr(&mut self, base: ValueId, slot: usize, offset: u64) -> ValueId {
        self.push(Inst::SlotAddr { base, slot, offset })
    }

    pub fn byte_offset(&mut self, base: ValueId, bytes: u64) -> ValueId {
        self.push(Inst::ByteOffset { base, bytes })
    }

    pub fn ptr_cast(&mut self, base: ValueId, pointee: BackendType) -> ValueId {
        self.push(Inst::PtrCast { base, pointee })
    }

    pub fn load(&mut self, ty: BackendType, addr: ValueId) -> ValueId {
        self.push(Inst::Load { ty, addr })
    }

    pub fn store(&mut self, value: ValueId, addr: ValueId) -> ValueId {
        self.push(Inst::Store { value, addr })
    }

    pub fn insert_value(&mut self, aggregate: ValueId, value: ValueId, index: usize) -> ValueId {
        self.push(Inst::InsertValue { aggregate, value, index })
    }

    pub fn extract_value(&mut self, aggregate: ValueId, index: usize) -> ValueId {
        self.push(Inst::ExtractValue { aggregate, index })
    }

    pub fn memcmp(&mut self, lhs: ValueId, rhs: ValueId, len: u64) -> ValueId {
        self.push(Inst::MemCmp { lhs, rhs, len })
    }

    pub fn cmp_zero(&mut self, pred: CmpPred, value: ValueId) -> ValueId {
        self.push(Inst::CmpZero { pred, value })
    }

    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn inst(&self, id: ValueId) -> &Inst {
        &self.insts[id.0 as usize]
    }
}
