use crate::types::BackendType;
use cranelift_codegen::ir::Type as ClifType;

/// A constant backend value, as placed into aggregate slot sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    /// A scalar zero chunk of the given Cranelift type. This is what the
    /// zero-fill emitter produces for padding bytes.
    Zero(ClifType),
    /// An explicit scalar constant.
    Scalar { ty: ClifType, bits: u64 },
    /// A zeroed value of a non-scalar backend type occupying `size` bytes
    /// (zeroed arrays, opaque defaults).
    Zeroed { ty: BackendType, size: u64 },
    /// An ordered slot sequence; the constant image of an aggregate.
    Aggregate(Vec<ConstValue>),
}

impl ConstValue {
    /// Total byte size this constant occupies when laid out sequentially.
    pub fn byte_size(&self) -> u64 {
        match self {
            ConstValue::Zero(ty) => ty.bytes() as u64,
            ConstValue::Scalar { ty, .. } => ty.bytes() as u64,
            ConstValue::Zeroed { size, .. } => *size,
            ConstValue::Aggregate(slots) => slots.iter().map(ConstValue::byte_size).sum(),
        }
    }

    /// True if every byte of this constant is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            ConstValue::Zero(_) | ConstValue::Zeroed { .. } => true,
            ConstValue::Scalar { bits, .. } => *bits == 0,
            ConstValue::Aggregate(slots) => slots.iter().all(ConstValue::is_zero),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cranelift_codegen::ir::types;

    #[test]
    fn aggregate_size_is_the_sum_of_its_slots() {
        let agg = ConstValue::Aggregate(vec![
            ConstValue::Zero(types::I8),
            ConstValue::Scalar { ty: types::I32, bits: 7 },
            ConstValue::Zeroed { ty: BackendType::Scalar(types::I64), size: 11 },
        ]);
        assert_eq!(agg.byte_size(), 1 + 4 + 11);
    }

    #[test]
    fn zero_detection_looks_through_aggregates() {
        let all_zero = ConstValue::Aggregate(vec![
            ConstValue::Zero(types::I16),
            ConstValue::Aggregate(vec![ConstValue::Scalar { ty: types::I8, bits: 0 }]),
        ]);
        assert!(all_zero.is_zero());

        let tainted = ConstValue::Aggregate(vec![
            ConstValue::Zero(types::I16),
            ConstValue::Scalar { ty: types::I8, bits: 1 },
        ]);
        assert!(!tainted.is_zero());
    }
}
