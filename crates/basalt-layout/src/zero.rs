use basalt_ir::{ConstValue, NativeWord};
use cranelift_codegen::ir::{types, Type as ClifType};

/// Scalar chunk types that cover exactly `n` zero bytes.
///
/// At each step the widest chunk that evenly divides the remaining count is
/// chosen: the native word (8 only on 64-bit targets), else 4, else 2,
/// else 1. Never overshoots; `n == 0` yields nothing.
pub fn zero_chunks(mut n: u64, word: NativeWord) -> Vec<ClifType> {
    let mut chunks = Vec::new();
    while n > 0 {
        let ty = if word == NativeWord::W8 && n % 8 == 0 {
            types::I64
        } else if n % 4 == 0 {
            types::I32
        } else if n % 2 == 0 {
            types::I16
        } else {
            types::I8
        };
        chunks.push(ty);
        n -= ty.bytes() as u64;
    }
    chunks
}

/// Appends zero constants summing to exactly `n` bytes to `values`.
/// Returns the number of slots appended.
pub fn push_zero_fill(values: &mut Vec<ConstValue>, n: u64, word: NativeWord) -> usize {
    let before = values.len();
    for ty in zero_chunks(n, word) {
        values.push(ConstValue::Zero(ty));
    }
    values.len() - before
}
