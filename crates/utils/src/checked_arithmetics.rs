// Copyright 2024-2025 Irreducible Inc.

/// log2 implementation that fails when `val` is not a power of 2.
pub const fn checked_log_2(val: usize) -> usize {
	let result = val.ilog2();
	assert!(2usize.pow(result) == val);

	result as _
}

/// Smallest `k` such that `2^k >= val`. Returns 0 for `val <= 1`.
pub const fn log2_ceil_usize(val: usize) -> usize {
	if val <= 1 {
		0
	} else {
		(usize::BITS - (val - 1).leading_zeros()) as usize
	}
}
