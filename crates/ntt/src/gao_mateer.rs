// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::AffineSubspace;
use preon_utils::rayon::should_parallelize;

use crate::{
	additive_ntt::AdditiveNTT,
	error::Error,
	twiddle::{precompute_levels, TwiddleLevel},
};

/// Recursive additive FFT with precomputed twiddles.
///
/// Both halves of each recursion step run on the rayon pool once they are large enough.
#[derive(Debug, Clone)]
pub struct GaoMateerNTT<F: BinaryField> {
	domain: AffineSubspace<F>,
	levels: Vec<TwiddleLevel<F>>,
}

impl<F: BinaryField> GaoMateerNTT<F> {
	pub fn new(domain: AffineSubspace<F>) -> Result<Self, Error> {
		let levels = precompute_levels(&domain)?;
		Ok(Self { domain, levels })
	}

	pub fn log_domain_size(&self) -> usize {
		self.domain.dim()
	}
}

impl<F: BinaryField> AdditiveNTT<F> for GaoMateerNTT<F> {
	fn domain(&self) -> &AffineSubspace<F> {
		&self.domain
	}

	#[tracing::instrument("GaoMateerNTT::forward_transform", skip_all, level = "trace")]
	fn forward_transform(&self, coeffs: &[F]) -> Result<Vec<F>, Error> {
		let n = self.domain.size();
		if coeffs.len() > n {
			return Err(Error::DomainTooSmall {
				len: coeffs.len(),
				log_domain_size: self.domain.dim(),
			});
		}
		let mut data = coeffs.to_vec();
		data.resize(n, F::ZERO);
		forward(&mut data, &self.levels);
		Ok(data)
	}

	#[tracing::instrument("GaoMateerNTT::inverse_transform", skip_all, level = "trace")]
	fn inverse_transform(&self, evals: &[F]) -> Result<Vec<F>, Error> {
		if evals.len() != self.domain.size() {
			return Err(Error::IncorrectEvaluationCount {
				expected: self.domain.size(),
				actual: evals.len(),
			});
		}
		let mut data = evals.to_vec();
		inverse(&mut data, &self.levels);
		Ok(data)
	}
}

fn forward<F: BinaryField>(data: &mut [F], levels: &[TwiddleLevel<F>]) {
	let Some((level, rest)) = levels.split_first() else {
		return;
	};
	let half = data.len() / 2;

	scale_by_powers(data, level.b0);
	taylor_expand(data);

	let mut halves = deinterleave(data);
	let (g0, g1) = halves.split_at_mut(half);
	if should_parallelize(data.len()) {
		rayon::join(|| forward(g0, rest), || forward(g1, rest));
	} else {
		forward(g0, rest);
		forward(g1, rest);
	}

	for (j, (&e0, &e1)) in g0.iter().zip(g1.iter()).enumerate() {
		let even = e0 + level.twiddles[j] * e1;
		data[2 * j] = even;
		data[2 * j + 1] = even + e1;
	}
}

fn inverse<F: BinaryField>(data: &mut [F], levels: &[TwiddleLevel<F>]) {
	let Some((level, rest)) = levels.split_first() else {
		return;
	};
	let half = data.len() / 2;

	let mut halves = vec![F::ZERO; data.len()];
	for j in 0..half {
		let e1 = data[2 * j] + data[2 * j + 1];
		halves[j] = data[2 * j] + level.twiddles[j] * e1;
		halves[half + j] = e1;
	}

	let (g0, g1) = halves.split_at_mut(half);
	if should_parallelize(data.len()) {
		rayon::join(|| inverse(g0, rest), || inverse(g1, rest));
	} else {
		inverse(g0, rest);
		inverse(g1, rest);
	}

	for j in 0..half {
		data[2 * j] = g0[j];
		data[2 * j + 1] = g1[j];
	}
	inverse_taylor_expand(data);
	scale_by_powers(data, level.b0_inv);
}

/// Multiplies the `k`-th entry by `base^k`, i.e. substitutes `base * X` for `X`.
fn scale_by_powers<F: BinaryField>(data: &mut [F], base: F) {
	let mut power = F::ONE;
	for value in data.iter_mut() {
		*value *= power;
		power *= base;
	}
}

/// Rewrites `f` in place as `sum_i (a_{2i} + a_{2i+1} X) (X^2 + X)^i`.
///
/// Each pass splits blocks of `4s` coefficients `A + B X^s + C X^{2s} + D X^{3s}` into
/// `P + Q (X^{2s} + X^s)`, which holds because `(X^2 + X)^s = X^{2s} + X^s` when `s` is a power
/// of two.
fn taylor_expand<F: BinaryField>(data: &mut [F]) {
	let n = data.len();
	let mut stride = n / 4;
	while stride >= 1 {
		for block in data.chunks_exact_mut(4 * stride) {
			for i in 0..stride {
				let d = block[3 * stride + i];
				block[2 * stride + i] += d;
				let c = block[2 * stride + i];
				block[stride + i] += c;
			}
		}
		stride /= 2;
	}
}

fn inverse_taylor_expand<F: BinaryField>(data: &mut [F]) {
	let n = data.len();
	let mut stride = 1;
	while 4 * stride <= n {
		for block in data.chunks_exact_mut(4 * stride) {
			for i in 0..stride {
				let c = block[2 * stride + i];
				block[stride + i] += c;
				let d = block[3 * stride + i];
				block[2 * stride + i] += d;
			}
		}
		stride *= 2;
	}
}

/// Moves even-indexed entries to the first half and odd-indexed entries to the second.
fn deinterleave<F: BinaryField>(data: &[F]) -> Vec<F> {
	let half = data.len() / 2;
	let mut out = vec![F::ZERO; data.len()];
	for j in 0..half {
		out[j] = data[2 * j];
		out[half + j] = data[2 * j + 1];
	}
	out
}
