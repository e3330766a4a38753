// Copyright 2025 Irreducible Inc.

#[derive(Debug)]
#[allow(dead_code)]
pub(super) struct FriFoldRoundData {
	round: usize,
	log_coset_size: usize,
	codeword_len: usize,
}

impl FriFoldRoundData {
	pub(super) fn new(round: usize, log_coset_size: usize, codeword_len: usize) -> Self {
		Self {
			round,
			log_coset_size,
			codeword_len,
		}
	}
}

#[derive(Debug)]
#[allow(dead_code)]
pub(super) struct QueryOpeningData {
	num_positions: usize,
	opened_leaves_by_tree: Vec<usize>,
}

impl QueryOpeningData {
	pub(super) fn new(num_positions: usize, opened_leaves_by_tree: Vec<usize>) -> Self {
		Self {
			num_positions,
			opened_leaves_by_tree,
		}
	}
}
