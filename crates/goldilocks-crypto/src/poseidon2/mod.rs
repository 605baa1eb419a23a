//! Poseidon2 sponge over the Goldilocks field.
//!
//! Parameters:
//! - State width: 12 elements (rate 8, capacity 4)
//! - Full rounds: 8 (4 before and 4 after the partial rounds)
//! - Partial rounds: 22
//! - S-box: x^7
//!
//! Inputs are absorbed by field addition into the rate lanes, with no
//! padding. Outputs are squeezed from the rate lanes.

mod constants;

use crate::field::{Fp, Fp5};
use constants::{EXTERNAL_CONSTANTS, FULL_ROUNDS, INTERNAL_CONSTANTS, MATRIX_DIAG_12};

/// State width (number of field elements).
pub const WIDTH: usize = 12;

/// Absorption rate.
pub const RATE: usize = 8;

/// Number of partial rounds (one S-box per round).
pub const PARTIAL_ROUNDS: usize = 22;

const HALF_FULL_ROUNDS: usize = FULL_ROUNDS / 2;

/// Four-element digest used for tree-style hashing.
pub type HashOut = [Fp; 4];

/// Sponge state.
#[derive(Clone, Debug, Default)]
pub struct Poseidon2 {
    state: [Fp; WIDTH],
}

impl Poseidon2 {
    /// Create a sponge with an all-zero state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb input in rate-sized chunks, permuting after each chunk.
    pub fn absorb(&mut self, input: &[Fp]) {
        for chunk in input.chunks(RATE) {
            for (lane, &value) in self.state.iter_mut().zip(chunk) {
                *lane += value;
            }
            permute(&mut self.state);
        }
    }

    /// Read `count` elements from the rate lanes, permuting between blocks.
    pub fn squeeze(&mut self, count: usize) -> Vec<Fp> {
        let mut outputs = Vec::with_capacity(count);
        loop {
            for &lane in &self.state[..RATE] {
                if outputs.len() == count {
                    return outputs;
                }
                outputs.push(lane);
            }
            if outputs.len() == count {
                return outputs;
            }
            permute(&mut self.state);
        }
    }

    pub fn state(&self) -> &[Fp; WIDTH] {
        &self.state
    }
}

/// Apply the Poseidon2 permutation in place.
pub fn permute(state: &mut [Fp; WIDTH]) {
    external_linear_layer(state);
    full_rounds(state, 0);
    partial_rounds(state);
    full_rounds(state, HALF_FULL_ROUNDS);
}

fn full_rounds(state: &mut [Fp; WIDTH], start: usize) {
    for round_constants in &EXTERNAL_CONSTANTS[start..start + HALF_FULL_ROUNDS] {
        for (lane, &rc) in state.iter_mut().zip(round_constants) {
            *lane = sbox(*lane + rc);
        }
        external_linear_layer(state);
    }
}

fn partial_rounds(state: &mut [Fp; WIDTH]) {
    for &rc in &INTERNAL_CONSTANTS {
        state[0] = sbox(state[0] + rc);
        internal_linear_layer(state);
    }
}

/// x^7
#[inline]
fn sbox(x: Fp) -> Fp {
    let x2 = x.square();
    let x3 = x2 * x;
    x3.square() * x
}

/// Circulant 4x4 block applied to each window of four lanes, then each
/// lane gains the sum of its residue class mod 4.
fn external_linear_layer(s: &mut [Fp; WIDTH]) {
    for window in s.chunks_exact_mut(4) {
        let t0 = window[0] + window[1];
        let t1 = window[2] + window[3];
        let t2 = t0 + t1;
        let t3 = t2 + window[1];
        let t4 = t2 + window[3];
        let t5 = window[0].double();
        let t6 = window[2].double();

        window[0] = t3 + t0;
        window[1] = t6 + t3;
        window[2] = t1 + t4;
        window[3] = t5 + t4;
    }

    let sums: [Fp; 4] = std::array::from_fn(|k| s[k] + s[k + 4] + s[k + 8]);
    for (i, lane) in s.iter_mut().enumerate() {
        *lane += sums[i % 4];
    }
}

fn internal_linear_layer(state: &mut [Fp; WIDTH]) {
    let sum: Fp = state.iter().copied().sum();
    for (lane, &diag) in state.iter_mut().zip(&MATRIX_DIAG_12) {
        *lane = *lane * diag + sum;
    }
}

/// Hash without padding into `num_outputs` elements.
pub fn hash_n_to_m_no_pad(input: &[Fp], num_outputs: usize) -> Vec<Fp> {
    let mut sponge = Poseidon2::new();
    sponge.absorb(input);
    sponge.squeeze(num_outputs)
}

/// Hash to a single quintic-extension element. Empty input hashes to zero.
pub fn hash_to_fp5(input: &[Fp]) -> Fp5 {
    let mut sponge = Poseidon2::new();
    sponge.absorb(input);
    let out = sponge.squeeze(5);
    Fp5::new([out[0], out[1], out[2], out[3], out[4]])
}

/// Hash without padding into a four-element digest.
pub fn hash_no_pad(input: &[Fp]) -> HashOut {
    let mut sponge = Poseidon2::new();
    sponge.absorb(input);
    let out = sponge.squeeze(4);
    [out[0], out[1], out[2], out[3]]
}

/// Compress two digests into one.
pub fn hash_two_to_one(left: &HashOut, right: &HashOut) -> HashOut {
    let mut input = [Fp::ZERO; 8];
    input[..4].copy_from_slice(left);
    input[4..].copy_from_slice(right);
    hash_no_pad(&input)
}
