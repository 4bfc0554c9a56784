//! Statevector simulation engine.
//!
//! Every gate is applied as a local update: the 2^n basis indices are split
//! into groups that differ only in the bits of the gate's qubits, and each
//! group of 2^k amplitudes is rewritten in place. No 2^n × 2^n matrix is ever
//! formed. Controlled gates only visit groups whose control bits are set.

use num_complex::Complex64;
use serde::Serialize;

use qlab_ir::{GateRule, Matrix2, Operation, QubitId, TargetRule};

use crate::error::{SimError, SimResult};

/// A statevector representing a pure quantum state.
///
/// Amplitude `i` belongs to the basis state whose binary expansion has bit
/// `k` equal to the value of qubit `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

/// Amplitudes split into real and imaginary parts, for JSON reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateVectorParts {
    pub real: Vec<f64>,
    pub imag: Vec<f64>,
}

impl StateVector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// The amplitude array is reserved fallibly, so an oversized request
    /// fails with [`SimError::AllocationFailed`] instead of aborting.
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        let alloc_error = || SimError::AllocationFailed {
            num_qubits,
            bytes: 1usize
                .checked_shl(num_qubits as u32)
                .and_then(|len| len.checked_mul(size_of::<Complex64>()))
                .unwrap_or(usize::MAX),
        };

        let len = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .filter(|len| len.checked_mul(size_of::<Complex64>()).is_some())
            .ok_or_else(alloc_error)?;

        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(len)
            .map_err(|_| alloc_error())?;
        amplitudes.resize(len, Complex64::new(0.0, 0.0));
        amplitudes[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^n).
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false; a statevector has at least one amplitude.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// All amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Sum of squared magnitudes; 1 for a normalized state.
    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Outcome probabilities |aᵢ|², unfiltered, in basis-index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Split the amplitudes into real and imaginary parts.
    pub fn to_parts(&self) -> StateVectorParts {
        StateVectorParts {
            real: self.amplitudes.iter().map(|a| a.re).collect(),
            imag: self.amplitudes.iter().map(|a| a.im).collect(),
        }
    }

    /// Apply one operation. Measurements leave the state untouched.
    ///
    /// The operation must have been validated against this state's qubit
    /// count (every operation inside a [`Circuit`](qlab_ir::Circuit) is).
    pub fn apply(&mut self, op: &Operation) {
        let qubits = op.qubits.as_slice();
        match op.rule() {
            GateRule::Single(matrix) => self.apply_single(qubits[0], &matrix),
            GateRule::Controlled { controls, target } => {
                self.apply_controlled(&qubits[..controls], qubits[controls], target);
            }
            GateRule::Swap { controls } => {
                self.apply_swap(&qubits[..controls], qubits[controls], qubits[controls + 1]);
            }
            GateRule::Measure => {}
        }
    }

    // =========================================================================
    // Local-update kernels
    // =========================================================================

    /// 2×2 unitary on the pairs (i, i | bit).
    fn apply_single(&mut self, qubit: QubitId, m: &Matrix2) {
        let mask = qubit.mask();
        let amps = &mut self.amplitudes;
        for_each_group(self.num_qubits, &[qubit], |i| {
            let j = i | mask;
            let (a, b) = (amps[i], amps[j]);
            amps[i] = m[0][0] * a + m[0][1] * b;
            amps[j] = m[1][0] * a + m[1][1] * b;
        });
    }

    /// Target update on the groups whose control bits are all set.
    fn apply_controlled(&mut self, controls: &[QubitId], target: QubitId, rule: TargetRule) {
        let ctrl_mask = controls.iter().fold(0, |acc, q| acc | q.mask());
        let tgt_mask = target.mask();
        let mut touched = [QubitId(0); 3];
        let touched = qubit_set(&mut touched, controls, &[target]);

        let amps = &mut self.amplitudes;
        match rule {
            TargetRule::Flip => for_each_group(self.num_qubits, touched, |base| {
                let i = base | ctrl_mask;
                amps.swap(i, i | tgt_mask);
            }),
            TargetRule::PhaseFlip => for_each_group(self.num_qubits, touched, |base| {
                let j = base | ctrl_mask | tgt_mask;
                amps[j] = -amps[j];
            }),
            TargetRule::Matrix(m) => for_each_group(self.num_qubits, touched, |base| {
                let i = base | ctrl_mask;
                let j = i | tgt_mask;
                let (a, b) = (amps[i], amps[j]);
                amps[i] = m[0][0] * a + m[0][1] * b;
                amps[j] = m[1][0] * a + m[1][1] * b;
            }),
        }
    }

    /// Exchange |…1…0…⟩ and |…0…1…⟩ on (a, b) where the controls are set.
    fn apply_swap(&mut self, controls: &[QubitId], a: QubitId, b: QubitId) {
        let ctrl_mask = controls.iter().fold(0, |acc, q| acc | q.mask());
        let (mask_a, mask_b) = (a.mask(), b.mask());
        let mut touched = [QubitId(0); 3];
        let touched = qubit_set(&mut touched, controls, &[a, b]);

        let amps = &mut self.amplitudes;
        for_each_group(self.num_qubits, touched, |base| {
            let base = base | ctrl_mask;
            amps.swap(base | mask_a, base | mask_b);
        });
    }
}

/// Copy `controls` and `targets` into `buf`, returning the filled prefix.
fn qubit_set<'a>(
    buf: &'a mut [QubitId; 3],
    controls: &[QubitId],
    targets: &[QubitId],
) -> &'a [QubitId] {
    let n = controls.len() + targets.len();
    buf[..controls.len()].copy_from_slice(controls);
    buf[controls.len()..n].copy_from_slice(targets);
    &buf[..n]
}

/// Call `f` with the lowest index of every group: each of the 2^(n−k)
/// indices whose bits at `qubits` are all zero.
#[inline]
fn for_each_group(num_qubits: usize, qubits: &[QubitId], mut f: impl FnMut(usize)) {
    let mut positions = [0usize; 3];
    let positions = &mut positions[..qubits.len()];
    for (p, q) in positions.iter_mut().zip(qubits) {
        *p = q.index();
    }
    positions.sort_unstable();

    let groups = 1usize << (num_qubits - qubits.len());
    for k in 0..groups {
        let mut base = k;
        // Insert a zero bit at each position, lowest first.
        for &p in positions.iter() {
            let low = base & ((1 << p) - 1);
            base = ((base >> p) << (p + 1)) | low;
        }
        f(base);
    }
}
