//! Gate library.
//!
//! Each [`GateKind`] fixes its arity and whether it takes an angle, and maps to
//! a [`GateRule`]: a 2×2 unitary for single-qubit gates, or a permutation /
//! phase-flip rule for the controlled and swap families. Operand order is
//! always controls first, then target(s).

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// Row-major 2×2 complex matrix.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// (1/√2)[[1, 1], [1, -1]]
pub const HADAMARD: Matrix2 = [
    [
        Complex64::new(FRAC_1_SQRT_2, 0.0),
        Complex64::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex64::new(FRAC_1_SQRT_2, 0.0),
        Complex64::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

pub const PAULI_Y: Matrix2 = [
    [ZERO, Complex64::new(0.0, -1.0)],
    [Complex64::new(0.0, 1.0), ZERO],
];

pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]];

/// diag(1, i)
pub const S_GATE: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(0.0, 1.0)]];

/// diag(1, -i)
pub const SDG_GATE: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(0.0, -1.0)]];

/// diag(1, e^{iπ/4})
pub const T_GATE: Matrix2 = [
    [ONE, ZERO],
    [ZERO, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)],
];

/// diag(1, e^{-iπ/4})
pub const TDG_GATE: Matrix2 = [
    [ONE, ZERO],
    [ZERO, Complex64::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)],
];

/// Rotation around X: [[cos θ/2, -i sin θ/2], [-i sin θ/2, cos θ/2]].
pub fn rx_matrix(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
    [[c, neg_i_s], [neg_i_s, c]]
}

/// Rotation around Y: [[cos θ/2, -sin θ/2], [sin θ/2, cos θ/2]].
pub fn ry_matrix(theta: f64) -> Matrix2 {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    [
        [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
        [Complex64::new(s, 0.0), Complex64::new(c, 0.0)],
    ]
}

/// Rotation around Z: diag(e^{-iθ/2}, e^{iθ/2}).
pub fn rz_matrix(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// Supported gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    // Single-qubit gates
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// S-dagger gate.
    Sdg,
    /// T-dagger gate.
    Tdg,
    /// Rotation around X axis.
    Rx,
    /// Rotation around Y axis.
    Ry,
    /// Rotation around Z axis.
    Rz,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,

    /// Computational-basis measurement.
    Measure,
}

/// Effect of a controlled gate on its target once every control bit is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetRule {
    /// Exchange the |0⟩ and |1⟩ target amplitudes.
    Flip,
    /// Negate the |1⟩ target amplitude.
    PhaseFlip,
    /// Apply a general 2×2 unitary to the target pair.
    Matrix(Matrix2),
}

/// How a gate acts on the amplitudes of the qubits it touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateRule {
    /// 2×2 unitary on a single qubit.
    Single(Matrix2),
    /// `controls` leading control qubits, then one target.
    Controlled {
        /// Number of control qubits.
        controls: usize,
        /// Action on the target.
        target: TargetRule,
    },
    /// Exchange of the last two qubits, gated on `controls` leading qubits.
    Swap {
        /// Number of control qubits.
        controls: usize,
    },
    /// Non-unitary marker; leaves the statevector untouched.
    Measure,
}

impl GateKind {
    /// Every gate kind, in library order.
    pub const ALL: [GateKind; 18] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::T,
        GateKind::Sdg,
        GateKind::Tdg,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::CX,
        GateKind::CY,
        GateKind::CZ,
        GateKind::Swap,
        GateKind::CCX,
        GateKind::CSwap,
        GateKind::Measure,
    ];

    /// Look up a gate by name token, case-insensitively.
    ///
    /// Accepts the aliases `cnot`, `toffoli` and `fredkin`.
    pub fn from_name(token: &str) -> Option<Self> {
        let kind = match token.trim().to_ascii_lowercase().as_str() {
            "h" => GateKind::H,
            "x" => GateKind::X,
            "y" => GateKind::Y,
            "z" => GateKind::Z,
            "s" => GateKind::S,
            "t" => GateKind::T,
            "sdg" => GateKind::Sdg,
            "tdg" => GateKind::Tdg,
            "rx" => GateKind::Rx,
            "ry" => GateKind::Ry,
            "rz" => GateKind::Rz,
            "cx" | "cnot" => GateKind::CX,
            "cy" => GateKind::CY,
            "cz" => GateKind::CZ,
            "swap" => GateKind::Swap,
            "ccx" | "toffoli" => GateKind::CCX,
            "cswap" | "fredkin" => GateKind::CSwap,
            "measure" => GateKind::Measure,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical lowercase name, as written in OpenQASM.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::S => "s",
            GateKind::T => "t",
            GateKind::Sdg => "sdg",
            GateKind::Tdg => "tdg",
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::Rz => "rz",
            GateKind::CX => "cx",
            GateKind::CY => "cy",
            GateKind::CZ => "cz",
            GateKind::Swap => "swap",
            GateKind::CCX => "ccx",
            GateKind::CSwap => "cswap",
            GateKind::Measure => "measure",
        }
    }

    /// Number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            GateKind::H
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::S
            | GateKind::T
            | GateKind::Sdg
            | GateKind::Tdg
            | GateKind::Rx
            | GateKind::Ry
            | GateKind::Rz
            | GateKind::Measure => 1,

            GateKind::CX | GateKind::CY | GateKind::CZ | GateKind::Swap => 2,

            GateKind::CCX | GateKind::CSwap => 3,
        }
    }

    /// Whether the gate takes a real-valued angle.
    #[inline]
    pub fn takes_angle(self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }

    /// Whether the gate is a measurement rather than a unitary.
    #[inline]
    pub fn is_measure(self) -> bool {
        matches!(self, GateKind::Measure)
    }

    /// 2×2 unitary of a single-qubit gate. `angle` is ignored by fixed gates.
    ///
    /// Returns `None` for multi-qubit gates and measurement.
    pub fn matrix(self, angle: f64) -> Option<Matrix2> {
        let matrix = match self {
            GateKind::H => HADAMARD,
            GateKind::X => PAULI_X,
            GateKind::Y => PAULI_Y,
            GateKind::Z => PAULI_Z,
            GateKind::S => S_GATE,
            GateKind::T => T_GATE,
            GateKind::Sdg => SDG_GATE,
            GateKind::Tdg => TDG_GATE,
            GateKind::Rx => rx_matrix(angle),
            GateKind::Ry => ry_matrix(angle),
            GateKind::Rz => rz_matrix(angle),
            _ => return None,
        };
        Some(matrix)
    }

    /// The local update rule for this gate. `angle` is ignored by fixed gates.
    pub fn rule(self, angle: f64) -> GateRule {
        match self {
            GateKind::CX => GateRule::Controlled {
                controls: 1,
                target: TargetRule::Flip,
            },
            GateKind::CY => GateRule::Controlled {
                controls: 1,
                target: TargetRule::Matrix(PAULI_Y),
            },
            GateKind::CZ => GateRule::Controlled {
                controls: 1,
                target: TargetRule::PhaseFlip,
            },
            GateKind::CCX => GateRule::Controlled {
                controls: 2,
                target: TargetRule::Flip,
            },
            GateKind::Swap => GateRule::Swap { controls: 0 },
            GateKind::CSwap => GateRule::Swap { controls: 1 },
            GateKind::Measure => GateRule::Measure,
            single => match single.matrix(angle) {
                Some(matrix) => GateRule::Single(matrix),
                None => GateRule::Measure,
            },
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
