//! Operations: a gate applied to concrete qubits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateKind, GateRule};
use crate::qubit::QubitId;

/// One applied gate.
///
/// Qubits are ordered controls first, then target(s). Use
/// [`Operation::validate`] (or [`Circuit::new`](crate::Circuit::new)) to check
/// the invariants against a qubit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate.
    pub kind: GateKind,
    /// Qubits this operation acts on.
    pub qubits: Vec<QubitId>,
    /// Rotation angle in radians, present iff the gate takes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Operation {
    /// Create an operation from its parts.
    pub fn new(
        kind: GateKind,
        qubits: impl IntoIterator<Item = QubitId>,
        angle: Option<f64>,
    ) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            angle,
        }
    }

    /// Create a fixed (angle-free) gate operation.
    pub fn gate(kind: GateKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::new(kind, qubits, None)
    }

    /// Create a rotation operation.
    pub fn rotation(kind: GateKind, qubit: QubitId, angle: f64) -> Self {
        Self::new(kind, [qubit], Some(angle))
    }

    /// Create a measurement of one qubit.
    pub fn measure(qubit: QubitId) -> Self {
        Self::new(GateKind::Measure, [qubit], None)
    }

    /// Gate name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        self.kind.is_measure()
    }

    /// Local update rule the simulator applies for this operation.
    pub fn rule(&self) -> GateRule {
        self.kind.rule(self.angle.unwrap_or_default())
    }

    /// Check arity, bounds, distinctness and angle presence.
    pub fn validate(&self, num_qubits: usize) -> IrResult<()> {
        let gate_name = self.kind.name();
        let expected = self.kind.num_qubits();
        if self.qubits.len() != expected {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate_name.to_string(),
                expected,
                got: self.qubits.len(),
            });
        }

        for (i, &qubit) in self.qubits.iter().enumerate() {
            if qubit.index() >= num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: Some(gate_name.to_string()),
                });
            }
            if self.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate_name.to_string()),
                });
            }
        }

        match (self.kind.takes_angle(), self.angle) {
            (true, None) => Err(IrError::MissingAngle(gate_name.to_string())),
            (false, Some(_)) => Err(IrError::UnexpectedAngle(gate_name.to_string())),
            (true, Some(angle)) if !angle.is_finite() => Err(IrError::NonFiniteAngle {
                gate_name: gate_name.to_string(),
                angle,
            }),
            _ => Ok(()),
        }
    }
}
