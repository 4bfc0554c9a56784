//! Immutable circuit model.

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::operation::Operation;

/// A quantum circuit: a fixed qubit count and an ordered operation list.
///
/// Operation order is evaluation order. A `Circuit` can only be obtained
/// through validation, so every operation is in range, has distinct qubits and
/// carries an angle exactly when its gate needs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Number of qubits.
    num_qubits: u32,
    /// Operations in evaluation order.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create a circuit, validating every operation.
    pub fn new(num_qubits: u32, operations: Vec<Operation>) -> IrResult<Self> {
        if num_qubits == 0 {
            return Err(IrError::InvalidQubitCount(0));
        }
        for op in &operations {
            op.validate(num_qubits as usize)?;
        }
        Ok(Self {
            num_qubits,
            operations,
        })
    }

    /// Create a circuit with no operations.
    pub fn empty(num_qubits: u32) -> IrResult<Self> {
        Self::new(num_qubits, vec![])
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the operations in evaluation order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations, measurements included.
    pub fn gate_count(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit contains any measurement.
    pub fn has_measurements(&self) -> bool {
        self.operations.iter().any(Operation::is_measure)
    }

    /// Iterate over the non-measurement operations.
    pub fn unitary_operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|op| !op.is_measure())
    }

    /// Circuit depth: the length of the longest chain of operations that
    /// share a qubit. Every operation, measurement included, occupies one
    /// layer on each qubit it touches.
    pub fn depth(&self) -> usize {
        let mut layers = vec![0usize; self.num_qubits()];
        let mut depth = 0;
        for op in &self.operations {
            let layer = op
                .qubits
                .iter()
                .map(|q| layers[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &op.qubits {
                layers[q.index()] = layer;
            }
            depth = depth.max(layer);
        }
        depth
    }

    /// Consume the circuit and return its operations.
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateKind;
    use crate::qubit::QubitId;

    fn bell_ops() -> Vec<Operation> {
        vec![
            Operation::gate(GateKind::H, [QubitId(0)]),
            Operation::gate(GateKind::CX, [QubitId(0), QubitId(1)]),
        ]
    }

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new(2, bell_ops()).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.gate_count(), 2);
        assert!(!circuit.has_measurements());
    }

    #[test]
    fn test_zero_qubits_rejected() {
        assert!(matches!(
            Circuit::empty(0),
            Err(IrError::InvalidQubitCount(0))
        ));
    }

    #[test]
    fn test_invalid_operation_rejected() {
        let ops = vec![Operation::gate(GateKind::X, [QubitId(3)])];
        assert!(matches!(
            Circuit::new(2, ops),
            Err(IrError::QubitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_depth() {
        let mut ops = bell_ops();
        ops.push(Operation::measure(QubitId(0)));
        ops.push(Operation::measure(QubitId(1)));
        let circuit = Circuit::new(2, ops).unwrap();
        // H, CX, parallel measures
        assert_eq!(circuit.depth(), 3);

        let parallel = Circuit::new(
            3,
            vec![
                Operation::gate(GateKind::H, [QubitId(0)]),
                Operation::gate(GateKind::H, [QubitId(1)]),
                Operation::gate(GateKind::H, [QubitId(2)]),
            ],
        )
        .unwrap();
        assert_eq!(parallel.depth(), 1);
        assert_eq!(Circuit::empty(4).unwrap().depth(), 0);
    }

    #[test]
    fn test_unitary_operations_skip_measure() {
        let mut ops = bell_ops();
        ops.push(Operation::measure(QubitId(1)));
        let circuit = Circuit::new(2, ops).unwrap();
        assert!(circuit.has_measurements());
        assert_eq!(circuit.unitary_operations().count(), 2);
    }
}
