//! Permissive circuit builder.
//!
//! [`build`] turns raw gate descriptors, as sent by a frontend, into a
//! [`Circuit`]. Problems with a single descriptor never fail the build: the
//! descriptor is skipped and a [`Diagnostic`] is recorded. Only a non-positive
//! qubit count is fatal.
//!
//! # Defaults
//!
//! Missing fields are filled in as follows and each fill-in is recorded as a
//! [`DiagnosticKind::DefaultedQubit`] or [`DiagnosticKind::DefaultedAngle`]:
//!
//! | Gate | Operands | Default |
//! |------|----------|---------|
//! | `cx`, `cy`, `cz`, `swap` | `qubit`, `targetQubit` | target = qubit + 1 |
//! | `ccx` | `qubit`, `control2Qubit`, `targetQubit` | control2 = qubit + 1, target = qubit + 2 |
//! | `cswap` | `qubit`, `swap1Qubit`, `swap2Qubit` | swap1 = qubit + 1, swap2 = qubit + 2 |
//! | `rx`, `ry`, `rz` | `params[0]` | π/2 |
//!
//! The offsets are a convenience; callers that need exact wiring must supply
//! every qubit field.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use tracing::{debug, warn};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::operation::Operation;
use crate::qubit::QubitId;

/// Angle used when a rotation gate arrives without parameters.
pub const DEFAULT_ROTATION_ANGLE: f64 = FRAC_PI_2;

/// A raw gate descriptor.
///
/// Deserializes from the frontend's camelCase JSON, e.g.
/// `{"gate": "cx", "qubit": 0, "targetQubit": 1}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateDescriptor {
    /// Gate name token (case-insensitive).
    #[serde(default)]
    pub gate: String,
    /// Primary qubit: the only qubit of a single-qubit gate, the (first)
    /// control of a controlled gate.
    #[serde(default)]
    pub qubit: i64,
    /// Target of a controlled gate or second qubit of `swap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_qubit: Option<i64>,
    /// Second control of `ccx`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control2_qubit: Option<i64>,
    /// First swapped qubit of `cswap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap1_qubit: Option<i64>,
    /// Second swapped qubit of `cswap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap2_qubit: Option<i64>,
    /// Gate parameters; rotations read the first entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
}

impl GateDescriptor {
    /// Create a descriptor naming a gate on a primary qubit.
    pub fn new(gate: impl Into<String>, qubit: i64) -> Self {
        Self {
            gate: gate.into(),
            qubit,
            ..Self::default()
        }
    }

    /// Set the target qubit.
    #[must_use]
    pub fn with_target(mut self, target: i64) -> Self {
        self.target_qubit = Some(target);
        self
    }

    /// Set the second control qubit (`ccx`).
    #[must_use]
    pub fn with_control2(mut self, control2: i64) -> Self {
        self.control2_qubit = Some(control2);
        self
    }

    /// Set both swapped qubits (`cswap`).
    #[must_use]
    pub fn with_swap_qubits(mut self, swap1: i64, swap2: i64) -> Self {
        self.swap1_qubit = Some(swap1);
        self.swap2_qubit = Some(swap2);
        self
    }

    /// Set the parameter list.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }
}

/// What happened to a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Gate name not in the gate library; descriptor skipped.
    UnknownGate,
    /// A resolved qubit index is negative or not below the qubit count;
    /// descriptor skipped.
    QubitOutOfRange {
        /// The offending index.
        qubit: i64,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },
    /// The resolved qubits of one gate collide; descriptor skipped.
    DuplicateQubit {
        /// The repeated index.
        qubit: u32,
    },
    /// Rotation angle is NaN or infinite; descriptor skipped.
    NonFiniteAngle {
        /// The rejected angle.
        angle: f64,
    },
    /// The circuit model refused the operation for another reason;
    /// descriptor skipped.
    Rejected {
        /// The model's error message.
        reason: String,
    },
    /// A missing qubit field was filled in from the primary qubit.
    DefaultedQubit {
        /// Descriptor field that was missing.
        field: &'static str,
        /// Index used instead.
        qubit: i64,
    },
    /// A rotation without parameters received the default angle.
    DefaultedAngle {
        /// Angle used instead.
        angle: f64,
    },
}

/// A non-fatal record about one gate descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Position of the descriptor in the input list.
    pub index: usize,
    /// Gate name token as received.
    pub gate: String,
    /// What happened.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Whether the descriptor was dropped from the circuit.
    pub fn is_skip(&self) -> bool {
        !matches!(
            self.kind,
            DiagnosticKind::DefaultedQubit { .. } | DiagnosticKind::DefaultedAngle { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gate #{} '{}': ", self.index, self.gate)?;
        match &self.kind {
            DiagnosticKind::UnknownGate => write!(f, "unknown gate, skipped"),
            DiagnosticKind::QubitOutOfRange { qubit, num_qubits } => write!(
                f,
                "qubit {qubit} out of range for {num_qubits} qubits, skipped"
            ),
            DiagnosticKind::DuplicateQubit { qubit } => {
                write!(f, "qubit {qubit} used twice, skipped")
            }
            DiagnosticKind::NonFiniteAngle { angle } => {
                write!(f, "non-finite angle {angle}, skipped")
            }
            DiagnosticKind::Rejected { reason } => write!(f, "{reason}, skipped"),
            DiagnosticKind::DefaultedQubit { field, qubit } => {
                write!(f, "{field} not given, defaulted to {qubit}")
            }
            DiagnosticKind::DefaultedAngle { angle } => {
                write!(f, "no angle given, defaulted to {angle}")
            }
        }
    }
}

/// Result of a build: the circuit plus any diagnostics.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The circuit made of every accepted descriptor.
    pub circuit: Circuit,
    /// Skipped and defaulted descriptors, in input order.
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutput {
    /// Split into circuit and diagnostics.
    pub fn into_parts(self) -> (Circuit, Vec<Diagnostic>) {
        (self.circuit, self.diagnostics)
    }

    /// Number of descriptors that were dropped.
    pub fn skipped(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_skip()).count()
    }
}

/// Build a circuit from raw gate descriptors.
///
/// Fails only when `qubit_count` is not a positive integer that fits a `u32`.
/// Every per-descriptor problem is reported as a [`Diagnostic`] and the
/// descriptor is left out of the circuit.
pub fn build(qubit_count: i64, descriptors: &[GateDescriptor]) -> IrResult<BuildOutput> {
    let num_qubits = u32::try_from(qubit_count)
        .ok()
        .filter(|&n| n > 0)
        .ok_or(IrError::InvalidQubitCount(qubit_count))?;

    let mut builder = Builder {
        num_qubits,
        operations: Vec::with_capacity(descriptors.len()),
        diagnostics: vec![],
    };
    for (index, descriptor) in descriptors.iter().enumerate() {
        builder.push(index, descriptor);
    }

    debug!(
        num_qubits,
        accepted = builder.operations.len(),
        diagnostics = builder.diagnostics.len(),
        "circuit built"
    );

    let circuit = Circuit::new(num_qubits, builder.operations)?;
    Ok(BuildOutput {
        circuit,
        diagnostics: builder.diagnostics,
    })
}

/// Diagnostic for an operation the circuit model refused.
fn rejection(error: &IrError, num_qubits: u32) -> DiagnosticKind {
    match error {
        IrError::QubitOutOfRange { qubit, .. } => DiagnosticKind::QubitOutOfRange {
            qubit: i64::from(qubit.0),
            num_qubits,
        },
        IrError::DuplicateQubit { qubit, .. } => DiagnosticKind::DuplicateQubit { qubit: qubit.0 },
        IrError::NonFiniteAngle { angle, .. } => DiagnosticKind::NonFiniteAngle { angle: *angle },
        other => DiagnosticKind::Rejected {
            reason: other.to_string(),
        },
    }
}

/// Accumulates accepted operations and diagnostics.
struct Builder {
    num_qubits: u32,
    operations: Vec<Operation>,
    diagnostics: Vec<Diagnostic>,
}

impl Builder {
    fn push(&mut self, index: usize, descriptor: &GateDescriptor) {
        let Some(kind) = GateKind::from_name(&descriptor.gate) else {
            warn!(index, gate = %descriptor.gate, "unknown gate, skipping");
            self.record(index, descriptor, DiagnosticKind::UnknownGate);
            return;
        };

        let raw_qubits = self.wire(index, descriptor, kind);

        let mut qubits = Vec::with_capacity(raw_qubits.len());
        for raw in raw_qubits {
            match u32::try_from(raw) {
                Ok(q) if q < self.num_qubits => qubits.push(QubitId(q)),
                _ => {
                    warn!(
                        index,
                        gate = %descriptor.gate,
                        qubit = raw,
                        "qubit out of range, skipping"
                    );
                    self.record(
                        index,
                        descriptor,
                        DiagnosticKind::QubitOutOfRange {
                            qubit: raw,
                            num_qubits: self.num_qubits,
                        },
                    );
                    return;
                }
            }
        }

        let angle = if kind.takes_angle() {
            Some(self.angle(index, descriptor))
        } else {
            None
        };

        let operation = Operation::new(kind, qubits, angle);
        match operation.validate(self.num_qubits as usize) {
            Ok(()) => self.operations.push(operation),
            Err(e) => {
                warn!(index, gate = %descriptor.gate, error = %e, "invalid operation, skipping");
                self.record(index, descriptor, rejection(&e, self.num_qubits));
            }
        }
    }

    /// Resolve the operand list for `kind`, applying the offset defaults.
    fn wire(&mut self, index: usize, descriptor: &GateDescriptor, kind: GateKind) -> Vec<i64> {
        let primary = descriptor.qubit;
        match kind.num_qubits() {
            1 => vec![primary],
            2 => {
                let target = descriptor.target_qubit;
                let target = self.or_default(index, descriptor, "targetQubit", target, 1);
                vec![primary, target]
            }
            _ if kind == GateKind::CSwap => {
                let swap1 = descriptor.swap1_qubit;
                let swap1 = self.or_default(index, descriptor, "swap1Qubit", swap1, 1);
                let swap2 = descriptor.swap2_qubit;
                let swap2 = self.or_default(index, descriptor, "swap2Qubit", swap2, 2);
                vec![primary, swap1, swap2]
            }
            _ => {
                let control2 = descriptor.control2_qubit;
                let control2 = self.or_default(index, descriptor, "control2Qubit", control2, 1);
                let target = descriptor.target_qubit;
                let target = self.or_default(index, descriptor, "targetQubit", target, 2);
                vec![primary, control2, target]
            }
        }
    }

    fn or_default(
        &mut self,
        index: usize,
        descriptor: &GateDescriptor,
        field: &'static str,
        value: Option<i64>,
        offset: i64,
    ) -> i64 {
        if let Some(q) = value {
            return q;
        }
        let qubit = descriptor.qubit.saturating_add(offset);
        debug!(index, gate = %descriptor.gate, field, qubit, "defaulting qubit");
        self.record(index, descriptor, DiagnosticKind::DefaultedQubit { field, qubit });
        qubit
    }

    fn angle(&mut self, index: usize, descriptor: &GateDescriptor) -> f64 {
        if let Some(&angle) = descriptor.params.first() {
            return angle;
        }
        debug!(index, gate = %descriptor.gate, "defaulting rotation angle");
        self.record(
            index,
            descriptor,
            DiagnosticKind::DefaultedAngle {
                angle: DEFAULT_ROTATION_ANGLE,
            },
        );
        DEFAULT_ROTATION_ANGLE
    }

    fn record(&mut self, index: usize, descriptor: &GateDescriptor, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic {
            index,
            gate: descriptor.gate.clone(),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateKind;

    #[test]
    fn test_bell_circuit() {
        let gates = vec![
            GateDescriptor::new("H", 0),
            GateDescriptor::new("cx", 0).with_target(1),
        ];
        let output = build(2, &gates).unwrap();
        let ops = output.circuit.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].kind, GateKind::H);
        assert_eq!(ops[1].kind, GateKind::CX);
        assert_eq!(ops[1].qubits, vec![QubitId(0), QubitId(1)]);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_qubit_count() {
        assert!(matches!(build(0, &[]), Err(IrError::InvalidQubitCount(0))));
        assert!(matches!(build(-3, &[]), Err(IrError::InvalidQubitCount(-3))));
        assert!(matches!(
            build(i64::from(u32::MAX) + 1, &[]),
            Err(IrError::InvalidQubitCount(_))
        ));
    }

    #[test]
    fn test_unknown_gate_skipped() {
        let gates = vec![
            GateDescriptor::new("h", 0),
            GateDescriptor::new("u3", 0),
            GateDescriptor::new("x", 1),
        ];
        let output = build(2, &gates).unwrap();
        assert_eq!(output.circuit.gate_count(), 2);
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].index, 1);
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::UnknownGate);
        assert_eq!(output.skipped(), 1);
    }

    #[test]
    fn test_out_of_range_skipped() {
        let gates = vec![
            GateDescriptor::new("x", 5),
            GateDescriptor::new("x", -1),
            GateDescriptor::new("h", 1),
        ];
        let output = build(2, &gates).unwrap();
        assert_eq!(output.circuit.gate_count(), 1);
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::QubitOutOfRange {
                qubit: 5,
                num_qubits: 2
            }
        );
        assert_eq!(
            output.diagnostics[1].kind,
            DiagnosticKind::QubitOutOfRange {
                qubit: -1,
                num_qubits: 2
            }
        );
    }

    #[test]
    fn test_two_qubit_target_default() {
        let gates = vec![GateDescriptor::new("cz", 1)];
        let output = build(3, &gates).unwrap();
        assert_eq!(
            output.circuit.operations()[0].qubits,
            vec![QubitId(1), QubitId(2)]
        );
        assert_eq!(
            output.diagnostics,
            vec![Diagnostic {
                index: 0,
                gate: "cz".into(),
                kind: DiagnosticKind::DefaultedQubit {
                    field: "targetQubit",
                    qubit: 2
                },
            }]
        );
        assert_eq!(output.skipped(), 0);
    }

    #[test]
    fn test_default_target_out_of_range() {
        // cx on the last qubit defaults its target past the register.
        let output = build(2, &[GateDescriptor::new("cnot", 1)]).unwrap();
        assert_eq!(output.circuit.gate_count(), 0);
        assert_eq!(output.diagnostics.len(), 2);
        assert!(!output.diagnostics[0].is_skip());
        assert!(output.diagnostics[1].is_skip());
    }

    #[test]
    fn test_toffoli_wiring() {
        let explicit = GateDescriptor::new("toffoli", 2)
            .with_control2(0)
            .with_target(1);
        let defaulted = GateDescriptor::new("ccx", 0).with_target(2);
        let output = build(3, &[explicit, defaulted]).unwrap();
        let ops = output.circuit.operations();
        assert_eq!(ops[0].qubits, vec![QubitId(2), QubitId(0), QubitId(1)]);
        assert_eq!(ops[1].qubits, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn test_fredkin_wiring() {
        let output = build(4, &[GateDescriptor::new("fredkin", 1)]).unwrap();
        let op = &output.circuit.operations()[0];
        assert_eq!(op.kind, GateKind::CSwap);
        assert_eq!(op.qubits, vec![QubitId(1), QubitId(2), QubitId(3)]);
        assert_eq!(output.diagnostics.len(), 2);

        let explicit = GateDescriptor::new("cswap", 3).with_swap_qubits(0, 1);
        let output = build(4, &[explicit]).unwrap();
        assert_eq!(
            output.circuit.operations()[0].qubits,
            vec![QubitId(3), QubitId(0), QubitId(1)]
        );
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_qubit_skipped() {
        let output = build(2, &[GateDescriptor::new("swap", 0).with_target(0)]).unwrap();
        assert_eq!(output.circuit.gate_count(), 0);
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::DuplicateQubit { qubit: 0 }
        );
    }

    #[test]
    fn test_rotation_angles() {
        let gates = vec![
            GateDescriptor::new("rx", 0).with_params(vec![0.25, 9.0]),
            GateDescriptor::new("RY", 0),
            GateDescriptor::new("rz", 0).with_params(vec![f64::INFINITY]),
        ];
        let output = build(1, &gates).unwrap();
        let ops = output.circuit.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].angle, Some(0.25));
        assert_eq!(ops[1].angle, Some(DEFAULT_ROTATION_ANGLE));
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::DefaultedAngle {
                angle: DEFAULT_ROTATION_ANGLE
            }
        );
        assert!(matches!(
            output.diagnostics[1].kind,
            DiagnosticKind::NonFiniteAngle { .. }
        ));
    }

    #[test]
    fn test_fixed_gate_ignores_params() {
        let output = build(1, &[GateDescriptor::new("h", 0).with_params(vec![1.0])]).unwrap();
        assert_eq!(output.circuit.operations()[0].angle, None);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_measure() {
        let output = build(2, &[GateDescriptor::new("Measure", 1)]).unwrap();
        assert!(output.circuit.operations()[0].is_measure());
    }

    #[test]
    fn test_descriptor_from_json() {
        let json = r#"[
            {"gate": "h", "qubit": 0},
            {"gate": "cnot", "qubit": 0, "targetQubit": 1},
            {"gate": "ccx", "qubit": 0, "control2Qubit": 1, "targetQubit": 2},
            {"gate": "cswap", "qubit": 2, "swap1Qubit": 0, "swap2Qubit": 1},
            {"gate": "rz", "qubit": 1, "params": [3.14]}
        ]"#;
        let gates: Vec<GateDescriptor> = serde_json::from_str(json).unwrap();
        assert_eq!(gates[1].target_qubit, Some(1));
        assert_eq!(gates[2].control2_qubit, Some(1));
        assert_eq!(gates[3].swap2_qubit, Some(1));

        let output = build(3, &gates).unwrap();
        assert_eq!(output.circuit.gate_count(), 5);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic {
            index: 3,
            gate: "foo".into(),
            kind: DiagnosticKind::UnknownGate,
        };
        assert_eq!(d.to_string(), "gate #3 'foo': unknown gate, skipped");
    }

    #[test]
    fn test_rejection_keeps_error_details() {
        let out_of_range = IrError::QubitOutOfRange {
            qubit: QubitId(7),
            num_qubits: 3,
            gate_name: Some("cx".into()),
        };
        assert_eq!(
            rejection(&out_of_range, 3),
            DiagnosticKind::QubitOutOfRange {
                qubit: 7,
                num_qubits: 3
            }
        );

        let duplicate = IrError::DuplicateQubit {
            qubit: QubitId(1),
            gate_name: None,
        };
        assert_eq!(
            rejection(&duplicate, 3),
            DiagnosticKind::DuplicateQubit { qubit: 1 }
        );

        let missing = IrError::MissingAngle("rx".into());
        let kind = rejection(&missing, 3);
        assert_eq!(
            kind,
            DiagnosticKind::Rejected {
                reason: "Gate 'rx' requires an angle".into()
            }
        );
        let d = Diagnostic {
            index: 0,
            gate: "rx".into(),
            kind,
        };
        assert!(d.is_skip());
        assert_eq!(d.to_string(), "gate #0 'rx': Gate 'rx' requires an angle, skipped");
    }
}
