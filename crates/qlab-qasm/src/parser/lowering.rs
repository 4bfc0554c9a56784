//! AST-to-Circuit lowering.

use qlab_ir::{Circuit, GateKind, Operation, QubitId};
use rustc_hash::FxHashMap;

use super::expression::evaluate;
use crate::ast::{GateCall, Program, RegisterRef, Statement};
use crate::error::{ParseError, ParseResult};

/// Largest total size of the registers of one kind (qubits or bits).
///
/// Register operands are expanded elementwise, so the bound keeps a single
/// `h q;` from producing an unbounded number of operations.
pub const MAX_REGISTER_SIZE: u32 = 4096;

/// Lower an AST Program to a Circuit.
pub(crate) fn lower_to_circuit(program: &Program) -> ParseResult<Circuit> {
    let mut lowerer = Lowerer::default();
    lowerer.lower(program)
}

/// A resolved gate or measure operand.
#[derive(Debug, Clone)]
enum Operand {
    /// One element.
    Single(u32),
    /// A whole register, broadcast elementwise.
    Register(Vec<u32>),
}

impl Operand {
    fn at(&self, i: usize) -> u32 {
        match self {
            Operand::Single(id) => *id,
            Operand::Register(ids) => ids[i],
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            Operand::Single(_) => None,
            Operand::Register(ids) => Some(ids.len()),
        }
    }
}

/// Registers of one kind, flattened in declaration order.
#[derive(Debug, Default)]
struct RegisterFile {
    /// name -> (`start_id`, size).
    registers: FxHashMap<String, (u32, u32)>,
    /// Total size of all registers.
    total: u32,
}

impl RegisterFile {
    fn declare(&mut self, name: &str, size: Option<u32>, line: usize) -> ParseResult<()> {
        if self.registers.contains_key(name) {
            return Err(ParseError::DuplicateDeclaration {
                line,
                name: name.to_string(),
            });
        }
        let size = size.unwrap_or(1);
        let total = u64::from(self.total) + u64::from(size);
        if total > u64::from(MAX_REGISTER_SIZE) {
            return Err(ParseError::RegisterTooLarge {
                line,
                register: name.to_string(),
                total,
                max: MAX_REGISTER_SIZE,
            });
        }
        self.registers.insert(name.to_string(), (self.total, size));
        self.total += size;
        Ok(())
    }

    fn resolve(&self, r: &RegisterRef, line: usize) -> ParseResult<Operand> {
        let &(start, size) =
            self.registers
                .get(&r.register)
                .ok_or_else(|| ParseError::UndefinedIdentifier {
                    line,
                    name: r.register.clone(),
                })?;
        match r.index {
            Some(idx) if idx >= size => Err(ParseError::IndexOutOfBounds {
                line,
                register: r.register.clone(),
                index: idx as usize,
                size: size as usize,
            }),
            Some(idx) => Ok(Operand::Single(start + idx)),
            None => Ok(Operand::Register((start..start + size).collect())),
        }
    }

    fn resolve_all(&self, refs: &[RegisterRef], line: usize) -> ParseResult<Vec<Operand>> {
        refs.iter().map(|r| self.resolve(r, line)).collect()
    }
}

/// Lowers AST to Circuit.
#[derive(Debug, Default)]
struct Lowerer {
    qregs: RegisterFile,
    cregs: RegisterFile,
}

impl Lowerer {
    fn lower(&mut self, program: &Program) -> ParseResult<Circuit> {
        // First pass: collect declarations
        for stmt in &program.statements {
            match stmt {
                Statement::QubitDecl { name, size, line } => {
                    self.qregs.declare(name, *size, *line)?;
                }
                Statement::BitDecl { name, size, line } => {
                    self.cregs.declare(name, *size, *line)?;
                }
                _ => {}
            }
        }

        // Second pass: lower statements
        let mut operations = Vec::new();
        for stmt in &program.statements {
            self.lower_statement(&mut operations, stmt)?;
        }

        Ok(Circuit::new(self.qregs.total, operations)?)
    }

    fn lower_statement(
        &self,
        operations: &mut Vec<Operation>,
        stmt: &Statement,
    ) -> ParseResult<()> {
        match stmt {
            Statement::QubitDecl { .. } | Statement::BitDecl { .. } | Statement::Include(_) => {
                Ok(())
            }

            Statement::Gate(call) => self.lower_gate_call(operations, call),

            Statement::Measure { qubits, bits, line } => {
                let qubits = self.qregs.resolve_all(qubits, *line)?;
                let bits = self.cregs.resolve_all(bits, *line)?;
                let qubits = flatten(&qubits);
                if !bits.is_empty() {
                    let bits = flatten(&bits);
                    if bits.len() != qubits.len() {
                        return Err(ParseError::RegisterSizeMismatch {
                            line: *line,
                            left: qubits.len(),
                            right: bits.len(),
                        });
                    }
                }
                for q in qubits {
                    push(operations, Operation::measure(QubitId(q)), *line)?;
                }
                Ok(())
            }

            // Barriers only order operations; the operand check still applies.
            Statement::Barrier { qubits, line } => {
                self.qregs.resolve_all(qubits, *line)?;
                Ok(())
            }
        }
    }

    fn lower_gate_call(
        &self,
        operations: &mut Vec<Operation>,
        call: &GateCall,
    ) -> ParseResult<()> {
        let line = call.line;
        let kind = GateKind::from_name(&call.name)
            .filter(|kind| !kind.is_measure())
            .ok_or_else(|| ParseError::UnknownGate {
                line,
                name: call.name.clone(),
            })?;

        let expected_params = usize::from(kind.takes_angle());
        if call.params.len() != expected_params {
            return Err(ParseError::WrongParameterCount {
                line,
                gate: call.name.clone(),
                expected: expected_params,
                got: call.params.len(),
            });
        }
        let angle = call
            .params
            .first()
            .map(|expr| evaluate(expr, line))
            .transpose()?;

        if call.qubits.len() != kind.num_qubits() {
            return Err(ParseError::WrongQubitCount {
                line,
                gate: call.name.clone(),
                expected: kind.num_qubits(),
                got: call.qubits.len(),
            });
        }
        let operands = self.qregs.resolve_all(&call.qubits, line)?;

        // Whole-register operands broadcast elementwise and must agree in size.
        let mut width = None;
        for len in operands.iter().filter_map(Operand::len) {
            match width {
                Some(w) if w != len => {
                    return Err(ParseError::RegisterSizeMismatch {
                        line,
                        left: w,
                        right: len,
                    });
                }
                _ => width = Some(len),
            }
        }

        for i in 0..width.unwrap_or(1) {
            let qubits = operands.iter().map(|op| QubitId(op.at(i)));
            push(operations, Operation::new(kind, qubits, angle), line)?;
        }
        Ok(())
    }
}

fn flatten(operands: &[Operand]) -> Vec<u32> {
    operands
        .iter()
        .flat_map(|op| match op {
            Operand::Single(id) => vec![*id],
            Operand::Register(ids) => ids.clone(),
        })
        .collect()
}

/// Validate and append an operation, attaching the source line on failure.
fn push(operations: &mut Vec<Operation>, op: Operation, line: usize) -> ParseResult<()> {
    // Bounds were checked during resolution; this catches repeated qubits
    // and non-finite angles.
    op.validate(usize::MAX)
        .map_err(|source| ParseError::InvalidOperation { line, source })?;
    operations.push(op);
    Ok(())
}
