//! Abstract syntax tree for the supported `OpenQASM` subset.

/// A complete QASM program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// QASM version (e.g., "2.0").
    pub version: String,
    /// Statements in the program.
    pub statements: Vec<Statement>,
}

/// A statement in a QASM program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Include statement.
    Include(String),

    /// Quantum register: `qreg name[n];`, `qubit[n] name;` or `qubit name;`
    QubitDecl {
        name: String,
        size: Option<u32>,
        line: usize,
    },

    /// Classical register: `creg name[n];`, `bit[n] name;` or `bit name;`
    BitDecl {
        name: String,
        size: Option<u32>,
        line: usize,
    },

    /// Gate application.
    Gate(GateCall),

    /// Measurement: `measure q -> c;`, `c = measure q;` or `measure q;`
    Measure {
        qubits: Vec<RegisterRef>,
        bits: Vec<RegisterRef>,
        line: usize,
    },

    /// Barrier: `barrier q;`
    Barrier {
        qubits: Vec<RegisterRef>,
        line: usize,
    },
}

/// A gate call.
#[derive(Debug, Clone, PartialEq)]
pub struct GateCall {
    /// Gate name as written.
    pub name: String,
    /// Gate parameters (angles).
    pub params: Vec<Expression>,
    /// Qubits the gate acts on.
    pub qubits: Vec<RegisterRef>,
    /// Line of the gate name.
    pub line: usize,
}

/// Reference to a register or a single register element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRef {
    /// Register name.
    pub register: String,
    /// Element index; `None` means the entire register.
    pub index: Option<u32>,
}

impl RegisterRef {
    /// Create a reference to a single element.
    pub fn single(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index: Some(index),
        }
    }

    /// Create a reference to an entire register.
    pub fn register(register: impl Into<String>) -> Self {
        Self {
            register: register.into(),
            index: None,
        }
    }
}

/// An angle expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal.
    Int(u64),
    /// Float literal.
    Float(f64),
    /// The constant π.
    Pi,
    /// The constant τ = 2π.
    Tau,
    /// Euler's number e.
    Euler,
    /// Bare identifier; no identifiers are bound in a circuit file.
    Identifier(String),
    /// Unary negation.
    Neg(Box<Expression>),
    /// Binary operation.
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
    /// Built-in function call, e.g. `sin(x)`.
    FnCall { name: String, args: Vec<Expression> },
    /// Parenthesized expression.
    Paren(Box<Expression>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}
