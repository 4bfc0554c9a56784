//! Error types for the QASM reader.

use qlab_ir::IrError;
use thiserror::Error;

/// Errors that can occur during parsing.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}: {message}")]
    LexerError { line: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    /// Missing or unsupported `OPENQASM` version.
    #[error("Invalid OPENQASM version: {0}")]
    InvalidVersion(String),

    /// Undefined register or constant.
    #[error("Undefined identifier at line {line}: {name}")]
    UndefinedIdentifier { line: usize, name: String },

    /// Register declared twice.
    #[error("Duplicate declaration at line {line}: {name}")]
    DuplicateDeclaration { line: usize, name: String },

    /// Gate not in the gate library.
    #[error("Unknown gate at line {line}: {name}")]
    UnknownGate { line: usize, name: String },

    /// Function not supported in angle expressions.
    #[error("Unknown function at line {line}: {name}")]
    UnknownFunction { line: usize, name: String },

    /// Wrong number of qubit arguments.
    #[error("Gate '{gate}' at line {line} expects {expected} qubits, got {got}")]
    WrongQubitCount {
        line: usize,
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Wrong number of parameters.
    #[error("Gate '{gate}' at line {line} expects {expected} parameters, got {got}")]
    WrongParameterCount {
        line: usize,
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Index out of bounds.
    #[error(
        "Index {index} out of bounds for register '{register}' of size {size} at line {line}"
    )]
    IndexOutOfBounds {
        line: usize,
        register: String,
        index: usize,
        size: usize,
    },

    /// Broadcast over registers of different sizes.
    #[error("Register size mismatch at line {line}: {left} vs {right}")]
    RegisterSizeMismatch {
        line: usize,
        left: usize,
        right: usize,
    },

    /// Declared registers exceed the reader's size limit.
    #[error(
        "Register '{register}' at line {line} raises the total size to {total} (limit {max})"
    )]
    RegisterTooLarge {
        line: usize,
        register: String,
        total: u64,
        max: u32,
    },

    /// Operation rejected by the circuit model.
    #[error("Invalid operation at line {line}: {source}")]
    InvalidOperation {
        line: usize,
        #[source]
        source: IrError,
    },

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    Circuit(#[from] IrError),
}

impl ParseError {
    /// Line the error refers to, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::LexerError { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::UndefinedIdentifier { line, .. }
            | ParseError::DuplicateDeclaration { line, .. }
            | ParseError::UnknownGate { line, .. }
            | ParseError::UnknownFunction { line, .. }
            | ParseError::WrongQubitCount { line, .. }
            | ParseError::WrongParameterCount { line, .. }
            | ParseError::IndexOutOfBounds { line, .. }
            | ParseError::RegisterSizeMismatch { line, .. }
            | ParseError::RegisterTooLarge { line, .. }
            | ParseError::InvalidOperation { line, .. } => Some(*line),
            ParseError::UnexpectedEof(_)
            | ParseError::InvalidVersion(_)
            | ParseError::Circuit(_) => None,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
