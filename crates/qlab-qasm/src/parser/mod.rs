//! Parser for `OpenQASM` 2 and 3.

mod expression;
mod lowering;
mod statement;

pub use lowering::MAX_REGISTER_SIZE;
pub(crate) use lowering::lower_to_circuit;

use qlab_ir::Circuit;

use crate::ast::Program;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a QASM source string into a Circuit.
///
/// Malformed syntax, unknown gates and out-of-range operands are all hard
/// errors; nothing is skipped.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let program = parse_ast(source)?;
    lower_to_circuit(&program)
}

/// Parse a QASM source string into an AST Program without lowering it.
pub fn parse_ast(source: &str) -> ParseResult<Program> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// Parser state.
pub(super) struct Parser {
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((line, message)) => return Err(ParseError::LexerError { line, message }),
            }
        }
        Ok(Self { tokens, pos: 0 })
    }

    /// Check if we've reached the end.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Peek at the current token.
    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Line of the current token, or of the last token at end of input.
    pub(super) fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    /// Advance and return the current token.
    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Build an unexpected-token error for `found` at the previous position.
    pub(super) fn unexpected(&self, expected: &str, found: &Token) -> ParseError {
        let line = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map_or(1, |t| t.line);
        ParseError::UnexpectedToken {
            line,
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(expected.to_string()))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(&expected) {
            return Err(self.unexpected(&expected.to_string(), &found));
        }
        Ok(())
    }

    /// Check if current token matches.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Parse the entire program.
    fn parse_program(&mut self) -> ParseResult<Program> {
        if !self.check(&Token::OpenQasm) {
            return Err(ParseError::InvalidVersion(
                "missing OPENQASM header".into(),
            ));
        }
        self.expect(Token::OpenQasm)?;
        let version = self.parse_version()?;
        self.expect(Token::Semicolon)?;

        let mut statements = Vec::new();
        while !self.is_eof() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program {
            version,
            statements,
        })
    }

    /// Parse the version number; major versions 2 and 3 are accepted.
    fn parse_version(&mut self) -> ParseResult<String> {
        let (major, version) = match self.advance() {
            Some(Token::FloatLiteral(v)) => (v.trunc(), format!("{v:?}")),
            Some(Token::IntLiteral(v)) => (v as f64, format!("{v}.0")),
            Some(other) => return Err(ParseError::InvalidVersion(other.to_string())),
            None => return Err(ParseError::UnexpectedEof("version number".into())),
        };
        if major == 2.0 || major == 3.0 {
            Ok(version)
        } else {
            Err(ParseError::InvalidVersion(version))
        }
    }

    /// Parse an identifier.
    pub(super) fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => Err(self.unexpected("identifier", &other)),
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    /// Parse an integer literal that fits a `u32`.
    pub(super) fn parse_index(&mut self) -> ParseResult<u32> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => u32::try_from(v)
                .map_err(|_| self.unexpected("index", &Token::IntLiteral(v))),
            Some(other) => Err(self.unexpected("integer", &other)),
            None => Err(ParseError::UnexpectedEof("integer".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use qlab_ir::{GateKind, QubitId};

    #[test]
    fn test_parse_bell_state_qasm2() {
        let source = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[2];
            creg c[2];
            h q[0];
            cx q[0], q[1];
            measure q -> c;
        "#;

        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        let kinds: Vec<_> = circuit.operations().iter().map(|op| op.kind).collect();
        assert_eq!(
            kinds,
            vec![GateKind::H, GateKind::CX, GateKind::Measure, GateKind::Measure]
        );
    }

    #[test]
    fn test_parse_bell_state_qasm3() {
        let source = r"
            OPENQASM 3.0;
            qubit[2] q;
            bit[2] c;
            h q[0];
            cx q[0], q[1];
            c = measure q;
        ";

        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.gate_count(), 4);
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_parse_ast_statements() {
        let program = parse_ast("OPENQASM 3;\nqubit q;\nx q;").unwrap();
        assert_eq!(program.version, "3.0");
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(
            program.statements[0],
            Statement::QubitDecl { size: None, line: 2, .. }
        ));
    }

    #[test]
    fn test_parse_multiple_registers() {
        let source = r"
            OPENQASM 2.0;
            qreg a[2];
            qreg b[2];
            cx a[1], b[0];
        ";

        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.operations()[0].qubits, vec![QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            parse("qreg q[1];"),
            Err(ParseError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        assert!(matches!(
            parse("OPENQASM 4.0; qreg q[1];"),
            Err(ParseError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_missing_semicolon_reports_line() {
        let source = "OPENQASM 2.0;\nqreg q[1];\nh q[0]\nx q[0];";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(
            parse("OPENQASM 2.0; qreg q[1]; h q["),
            Err(ParseError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn test_parse_error_undefined() {
        let source = "OPENQASM 2.0;\nqreg q[1];\nh undefined[0];";
        assert!(matches!(
            parse(source),
            Err(ParseError::UndefinedIdentifier { line: 3, .. })
        ));
    }
}
