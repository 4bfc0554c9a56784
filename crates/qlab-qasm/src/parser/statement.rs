//! Statement parsing.

use super::Parser;
use crate::ast::{GateCall, RegisterRef, Statement};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qreg => self.parse_legacy_decl(true),
            Token::Creg => self.parse_legacy_decl(false),
            Token::Qubit => self.parse_typed_decl(true),
            Token::Bit => self.parse_typed_decl(false),
            Token::Measure => self.parse_measure(),
            Token::Barrier => self.parse_barrier(),
            Token::Identifier(_) => self.parse_identifier_statement(),
            other => {
                self.pos += 1;
                Err(self.unexpected("statement", &other))
            }
        }
    }

    /// Parse include statement.
    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let path = match self.advance() {
            Some(Token::StringLiteral(s)) => s,
            Some(other) => return Err(self.unexpected("string literal", &other)),
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(path))
    }

    /// Parse `qreg name[n];` or `creg name[n];`.
    fn parse_legacy_decl(&mut self, quantum: bool) -> ParseResult<Statement> {
        let line = self.line();
        self.pos += 1;
        let name = self.parse_identifier()?;
        self.expect(Token::LBracket)?;
        let size = Some(self.parse_index()?);
        self.expect(Token::RBracket)?;
        self.expect(Token::Semicolon)?;
        Ok(declaration(quantum, name, size, line))
    }

    /// Parse `qubit[n] name;`, `qubit name;` and the `bit` forms.
    fn parse_typed_decl(&mut self, quantum: bool) -> ParseResult<Statement> {
        let line = self.line();
        self.pos += 1;
        let size = if self.consume(&Token::LBracket) {
            let size = self.parse_index()?;
            self.expect(Token::RBracket)?;
            Some(size)
        } else {
            None
        };
        let name = self.parse_identifier()?;
        self.expect(Token::Semicolon)?;
        Ok(declaration(quantum, name, size, line))
    }

    /// Parse `measure q;` or `measure q -> c;`.
    fn parse_measure(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        self.expect(Token::Measure)?;
        let qubits = self.parse_register_refs()?;
        let bits = if self.consume(&Token::Arrow) {
            self.parse_register_refs()?
        } else {
            vec![]
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Measure { qubits, bits, line })
    }

    /// Parse barrier statement.
    fn parse_barrier(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        self.expect(Token::Barrier)?;
        let qubits = if self.check(&Token::Semicolon) {
            vec![]
        } else {
            self.parse_register_refs()?
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Barrier { qubits, line })
    }

    /// Parse a statement starting with an identifier: a gate call or a
    /// measurement assignment (`c = measure q;`, `c[0] = measure q[0];`).
    fn parse_identifier_statement(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        let name = self.parse_identifier()?;

        if self.check(&Token::Eq) || self.check(&Token::LBracket) {
            let target = self.parse_register_ref_after(name)?;
            self.expect(Token::Eq)?;
            self.expect(Token::Measure)?;
            let qubits = self.parse_register_refs()?;
            self.expect(Token::Semicolon)?;
            return Ok(Statement::Measure {
                qubits,
                bits: vec![target],
                line,
            });
        }

        self.parse_gate_call(name, line)
    }

    /// Parse the rest of a gate call after its name.
    fn parse_gate_call(&mut self, name: String, line: usize) -> ParseResult<Statement> {
        let params = if self.consume(&Token::LParen) {
            let params = self.parse_expression_list()?;
            self.expect(Token::RParen)?;
            params
        } else {
            vec![]
        };

        let qubits = self.parse_register_refs()?;
        self.expect(Token::Semicolon)?;

        Ok(Statement::Gate(GateCall {
            name,
            params,
            qubits,
            line,
        }))
    }

    /// Parse a comma-separated list of register references.
    fn parse_register_refs(&mut self) -> ParseResult<Vec<RegisterRef>> {
        let mut refs = vec![self.parse_register_ref()?];
        while self.consume(&Token::Comma) {
            refs.push(self.parse_register_ref()?);
        }
        Ok(refs)
    }

    /// Parse `name` or `name[i]`.
    fn parse_register_ref(&mut self) -> ParseResult<RegisterRef> {
        let name = self.parse_identifier()?;
        self.parse_register_ref_after(name)
    }

    fn parse_register_ref_after(&mut self, register: String) -> ParseResult<RegisterRef> {
        if self.consume(&Token::LBracket) {
            let index = self.parse_index()?;
            self.expect(Token::RBracket)?;
            Ok(RegisterRef::single(register, index))
        } else {
            Ok(RegisterRef::register(register))
        }
    }
}

fn declaration(quantum: bool, name: String, size: Option<u32>, line: usize) -> Statement {
    if quantum {
        Statement::QubitDecl { name, size, line }
    } else {
        Statement::BitDecl { name, size, line }
    }
}
