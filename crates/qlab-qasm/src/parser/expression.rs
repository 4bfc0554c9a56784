//! Expression parsing.

use super::Parser;
use crate::ast::{BinOp, Expression};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse an expression.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_expr(0)
    }

    /// Parse binary expression with precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<Expression> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek_binary_op() {
            let prec = op_precedence(op);
            if prec < min_prec {
                break;
            }
            self.advance();

            // `**` is right-associative.
            let next = if op == BinOp::Pow { prec } else { prec + 1 };
            let right = self.parse_binary_expr(next)?;
            left = Expression::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse unary expression.
    fn parse_unary_expr(&mut self) -> ParseResult<Expression> {
        if self.consume(&Token::Minus) {
            let expr = self.parse_unary_expr()?;
            return Ok(Expression::Neg(Box::new(expr)));
        }
        if self.consume(&Token::Plus) {
            return self.parse_unary_expr();
        }
        self.parse_primary_expr()
    }

    /// Parse primary expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expression> {
        let token = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expression".into()))?;

        match token {
            Token::IntLiteral(v) => Ok(Expression::Int(v)),
            Token::FloatLiteral(v) => Ok(Expression::Float(v)),
            Token::Pi => Ok(Expression::Pi),
            Token::Tau => Ok(Expression::Tau),
            Token::Euler => Ok(Expression::Euler),
            Token::Identifier(name) => {
                if self.consume(&Token::LParen) {
                    let args = self.parse_expression_list()?;
                    self.expect(Token::RParen)?;
                    Ok(Expression::FnCall { name, args })
                } else {
                    Ok(Expression::Identifier(name))
                }
            }
            Token::LParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(Expression::Paren(Box::new(expr)))
            }
            other => Err(self.unexpected("expression", &other)),
        }
    }

    /// Peek at binary operator.
    fn peek_binary_op(&self) -> Option<BinOp> {
        match self.peek()? {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Sub),
            Token::Star => Some(BinOp::Mul),
            Token::Slash => Some(BinOp::Div),
            Token::Power => Some(BinOp::Pow),
            _ => None,
        }
    }

    /// Parse expression list.
    pub(super) fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        if self.check(&Token::RParen) {
            return Ok(vec![]);
        }
        let mut exprs = vec![self.parse_expression()?];
        while self.consume(&Token::Comma) {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }
}

/// Get operator precedence.
fn op_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div => 2,
        BinOp::Pow => 3,
    }
}

/// Evaluate an angle expression to radians.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn evaluate(expr: &Expression, line: usize) -> ParseResult<f64> {
    Ok(match expr {
        Expression::Int(v) => *v as f64,
        Expression::Float(v) => *v,
        Expression::Pi => std::f64::consts::PI,
        Expression::Tau => std::f64::consts::TAU,
        Expression::Euler => std::f64::consts::E,
        Expression::Identifier(name) => {
            return Err(ParseError::UndefinedIdentifier {
                line,
                name: name.clone(),
            });
        }
        Expression::Neg(e) => -evaluate(e, line)?,
        Expression::Paren(e) => evaluate(e, line)?,
        Expression::BinOp { left, op, right } => {
            let l = evaluate(left, line)?;
            let r = evaluate(right, line)?;
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                BinOp::Pow => l.powf(r),
            }
        }
        Expression::FnCall { name, args } => {
            let function: fn(f64) -> f64 = match name.as_str() {
                "sin" => f64::sin,
                "cos" => f64::cos,
                "tan" => f64::tan,
                "exp" => f64::exp,
                "ln" => f64::ln,
                "sqrt" => f64::sqrt,
                _ => {
                    return Err(ParseError::UnknownFunction {
                        line,
                        name: name.clone(),
                    });
                }
            };
            let [arg] = args.as_slice() else {
                return Err(ParseError::WrongParameterCount {
                    line,
                    gate: name.clone(),
                    expected: 1,
                    got: args.len(),
                });
            };
            function(evaluate(arg, line)?)
        }
    })
}
