use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::ast::{BinaryOp, Expr, ExprKind, Stmt, UnaryOp};
use crate::diagnostic::{Diagnostic, Label, Span};
use crate::lexer::{SpannedToken, Token};
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct ParseError {
    pub expected: String,
    pub found: String,
    pub line: usize,
    pub span: Span,
}

impl ParseError {
    pub fn new(
        expected: impl Into<String>,
        found: impl Into<String>,
        line: usize,
        span: Span,
    ) -> Self {
        Self {
            expected: expected.into(),
            found: found.into(),
            line,
            span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .with_code("E0201")
            .with_label(Label::new(self.span, format!("expected {}", self.expected)))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}: expected {}, got {}",
            self.line, self.expected, self.found
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive-descent parser over the lexed token stream. One method per
/// precedence tier; the first error aborts the parse.
pub struct TokenParser {
    tokens: Vec<SpannedToken>,
    current: usize,
}

impl TokenParser {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens, current: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.tok)
    }

    fn current_line(&self) -> usize {
        self.tokens
            .get(self.current)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.current)
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or_else(Span::dummy)
    }

    fn found_description(&self) -> String {
        match self.tokens.get(self.current) {
            Some(t) => t.tok.to_string(),
            None => "end of input".to_string(),
        }
    }

    fn error(&self, expected: impl Into<String>) -> ParseError {
        ParseError::new(
            expected,
            self.found_description(),
            self.current_line(),
            self.current_span(),
        )
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<SpannedToken, ParseError> {
        match self.tokens.get(self.current) {
            Some(t) if mem::discriminant(&t.tok) == mem::discriminant(&expected) => {
                let token = t.clone();
                self.current += 1;
                Ok(token)
            }
            _ => Err(self.error(expected.to_string())),
        }
    }

    pub fn parse(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while self.peek().is_some() {
            if matches!(self.peek(), Some(Token::Semicolon)) {
                self.advance();
                continue;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek() {
            Some(Token::Print) => {
                self.advance();
                let expr = self.parse_expression()?;
                Ok(Stmt::Print(expr))
            }
            Some(Token::If) => self.parse_if_statement(),
            Some(Token::While) => self.parse_while_statement(),
            Some(Token::Del) => self.parse_del_statement(),
            Some(_) => self.parse_assignment_or_expression(),
            None => Err(self.error("statement")),
        }
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(Token::LBrace)?;
        let mut statements = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RBrace) => break,
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(_) => statements.push(self.parse_statement()?),
                None => return Err(self.error("'}'")),
            }
        }
        self.expect(Token::RBrace)?;
        Ok(statements)
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect(Token::If)?;
        self.expect(Token::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(Token::RParen)?;
        let then_branch = self.parse_block()?;
        let else_branch = if matches!(self.peek(), Some(Token::Else)) {
            self.advance();
            if matches!(self.peek(), Some(Token::If)) {
                // `else if` chains as an else branch holding a single if.
                Some(vec![self.parse_if_statement()?])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect(Token::While)?;
        self.expect(Token::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(Token::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    fn parse_del_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect(Token::Del)?;
        let line = self.current_line();
        let target = self.parse_postfix()?;
        if !target.is_assignable() {
            return Err(ParseError::new(
                "variable or index expression after 'del'",
                "expression",
                line,
                target.span,
            ));
        }
        Ok(Stmt::Del(target))
    }

    fn parse_assignment_or_expression(&mut self) -> Result<Stmt, ParseError> {
        let line = self.current_line();
        let expr = self.parse_expression()?;
        if matches!(self.peek(), Some(Token::Assign)) {
            self.advance();
            if !expr.is_assignable() {
                return Err(ParseError::new(
                    "variable or index expression on the left of '='",
                    "expression",
                    line,
                    expr.span,
                ));
            }
            let value = self.parse_expression()?;
            Ok(Stmt::Assign {
                target: expr,
                value,
            })
        } else {
            Ok(Stmt::Expr(expr))
        }
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            let right = self.parse_and()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op: BinaryOp::Or,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.advance();
            let right = self.parse_not()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op: BinaryOp::And,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    // `not` binds looser than comparison: `not a == b` negates the comparison.
    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.peek(), Some(Token::Not)) {
            let start = self.advance().unwrap().span;
            let operand = self.parse_not()?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek() {
                Some(Token::Eq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::NotEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Less) => BinaryOp::Less,
                Some(Token::LessEq) => BinaryOp::LessEq,
                Some(Token::Greater) => BinaryOp::Greater,
                Some(Token::GreaterEq) => BinaryOp::GreaterEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Some(Token::Plus) => Some(UnaryOp::Pos),
            Some(Token::Minus) => Some(UnaryOp::Neg),
            Some(Token::Bang) => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            let start = self.advance().unwrap().span;
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(Token::LBracket) => {
                    self.advance();
                    let index = self.parse_expression()?;
                    let end = self.expect(Token::RBracket)?.span;
                    let span = expr.span.merge(end);
                    expr = Expr::new(
                        ExprKind::Index {
                            target: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                Some(Token::LParen) => {
                    // Only a bare identifier forms a call.
                    let name = match &expr.kind {
                        ExprKind::Var(name) => name.clone(),
                        _ => break,
                    };
                    self.advance();
                    let (args, end) = self.parse_call_args()?;
                    let span = expr.span.merge(end);
                    expr = Expr::new(ExprKind::Call { name, args }, span);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self) -> Result<(Vec<Expr>, Span), ParseError> {
        let mut args = Vec::new();
        loop {
            if matches!(self.peek(), Some(Token::RParen)) {
                break;
            }
            args.push(self.parse_expression()?);
            if matches!(self.peek(), Some(Token::Comma)) {
                self.advance();
                continue;
            }
            break;
        }
        let end = self.expect(Token::RParen)?.span;
        Ok((args, end))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = match self.tokens.get(self.current) {
            Some(t) => t.clone(),
            None => return Err(self.error("expression")),
        };
        match token.tok {
            Token::Int(n) => {
                self.current += 1;
                Ok(Expr::new(ExprKind::Literal(Value::Int(n)), token.span))
            }
            Token::Float(f) => {
                self.current += 1;
                Ok(Expr::new(ExprKind::Literal(Value::Float(f)), token.span))
            }
            Token::Str(ref s) => {
                let literal = Value::str(s);
                self.current += 1;
                Ok(Expr::new(ExprKind::Literal(literal), token.span))
            }
            Token::True => {
                self.current += 1;
                Ok(Expr::new(ExprKind::Literal(Value::Bool(true)), token.span))
            }
            Token::False => {
                self.current += 1;
                Ok(Expr::new(ExprKind::Literal(Value::Bool(false)), token.span))
            }
            Token::Ident(ref name) => {
                let name = Rc::from(name.as_str());
                self.current += 1;
                Ok(Expr::new(ExprKind::Var(name), token.span))
            }
            Token::Input => {
                self.current += 1;
                self.expect(Token::LParen)?;
                let (args, end) = self.parse_call_args()?;
                Ok(Expr::new(
                    ExprKind::Call {
                        name: Rc::from("input"),
                        args,
                    },
                    token.span.merge(end),
                ))
            }
            Token::LParen => {
                self.current += 1;
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::LBracket => {
                self.current += 1;
                let mut elements = Vec::new();
                loop {
                    if matches!(self.peek(), Some(Token::RBracket)) {
                        break;
                    }
                    elements.push(self.parse_expression()?);
                    if matches!(self.peek(), Some(Token::Comma)) {
                        self.advance();
                        continue;
                    }
                    break;
                }
                let end = self.expect(Token::RBracket)?.span;
                Ok(Expr::new(ExprKind::List(elements), token.span.merge(end)))
            }
            Token::LBrace => {
                self.current += 1;
                let mut entries = Vec::new();
                loop {
                    if matches!(self.peek(), Some(Token::RBrace)) {
                        break;
                    }
                    let key = self.parse_expression()?;
                    self.expect(Token::Colon)?;
                    let value = self.parse_expression()?;
                    entries.push((key, value));
                    if matches!(self.peek(), Some(Token::Comma)) {
                        self.advance();
                        continue;
                    }
                    break;
                }
                let end = self.expect(Token::RBrace)?.span;
                Ok(Expr::new(ExprKind::Dict(entries), token.span.merge(end)))
            }
            _ => Err(self.error("expression")),
        }
    }
}
