use chumsky::{prelude::*, text};
use std::fmt;

use crate::diagnostic::{line_col, Diagnostic, Label, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    If,
    Else,
    While,
    Print,
    Input,
    Del,
    And,
    Or,
    Not,
    True,
    False,

    // Literals and identifiers
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Bang,
    Assign,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::If => write!(f, "'if'"),
            Token::Else => write!(f, "'else'"),
            Token::While => write!(f, "'while'"),
            Token::Print => write!(f, "'print'"),
            Token::Input => write!(f, "'input'"),
            Token::Del => write!(f, "'del'"),
            Token::And => write!(f, "'and'"),
            Token::Or => write!(f, "'or'"),
            Token::Not => write!(f, "'not'"),
            Token::True => write!(f, "'true'"),
            Token::False => write!(f, "'false'"),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Int(n) => write!(f, "integer literal {}", n),
            Token::Float(n) => write!(f, "float literal {}", n),
            Token::Str(s) => write!(f, "string literal \"{}\"", s),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Eq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::Less => write!(f, "'<'"),
            Token::LessEq => write!(f, "'<='"),
            Token::Greater => write!(f, "'>'"),
            Token::GreaterEq => write!(f, "'>='"),
            Token::Bang => write!(f, "'!'"),
            Token::Assign => write!(f, "'='"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
            Token::Semicolon => write!(f, "';'"),
        }
    }
}

pub fn lexer<'a>()
-> impl Parser<'a, &'a str, Vec<(Token, SimpleSpan)>, extra::Err<Simple<'a, char>>> {
    let number = text::digits(10)
        .then(just('.').then(text::digits(10)).or_not())
        .to_slice()
        .map(|s: &str| {
            if s.contains('.') {
                Token::Float(s.parse().unwrap())
            } else {
                // A digit run too large for i64 degrades to a float literal.
                match s.parse::<i64>() {
                    Ok(n) => Token::Int(n),
                    Err(_) => Token::Float(s.parse().unwrap()),
                }
            }
        });

    let escape = just('\\').ignore_then(choice((
        just('\\'),
        just('"'),
        just('n').to('\n'),
        just('r').to('\r'),
        just('t').to('\t'),
    )));

    let string = just('"')
        .ignore_then(none_of("\\\"").or(escape).repeated().collect::<String>())
        .then_ignore(just('"'))
        .map(Token::Str);

    let ident = text::ident().map(|s: &str| match s {
        "if" => Token::If,
        "else" => Token::Else,
        "while" => Token::While,
        "print" => Token::Print,
        "input" => Token::Input,
        "del" => Token::Del,
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "true" => Token::True,
        "false" => Token::False,
        _ => Token::Ident(s.to_string()),
    });

    let multi_char_operators = choice((
        just("==").to(Token::Eq),
        just("!=").to(Token::NotEq),
        just(">=").to(Token::GreaterEq),
        just("<=").to(Token::LessEq),
    ));

    let single_char_operators = choice((
        just('+').to(Token::Plus),
        just('-').to(Token::Minus),
        just('*').to(Token::Star),
        just('/').to(Token::Slash),
        just('>').to(Token::Greater),
        just('<').to(Token::Less),
        just('!').to(Token::Bang),
        just('=').to(Token::Assign),
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('{').to(Token::LBrace),
        just('}').to(Token::RBrace),
        just('[').to(Token::LBracket),
        just(']').to(Token::RBracket),
        just(',').to(Token::Comma),
        just(':').to(Token::Colon),
        just(';').to(Token::Semicolon),
    ));

    let operators = multi_char_operators.or(single_char_operators);

    let comment = just('#')
        .ignore_then(any().and_is(just('\n').not()).repeated())
        .then_ignore(just('\n').or_not())
        .ignored();

    let padding = choice((comment, any().filter(|c: &char| c.is_whitespace()).ignored()));

    let token = choice((number, string, ident, operators))
        .map_with(|tok, e| (tok, e.span()))
        .padded_by(padding.clone().repeated());

    padding
        .repeated()
        .ignore_then(token.repeated().collect())
        .then_ignore(end())
}

/// A token annotated with its 1-based source line and byte span.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub tok: Token,
    pub line: usize,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct LexError {
    pub found: Option<char>,
    pub line: usize,
    pub span: Span,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            // A lone '"' is the start of a string whose closing quote never came.
            Some('"') | None => {
                write!(f, "Unterminated string literal at line {}", self.line)
            }
            Some(ch) => write!(f, "Unexpected character '{}' at line {}", ch, self.line),
        }
    }
}

impl std::error::Error for LexError {}

impl LexError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .with_code("E0101")
            .with_label(Label::new(self.span, "not a valid token"))
    }
}

/// Tokenize a source string, annotating every token with its line number.
pub fn lex(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let (output, errors) = lexer().parse(source).into_output_errors();

    if let Some(err) = errors.into_iter().next() {
        let start = err.span().start;
        let (line, _) = line_col(source, start);
        let found = source[start.min(source.len())..].chars().next();
        let end = (start + found.map(char::len_utf8).unwrap_or(0)).min(source.len());
        return Err(LexError {
            found,
            line,
            span: Span::new(start, end.max(start)),
        });
    }

    let raw = output.unwrap_or_default();
    let mut tokens = Vec::with_capacity(raw.len());
    let mut line = 1usize;
    let mut cursor = 0usize;
    for (tok, span) in raw {
        let start = span.start;
        for ch in source[cursor..start].chars() {
            if ch == '\n' {
                line += 1;
            }
        }
        cursor = start;
        tokens.push(SpannedToken {
            tok,
            line,
            span: Span::new(span.start, span.end),
        });
    }
    Ok(tokens)
}
