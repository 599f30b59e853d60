//! `calcular`: arithmetic expression evaluation.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/' | '%') unary)*
//! unary := ('+' | '-') unary | power
//! power := atom (('**' | '^') unary)?
//! atom  := number | ident | ident '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! Power binds tighter than unary minus (`-2**2 == -4`) and is
//! right-associative (`2**3**2 == 512`). Nesting through parentheses, calls,
//! signs and exponents is capped at [`MAX_DEPTH`].

use async_trait::async_trait;
use thiserror::Error;

use super::tool::{Tool, ToolError, ToolOutput};
use super::ToolKind;

/// Deepest nesting the parser descends into before giving up.
pub const MAX_DEPTH: usize = 256;

/// Why an expression could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown name '{0}'")]
    UnknownIdentifier(String),

    #[error("{function}() takes {expected} argument(s), got {found}")]
    WrongArity {
        function: String,
        expected: &'static str,
        found: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite real number")]
    NotReal,

    #[error("expression nested too deeply")]
    TooDeep,
}

/// Evaluates `calcular` arguments and rounds to two decimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        ToolKind::Calculate.action_name()
    }

    async fn execute(&self, argument: &str) -> Result<ToolOutput, ToolError> {
        let value = evaluate(argument)?;
        Ok(ToolOutput::Number(round2(value)))
    }
}

/// Evaluate an arithmetic expression to a finite real number.
pub fn evaluate(input: &str) -> Result<f64, ExpressionError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(extra) = parser.peek() {
        return Err(extra.unexpected());
    }
    finite(value)
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    let scaled = (value * 100.0).round() / 100.0;
    if !scaled.is_finite() {
        return value;
    }
    // Avoid rendering "-0.0".
    if scaled == 0.0 {
        0.0
    } else {
        scaled
    }
}

fn finite(value: f64) -> Result<f64, ExpressionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpressionError::NotReal)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    text: String,
    position: usize,
}

impl Token {
    fn unexpected(&self) -> ExpressionError {
        ExpressionError::UnexpectedToken {
            token: self.text.clone(),
            position: self.position,
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let kind = if c.is_ascii_digit() || c == '.' {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            // Exponent only when digits follow, so `2*e` keeps `e` as a name.
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| ExpressionError::InvalidNumber(text.clone()))?;
            TokenKind::Number(value)
        } else if c.is_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            TokenKind::Ident(chars[start..i].iter().collect())
        } else {
            i += 1;
            match c {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' if chars.get(i) == Some(&'*') => {
                    i += 1;
                    TokenKind::Pow
                }
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '%' => TokenKind::Percent,
                '^' => TokenKind::Pow,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                ',' => TokenKind::Comma,
                other => {
                    return Err(ExpressionError::UnexpectedChar {
                        ch: other,
                        position: start,
                    })
                }
            }
        };

        tokens.push(Token {
            kind,
            text: chars[start..i].iter().collect(),
            position: start,
        });
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, ExpressionError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ExpressionError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().map(|t| &t.kind) == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ExpressionError> {
        let token = self.next()?;
        if &token.kind == kind {
            Ok(())
        } else {
            Err(token.unexpected())
        }
    }

    /// Run `parse` one level deeper, failing once past `MAX_DEPTH`.
    fn nested<T>(
        &mut self,
        parse: fn(&mut Self) -> Result<T, ExpressionError>,
    ) -> Result<T, ExpressionError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExpressionError::TooDeep);
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        loop {
            if self.eat(&TokenKind::Plus) {
                value += self.term()?;
            } else if self.eat(&TokenKind::Minus) {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        loop {
            if self.eat(&TokenKind::Star) {
                value *= self.unary()?;
            } else if self.eat(&TokenKind::Slash) {
                let rhs = self.unary()?;
                if rhs == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                value /= rhs;
            } else if self.eat(&TokenKind::Percent) {
                let rhs = self.unary()?;
                if rhs == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                // Result takes the sign of the divisor.
                value = value - rhs * (value / rhs).floor();
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        if self.eat(&TokenKind::Minus) {
            return Ok(-self.nested(Self::unary)?);
        }
        if self.eat(&TokenKind::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> Result<f64, ExpressionError> {
        let base = self.atom()?;
        if self.eat(&TokenKind::Pow) {
            let exponent = self.nested(Self::unary)?;
            if base == 0.0 && exponent < 0.0 {
                return Err(ExpressionError::DivisionByZero);
            }
            return finite(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, ExpressionError> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Number(value) => Ok(value),
            TokenKind::LParen => {
                let value = self.nested(Self::expr)?;
                self.expect(&TokenKind::RParen)?;
                Ok(value)
            }
            TokenKind::Ident(name) => {
                if self.eat(&TokenKind::LParen) {
                    let args = self.nested(Self::arguments)?;
                    call(&name, &args)
                } else {
                    constant(&name)
                }
            }
            _ => Err(token.unexpected()),
        }
    }

    fn arguments(&mut self) -> Result<Vec<f64>, ExpressionError> {
        let mut args = vec![self.expr()?];
        while self.eat(&TokenKind::Comma) {
            args.push(self.expr()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }
}

fn constant(name: &str) -> Result<f64, ExpressionError> {
    match name {
        "pi" => Ok(std::f64::consts::PI),
        "e" | "E" => Ok(std::f64::consts::E),
        _ => Err(ExpressionError::UnknownIdentifier(name.to_string())),
    }
}

fn call(name: &str, args: &[f64]) -> Result<f64, ExpressionError> {
    let unary = |f: fn(f64) -> f64| -> Result<f64, ExpressionError> {
        match args {
            [x] => finite(f(*x)),
            _ => Err(ExpressionError::WrongArity {
                function: name.to_string(),
                expected: "1",
                found: args.len(),
            }),
        }
    };

    match name {
        "sqrt" => unary(f64::sqrt),
        "abs" => unary(f64::abs),
        "exp" => unary(f64::exp),
        "ln" => unary(f64::ln),
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "log" => match args {
            [x] => finite(x.ln()),
            [x, base] => finite(x.ln() / base.ln()),
            _ => Err(ExpressionError::WrongArity {
                function: name.to_string(),
                expected: "1 or 2",
                found: args.len(),
            }),
        },
        _ => Err(ExpressionError::UnknownIdentifier(name.to_string())),
    }
}
