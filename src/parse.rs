use pest::Parser;

use crate::errors::*;
use crate::stack::{Op, Stack, Token};

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

/// Evaluates an infix expression and returns either its value or the first
/// error found in any stage of the pipeline.
///
/// Empty and whitespace-only input evaluates to `0` - a convenience for
/// interactive calculators, not an error.
pub fn eval(expr: &str) -> CalcResult {
    if expr.trim().is_empty() {
        return Ok(0.0);
    }

    let tokens = tokenize(expr)?;
    let tokens = resolve_unary(tokens);
    validate(&tokens)?;

    let mut stk = Stack::new();
    for tok in tokens {
        stk.push(tok)?;
    }
    stk.calculate()
}

// report the character the lexer choked on
fn lex_error(expr: &str, err: &pest::error::Error<Rule>) -> CalcError {
    let pos = match err.location {
        pest::error::InputLocation::Pos(p) => p,
        pest::error::InputLocation::Span((s, _)) => s,
    };
    match expr.get(pos..).and_then(|s| s.chars().next()) {
        Some(c) => CalcError::InvalidCharacter(c),
        None => CalcError::ParseFailed("invalid expression".to_string()),
    }
}

pub(crate) fn tokenize(expr: &str) -> Result<Vec<Token>, CalcError> {
    let pairs = match CalcParser::parse(Rule::expr, expr) {
        Ok(p) => p,
        Err(e) => return Err(lex_error(expr, &e)),
    };

    let mut tokens = Vec::new();
    for pair in pairs {
        let rule = pair.as_rule();
        let val = pair.as_span().as_str().to_lowercase();
        match rule {
            Rule::num => {
                // ',' is an accepted decimal separator, normalize it first
                let raw = val.replace(',', ".");
                // a literal too large for f64 parses to infinity; it must
                // not enter the pipeline as a value
                match raw.parse::<f64>() {
                    Ok(v) if v.is_finite() => tokens.push(Token::Num(v)),
                    Ok(..) => return Err(CalcError::Overflow),
                    Err(..) => return Err(CalcError::StrToFloat(raw)),
                }
            }
            Rule::op => match Op::from_str(&val) {
                Some(op) => tokens.push(Token::Op(op)),
                None => return Err(CalcError::InvalidOp(val)),
            },
            Rule::open_b => tokens.push(Token::OpenB),
            Rule::close_b => tokens.push(Token::CloseB),
            Rule::EOI => {}
            _ => return Err(CalcError::Unreachable),
        }
    }
    Ok(tokens)
}

// A '-' at the start, after '(' or after another operator is a unary minus.
// It is merged into a following numeric literal; before anything else it is
// rewritten as "0 -" so the rest of the pipeline sees ordinary subtraction.
// Runs before validate() so rewritten chains do not trip the
// consecutive-operator check.
pub(crate) fn resolve_unary(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(tok) = iter.next() {
        let unary = tok == Token::Op(Op::Sub)
            && match out.last() {
                None | Some(Token::OpenB) | Some(Token::Op(..)) => true,
                _ => false,
            };
        if !unary {
            out.push(tok);
            continue;
        }
        match iter.peek() {
            Some(&Token::Num(v)) => {
                iter.next();
                out.push(Token::Num(-v));
            }
            _ => {
                out.push(Token::Num(0.0));
                out.push(Token::Op(Op::Sub));
            }
        }
    }
    out
}

// structural checks that run after unary resolution: what is still an
// operator here is a binary one
pub(crate) fn validate(tokens: &[Token]) -> CalcErrorResult {
    if let Some(Token::Op(..)) = tokens.first() {
        return Err(CalcError::OperatorAtStart);
    }
    if let Some(Token::Op(..)) = tokens.last() {
        return Err(CalcError::OperatorAtEnd);
    }
    for pair in tokens.windows(2) {
        if let [Token::Op(..), Token::Op(..)] = pair {
            return Err(CalcError::ConsecutiveOperators);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2+3*4"), Ok(14.0));
        assert_eq!(eval("(2+3)*4"), Ok(20.0));
        assert_eq!(eval("2-3-4"), Ok(-5.0));
        assert_eq!(eval("100/5/2"), Ok(10.0));
        assert_eq!(eval("2+3*4^2"), Ok(50.0));
    }

    #[test]
    fn test_power_right_assoc() {
        assert_eq!(eval("2^3^2"), Ok(512.0));
        assert_eq!(eval("(2^3)^2"), Ok(64.0));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(eval("-5+3"), Ok(-2.0));
        assert_eq!(eval("10 - -5"), Ok(15.0));
        assert_eq!(eval("-(2+3)"), Ok(-5.0));
        assert_eq!(eval("2*-3"), Ok(-6.0));
        assert_eq!(eval("--5"), Ok(5.0));
        assert_eq!(eval("2^-2"), Ok(0.25));
    }

    #[test]
    fn test_unicode_operators() {
        assert_eq!(eval("2×3"), Ok(6.0));
        assert_eq!(eval("7÷2"), Ok(3.5));
        assert_eq!(eval("5−2"), Ok(3.0));
        assert_eq!(eval("−5+3"), Ok(-2.0));
    }

    #[test]
    fn test_modulo() {
        assert_eq!(eval("5 mod 3"), Ok(2.0));
        assert_eq!(eval("5MOD3"), Ok(2.0));
        assert_eq!(eval("10 mod 4 mod 3"), Ok(2.0));
        assert_eq!(eval("5 mod 0"), Err(CalcError::DividedByZero));
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(eval("1.5E+2"), Ok(150.0));
        assert_eq!(eval("2E-05"), Ok(0.00002));
        assert_eq!(eval("1,5+1"), Ok(2.5));
        assert_eq!(eval("1.5e2+1"), Ok(151.0));
        assert_eq!(eval(".5*2"), Ok(1.0));
        assert_eq!(eval("2."), Ok(2.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("5/0"), Err(CalcError::DividedByZero));
        assert_eq!(eval("1/(2-2)"), Err(CalcError::DividedByZero));
        assert_eq!(eval("(3-3)/2"), Ok(0.0));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(eval("2++3"), Err(CalcError::ConsecutiveOperators));
        assert_eq!(eval("2+"), Err(CalcError::OperatorAtEnd));
        assert_eq!(eval("+2"), Err(CalcError::OperatorAtStart));
        assert_eq!(eval("(2+3"), Err(CalcError::OpenBracketMismatch));
        assert_eq!(eval("2+3)"), Err(CalcError::ClosingBracketMismatch));
        assert_eq!(eval("2 3"), Err(CalcError::InsufficientOps));
        assert_eq!(eval("()"), Err(CalcError::EmptyExpression));
        assert_eq!(eval("2+x"), Err(CalcError::InvalidCharacter('x')));
        assert_eq!(eval("2#3"), Err(CalcError::InvalidCharacter('#')));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(eval(""), Ok(0.0));
        assert_eq!(eval("   "), Ok(0.0));
        assert_eq!(eval("\t\n"), Ok(0.0));
    }

    #[test]
    fn test_overflow_propagates() {
        assert_eq!(eval("9^9^9"), Err(CalcError::InvalidResult));
        assert_eq!(eval("1e308+1e308"), Err(CalcError::Overflow));
    }

    #[test]
    fn test_overflowing_literal() {
        assert_eq!(eval("1e400"), Err(CalcError::Overflow));
        assert_eq!(eval("(1e400)"), Err(CalcError::Overflow));
        assert_eq!(eval("1e400 mod 3"), Err(CalcError::Overflow));
        assert_eq!(eval("-1e999"), Err(CalcError::Overflow));
        assert_eq!(eval("1e308"), Ok(1e308));
    }

    #[test]
    fn test_tokenize_passes() {
        let tokens = tokenize("-(2+3)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Op(Op::Sub),
                Token::OpenB,
                Token::Num(2.0),
                Token::Op(Op::Add),
                Token::Num(3.0),
                Token::CloseB,
            ]
        );
        let tokens = resolve_unary(tokens);
        assert_eq!(
            tokens,
            vec![
                Token::Num(0.0),
                Token::Op(Op::Sub),
                Token::OpenB,
                Token::Num(2.0),
                Token::Op(Op::Add),
                Token::Num(3.0),
                Token::CloseB,
            ]
        );
        assert!(validate(&tokens).is_ok());

        let tokens = resolve_unary(tokenize("-5*2").unwrap());
        assert_eq!(
            tokens,
            vec![Token::Num(-5.0), Token::Op(Op::Mul), Token::Num(2.0)]
        );
    }
}
