use std::fmt;

/// Expression calculation result: either a finite value or an error
pub type CalcResult = Result<f64, CalcError>;
pub(crate) type CalcErrorResult = Result<(), CalcError>;

#[derive(Clone, PartialEq)]
pub enum CalcError {
    InvalidCharacter(char),
    StrToFloat(String),
    InvalidOp(String),
    ParseFailed(String),

    ConsecutiveOperators,
    OperatorAtStart,
    OperatorAtEnd,
    OpenBracketMismatch,
    ClosingBracketMismatch,
    TooManyOps,
    InsufficientOps,
    EmptyExpression,

    DividedByZero,
    NegativeRadicand,
    NonPositiveLog,
    ArgumentOutOfRange(&'static str),
    UndefinedTangent,
    ZeroRootExponent,
    NegativeFactorial,
    NonIntegerFactorial,
    Overflow,
    InvalidResult,

    Unreachable,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::InvalidCharacter(c) => write!(f, "Invalid character '{}' in expression", c),
            CalcError::StrToFloat(s) => write!(f, "Failed to convert '{}' to float", s),
            CalcError::InvalidOp(s) => write!(f, "Invalid operator '{}'", s),
            CalcError::ParseFailed(s) => write!(f, "Failed to parse expression: {}", s),

            CalcError::ConsecutiveOperators => write!(f, "Two operators in a row"),
            CalcError::OperatorAtStart => write!(f, "Expression cannot start with an operator"),
            CalcError::OperatorAtEnd => write!(f, "Expression cannot end with an operator"),
            CalcError::OpenBracketMismatch => write!(f, "Mismatched opening bracket"),
            CalcError::ClosingBracketMismatch => write!(f, "Mismatched closing bracket"),
            CalcError::TooManyOps => write!(f, "Too many operators"),
            CalcError::InsufficientOps => write!(f, "Too many numbers"),
            CalcError::EmptyExpression => write!(f, "Nothing to calculate"),

            CalcError::DividedByZero => write!(f, "Division by zero"),
            CalcError::NegativeRadicand => write!(f, "Square root of a negative number"),
            CalcError::NonPositiveLog => write!(f, "Logarithm of a non-positive number"),
            CalcError::ArgumentOutOfRange(s) => write!(f, "Argument of '{}' out of range", s),
            CalcError::UndefinedTangent => write!(f, "Tangent is undefined for this angle"),
            CalcError::ZeroRootExponent => write!(f, "Root exponent cannot be zero"),
            CalcError::NegativeFactorial => write!(f, "Factorial of a negative number"),
            CalcError::NonIntegerFactorial => write!(f, "Factorial of a non-integer number"),
            CalcError::Overflow => write!(f, "Result is too large"),
            CalcError::InvalidResult => write!(f, "Result is not a finite number"),

            CalcError::Unreachable => write!(f, "unreachable"),
        }
    }
}

impl fmt::Debug for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for CalcError {}
