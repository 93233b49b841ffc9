//! # Expression evaluator
//!
//! Evaluates a textual arithmetic formula into a single `f64` result or a
//! descriptive error. A full expression like `2+3*4` is calculated with
//! standard operator precedence and associativity instead of naive
//! left-to-right order.
//!
//! Operators (starting from highest priority):
//! * `^` - power (the only right-associative operator: `2^3^2` is `512`)
//! * `*`, `/`, `mod` - multiplication, division, remainder
//! * `+`, `-` - addition, subtraction
//!
//! Unicode aliases are accepted alongside ASCII: `×` for `*`, `÷` for `/`,
//! and `−` for `-`. The keyword `mod` is case-insensitive. Both `.` and `,`
//! work as the decimal separator, and numbers may carry a scientific-notation
//! exponent: `1.5E+10`, `2e-05`.
//!
//! A leading `-`, or one right after `(` or another operator, is a unary
//! minus: `-5+3` is `-2`, and `10 - -5` is `15`.
//!
//! Every calculation either succeeds with a finite number or fails with an
//! error - a result is never `NaN` or infinity. Division by zero, square
//! root of a negative number, logarithm of a non-positive number, and
//! similar domain violations all come back as [`errors::CalcError`] values.
//! Empty or whitespace-only input evaluates to `0`.
//!
//! The evaluator keeps no state between calls: every call to
//! [`parse::eval`] is independent and safe to run from any number of
//! threads concurrently.
//!
//! Besides the expression pipeline, [`ops`] exposes every math operation as
//! a standalone guarded function (`divide`, `square_root`, `factorial`, ...)
//! for button-driven callers that do not go through the parser.

#[macro_use]
extern crate pest_derive;

pub mod errors;
pub mod ops;
pub mod parse;
pub mod stack;
