//! Elementary and scientific math operations.
//!
//! Every function is pure and returns [`CalcResult`]: a finite `f64` or an
//! error. A caller never observes `NaN` or infinity - any operation that
//! would produce one fails instead, so a bad value cannot silently poison a
//! later calculation. All "is this zero" checks go through [`EPSILON`]
//! because exact comparison against `0.0` is unreliable after rounding.

use std::f64::consts;

use crate::errors::*;

/// Tolerance for effectively-zero checks
pub const EPSILON: f64 = 1e-15;

pub const PI: f64 = consts::PI;
pub const E: f64 = consts::E;

pub(crate) fn near_zero(v: f64) -> bool {
    v.abs() < EPSILON
}

// reject NaN and infinity with the given error
fn finite(v: f64, err: CalcError) -> CalcResult {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(err)
    }
}

pub fn add(a: f64, b: f64) -> CalcResult {
    finite(a + b, CalcError::Overflow)
}

pub fn subtract(a: f64, b: f64) -> CalcResult {
    finite(a - b, CalcError::Overflow)
}

pub fn multiply(a: f64, b: f64) -> CalcResult {
    finite(a * b, CalcError::Overflow)
}

pub fn divide(a: f64, b: f64) -> CalcResult {
    if near_zero(b) {
        return Err(CalcError::DividedByZero);
    }
    finite(a / b, CalcError::Overflow)
}

pub fn modulo(a: f64, b: f64) -> CalcResult {
    if near_zero(b) {
        return Err(CalcError::DividedByZero);
    }
    finite(a % b, CalcError::InvalidResult)
}

pub fn reciprocal(x: f64) -> CalcResult {
    if near_zero(x) {
        return Err(CalcError::DividedByZero);
    }
    Ok(1.0 / x)
}

pub fn negate(x: f64) -> CalcResult {
    Ok(-x)
}

pub fn abs(x: f64) -> CalcResult {
    Ok(x.abs())
}

pub fn square(x: f64) -> CalcResult {
    finite(x * x, CalcError::Overflow)
}

pub fn cube(x: f64) -> CalcResult {
    finite(x * x * x, CalcError::Overflow)
}

pub fn square_root(x: f64) -> CalcResult {
    if x < 0.0 {
        return Err(CalcError::NegativeRadicand);
    }
    Ok(x.sqrt())
}

pub fn cube_root(x: f64) -> CalcResult {
    Ok(x.cbrt())
}

/// The n-th root of `x`. A negative radicand is allowed only for an odd
/// integral root index; the even case has no real root.
pub fn nth_root(x: f64, n: f64) -> CalcResult {
    if near_zero(n) {
        return Err(CalcError::ZeroRootExponent);
    }
    if x < 0.0 {
        if n.fract() == 0.0 && (n as i64) % 2 != 0 {
            return finite(-((-x).powf(1.0 / n)), CalcError::InvalidResult);
        }
        return Err(CalcError::ArgumentOutOfRange("root"));
    }
    finite(x.powf(1.0 / n), CalcError::InvalidResult)
}

pub fn power(base: f64, exp: f64) -> CalcResult {
    finite(base.powf(exp), CalcError::InvalidResult)
}

pub fn log10(x: f64) -> CalcResult {
    if x <= 0.0 {
        return Err(CalcError::NonPositiveLog);
    }
    Ok(x.log10())
}

pub fn ln(x: f64) -> CalcResult {
    if x <= 0.0 {
        return Err(CalcError::NonPositiveLog);
    }
    Ok(x.ln())
}

pub fn exp(x: f64) -> CalcResult {
    finite(x.exp(), CalcError::Overflow)
}

pub fn exp10(x: f64) -> CalcResult {
    finite(10.0f64.powf(x), CalcError::Overflow)
}

pub fn sin(x: f64) -> CalcResult {
    Ok(x.sin())
}

pub fn cos(x: f64) -> CalcResult {
    Ok(x.cos())
}

/// Tangent of an angle in radians; undefined where cosine vanishes
pub fn tan(x: f64) -> CalcResult {
    if near_zero(x.cos()) {
        return Err(CalcError::UndefinedTangent);
    }
    Ok(x.tan())
}

pub fn asin(x: f64) -> CalcResult {
    if x < -1.0 || x > 1.0 {
        return Err(CalcError::ArgumentOutOfRange("asin"));
    }
    finite(x.asin(), CalcError::InvalidResult)
}

pub fn acos(x: f64) -> CalcResult {
    if x < -1.0 || x > 1.0 {
        return Err(CalcError::ArgumentOutOfRange("acos"));
    }
    finite(x.acos(), CalcError::InvalidResult)
}

pub fn atan(x: f64) -> CalcResult {
    Ok(x.atan())
}

pub fn sinh(x: f64) -> CalcResult {
    finite(x.sinh(), CalcError::Overflow)
}

pub fn cosh(x: f64) -> CalcResult {
    finite(x.cosh(), CalcError::Overflow)
}

pub fn tanh(x: f64) -> CalcResult {
    finite(x.tanh(), CalcError::InvalidResult)
}

/// Factorial of a non-negative integer value. The argument is an `f64` for
/// a uniform surface, so integrality is checked at runtime.
pub fn factorial(n: f64) -> CalcResult {
    if n < 0.0 {
        return Err(CalcError::NegativeFactorial);
    }
    if n.fract() != 0.0 {
        return Err(CalcError::NonIntegerFactorial);
    }
    let mut res = 1.0f64;
    let mut i = 2.0f64;
    while i <= n {
        res *= i;
        if res.is_infinite() {
            return Err(CalcError::Overflow);
        }
        i += 1.0;
    }
    Ok(res)
}

pub fn percentage(x: f64) -> CalcResult {
    Ok(x / 100.0)
}

pub fn deg_to_rad(deg: f64) -> CalcResult {
    Ok(deg * consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> CalcResult {
    Ok(rad * 180.0 / consts::PI)
}
