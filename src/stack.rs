use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::*;
use crate::ops;

/// Binary operators of the expression language
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
}

impl Op {
    /// Maps an operator spelling (already lowercased) to its kind.
    /// Unicode aliases are accepted alongside ASCII ones.
    pub(crate) fn from_str(s: &str) -> Option<Op> {
        match s {
            "+" => Some(Op::Add),
            "-" | "−" => Some(Op::Sub),
            "*" | "×" => Some(Op::Mul),
            "/" | "÷" => Some(Op::Div),
            "^" => Some(Op::Pow),
            "mod" => Some(Op::Mod),
            _ => None,
        }
    }
}

/// A single lexical token of an expression
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Token {
    Num(f64),
    Op(Op),
    OpenB,
    CloseB,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Entry {
    Val(f64),
    Op(Op),
    OpenB,
}

pub(crate) struct OpInfo {
    pub(crate) priority: i32,
    pub(crate) right_assoc: bool,
}

lazy_static! {
    // built once, read-only afterwards
    static ref OPERATORS: HashMap<Op, OpInfo> = {
        let mut m = HashMap::new();
        m.insert(Op::Pow, OpInfo { priority: 3, right_assoc: true });
        m.insert(Op::Mul, OpInfo { priority: 2, right_assoc: false });
        m.insert(Op::Div, OpInfo { priority: 2, right_assoc: false });
        m.insert(Op::Mod, OpInfo { priority: 2, right_assoc: false });
        m.insert(Op::Add, OpInfo { priority: 1, right_assoc: false });
        m.insert(Op::Sub, OpInfo { priority: 1, right_assoc: false });
        m
    };
}

// the table covers every Op variant, so indexing cannot fail
pub(crate) fn op_info(op: Op) -> &'static OpInfo {
    &OPERATORS[&op]
}

/// Converts an infix token sequence into postfix order and evaluates it.
///
/// `queue` is the operator stack of the shunting-yard algorithm, `output`
/// collects the postfix sequence, and `values` is the evaluation stack used
/// by [`Stack::calculate`]. All three live only for one evaluation.
pub(crate) struct Stack {
    queue: Vec<Entry>,
    output: Vec<Entry>,
    values: Vec<f64>,
}

impl Stack {
    pub(crate) fn new() -> Self {
        Stack {
            queue: Vec::new(),
            output: Vec::new(),
            values: Vec::new(),
        }
    }

    // move operators from the queue to output while the top operator has
    // higher priority, or equal priority and the incoming operator is
    // left-associative
    fn pop_while_priority(&mut self, priority: i32, right_assoc: bool) {
        loop {
            if self.queue.is_empty() {
                return;
            }
            // queue is not empty, so unwrap is OK
            let e = self.queue.pop().unwrap();
            match e {
                Entry::OpenB => {
                    self.queue.push(e);
                    return;
                }
                Entry::Op(op) => {
                    let p = op_info(op).priority;
                    if p > priority || (p == priority && !right_assoc) {
                        self.output.push(e);
                    } else {
                        self.queue.push(e);
                        return;
                    }
                }
                Entry::Val(..) => return, // unreachable: values go straight to output
            }
        }
    }

    // move operators from the queue to output until the matching bracket,
    // which is discarded
    fn pop_until_bracket(&mut self) -> CalcErrorResult {
        loop {
            if self.queue.is_empty() {
                return Err(CalcError::ClosingBracketMismatch);
            }
            // unwrap is ok - vector is not empty
            let e = self.queue.pop().unwrap();
            match e {
                Entry::OpenB => return Ok(()),
                _ => self.output.push(e),
            }
        }
    }

    // move all remaining operators from queue to output.
    // Must be called only after the expression ends. A bracket still in the
    // queue means it was never closed.
    fn pop_all(&mut self) -> CalcErrorResult {
        while let Some(e) = self.queue.pop() {
            match e {
                Entry::OpenB => return Err(CalcError::OpenBracketMismatch),
                Entry::Op(..) => self.output.push(e),
                Entry::Val(..) => return Err(CalcError::Unreachable),
            }
        }
        Ok(())
    }

    /// Feeds the next infix token to the shunting-yard conversion
    pub(crate) fn push(&mut self, tok: Token) -> CalcErrorResult {
        match tok {
            Token::Num(v) => {
                self.output.push(Entry::Val(v));
                Ok(())
            }
            Token::Op(op) => {
                let info = op_info(op);
                self.pop_while_priority(info.priority, info.right_assoc);
                self.queue.push(Entry::Op(op));
                Ok(())
            }
            Token::OpenB => {
                self.queue.push(Entry::OpenB);
                Ok(())
            }
            Token::CloseB => self.pop_until_bracket(),
        }
    }

    /// Evaluates the collected postfix sequence into a single value.
    /// The first failing operation aborts the whole evaluation.
    pub(crate) fn calculate(&mut self) -> CalcResult {
        self.pop_all()?;
        if self.output.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        self.values = Vec::new();
        for i in 0..self.output.len() {
            match self.output[i] {
                Entry::Val(v) => self.values.push(v),
                Entry::Op(op) => self.apply(op)?,
                Entry::OpenB => return Err(CalcError::Unreachable),
            }
        }

        if self.values.len() != 1 {
            return Err(CalcError::InsufficientOps);
        }
        // values holds exactly one element here - unwrap is fine
        Ok(self.values.pop().unwrap())
    }

    // pop two operands (right one first - the stack is LIFO) and push the
    // operation result back
    fn apply(&mut self, op: Op) -> CalcErrorResult {
        if self.values.len() < 2 {
            return Err(CalcError::TooManyOps);
        }
        // length checked above, both unwraps are OK
        let v2 = self.values.pop().unwrap();
        let v1 = self.values.pop().unwrap();
        let v = match op {
            Op::Add => ops::add(v1, v2),
            Op::Sub => ops::subtract(v1, v2),
            Op::Mul => ops::multiply(v1, v2),
            Op::Div => ops::divide(v1, v2),
            Op::Pow => ops::power(v1, v2),
            Op::Mod => ops::modulo(v1, v2),
        }?;
        self.values.push(v);
        Ok(())
    }
}
