//! Native words
//!
//! The native table is a closed enum: every built-in word is a variant, and
//! `Builtin::apply` runs it against the interpreter state. The `builtins!`
//! macro keeps the name, stack effect and variant of each word in one row.
//!
//! # Overflow Behavior
//!
//! Integers are 64-bit two's complement and every operation wraps:
//! - `+`, `-`, `*`: wrap on overflow
//! - `/`: i64::MIN / -1 wraps to i64::MIN
//! - `negate`, `abs`: i64::MIN maps to itself
//!
//! `/` and `mod` fail with a division-by-zero error instead of trapping.
//! Both operands are consumed before the check.

use tinyforth_core::NumericStack;

use crate::error::ForthError;
use crate::interpreter::{State, Status};
use crate::value::ReturnValue;

/// Declare the native word table
///
/// Each row is `Variant => "name", "( stack effect )"`.
macro_rules! builtins {
    ($($variant:ident => $name:literal, $effect:literal;)*) => {
        /// A native word
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Builtin {
            $($variant,)*
        }

        impl Builtin {
            /// Every native word, in table order
            pub const ALL: &'static [Builtin] = &[$(Builtin::$variant,)*];

            /// Name the word is invoked by
            pub fn name(self) -> &'static str {
                match self {
                    $(Builtin::$variant => $name,)*
                }
            }

            /// Stack effect in `( before -- after )` notation
            pub fn stack_effect(self) -> &'static str {
                match self {
                    $(Builtin::$variant => $effect,)*
                }
            }
        }
    };
}

builtins! {
    Bye => "bye", "( -- )";
    Pop => ".", "( n -- )";
    PrintStack => ".s", "( -- )";
    Add => "+", "( n n -- n )";
    Sub => "-", "( n n -- n )";
    Mul => "*", "( n n -- n )";
    Div => "/", "( n n -- n )";
    Mod => "mod", "( n n -- n )";
    Negate => "negate", "( n -- n )";
    Abs => "abs", "( n -- n )";
}

impl Builtin {
    /// Look up a native word by name
    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Run the word against the interpreter state
    pub fn apply(self, state: &mut State) -> Result<(), ForthError> {
        match self {
            Builtin::Bye => {
                state.status = Status::Shutdown;
                Ok(())
            }
            Builtin::Pop => {
                let val = state.int_stack.pop()?;
                state.return_value = ReturnValue::Integer(val);
                Ok(())
            }
            Builtin::PrintStack => {
                state.return_value = ReturnValue::Text(format_stack(&state.int_stack));
                Ok(())
            }
            Builtin::Add => binary(state, |val1, val2| Ok(val1.wrapping_add(val2))),
            Builtin::Sub => binary(state, |val1, val2| Ok(val2.wrapping_sub(val1))),
            Builtin::Mul => binary(state, |val1, val2| Ok(val1.wrapping_mul(val2))),
            Builtin::Div => binary(state, |val1, val2| {
                if val1 == 0 {
                    return Err(ForthError::DivisionByZero { op: "/" });
                }
                Ok(val2.wrapping_div(val1))
            }),
            Builtin::Mod => binary(state, |val1, val2| {
                if val1 == 0 {
                    return Err(ForthError::DivisionByZero { op: "mod" });
                }
                Ok(val2.wrapping_rem(val1))
            }),
            Builtin::Negate => unary(state, i64::wrapping_neg),
            Builtin::Abs => unary(state, branchless_abs),
        }
    }
}

/// Pop the two top integers as `(val1, val2)`, `val1` being the top
///
/// Checks the depth first so a failure leaves the stack untouched.
fn pop_two(stack: &mut NumericStack<i64>) -> Result<(i64, i64), ForthError> {
    if stack.len() < 2 {
        return Err(ForthError::TooFewItems {
            needed: 2,
            found: stack.len(),
        });
    }
    let val1 = stack.pop()?;
    let val2 = stack.pop()?;
    Ok((val1, val2))
}

fn binary(
    state: &mut State,
    op: impl FnOnce(i64, i64) -> Result<i64, ForthError>,
) -> Result<(), ForthError> {
    let (val1, val2) = pop_two(&mut state.int_stack)?;
    state.int_stack.push(op(val1, val2)?);
    Ok(())
}

fn unary(state: &mut State, op: impl FnOnce(i64) -> i64) -> Result<(), ForthError> {
    let val = state.int_stack.pop()?;
    state.int_stack.push(op(val));
    Ok(())
}

/// Absolute value via a sign mask
///
/// `mask` is all ones for negative input and zero otherwise, so
/// `(v + mask) ^ mask` is two's complement negation exactly when `v < 0`.
/// i64::MIN comes back unchanged.
pub fn branchless_abs(v: i64) -> i64 {
    let mask = v >> (i64::BITS - 1);
    v.wrapping_add(mask) ^ mask
}

/// Render the stack as `<len>  Top-->v1,v2,...`, top first
pub fn format_stack(stack: &NumericStack<i64>) -> String {
    let mut out = format!("<{}>", stack.len());
    if !stack.is_empty() {
        let items: Vec<String> = stack.iter().map(|v| v.to_string()).collect();
        out.push_str("  Top-->");
        out.push_str(&items.join(","));
    }
    out
}
