//! Expression evaluator
//!
//! Evaluates `Expr` trees against a `MetadataStore`. Comparison semantics
//! are a total table over the `Value` union:
//!
//! - numeric operands (`Int`, `Number`) coerce to `Decimal` first
//! - equality against text stringifies the other side and compares
//!   case-insensitively
//! - boolean equality requires both sides boolean
//! - ordering requires both sides numeric
//!
//! `and`/`or` take two already-evaluated booleans; anything else is a type
//! mismatch. There is no short-circuiting and no precedence between them.

use moneyflow_core::Value;

use crate::error::PolicyError;
use crate::expr::{CmpOp, Expr};
use crate::metadata::MetadataStore;

/// Stateless evaluator for condition expressions.
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Evaluate an expression to a value.
    pub fn eval(expr: &Expr, metadata: &MetadataStore) -> Result<Value, PolicyError> {
        match expr {
            Expr::Param { id } => metadata.param(id).cloned(),
            Expr::Lit { value } => Ok(value.clone()),
            Expr::Path { base, path } => {
                let base = Self::eval(base, metadata)?;
                walk_path(&base, path)
            }
            Expr::Cmp { op, lhs, rhs } => {
                let lhs = Self::eval(lhs, metadata)?;
                let rhs = Self::eval(rhs, metadata)?;
                compare(&lhs, *op, &rhs).map(Value::Bool)
            }
            Expr::Has { base, needle } => {
                let base = Self::eval(base, metadata)?;
                let needle = Self::eval(needle, metadata)?;
                Ok(Value::Bool(has_value(&base, &needle)))
            }
            Expr::HasKey { base, key } => {
                let base = Self::eval(base, metadata)?;
                let found = matches!(&base, Value::Map(map) if map.contains_key(key));
                Ok(Value::Bool(found))
            }
            Expr::And { lhs, rhs } => {
                let lhs = Self::eval(lhs, metadata)?;
                let rhs = Self::eval(rhs, metadata)?;
                combine(&lhs, &rhs, "and").map(|(l, r)| Value::Bool(l && r))
            }
            Expr::Or { lhs, rhs } => {
                let lhs = Self::eval(lhs, metadata)?;
                let rhs = Self::eval(rhs, metadata)?;
                combine(&lhs, &rhs, "or").map(|(l, r)| Value::Bool(l || r))
            }
        }
    }

    /// Evaluate an expression that must produce a boolean.
    pub fn eval_bool(expr: &Expr, metadata: &MetadataStore) -> Result<bool, PolicyError> {
        match Self::eval(expr, metadata)? {
            Value::Bool(b) => Ok(b),
            other => Err(PolicyError::TypeMismatch {
                lhs: other.kind(),
                rhs: "bool",
                op: "condition",
            }),
        }
    }
}

/// Compare two values. Dispatches on the right-hand side the way the
/// comparison table is written: numeric, text, then boolean.
pub fn compare(lhs: &Value, op: CmpOp, rhs: &Value) -> Result<bool, PolicyError> {
    match op {
        CmpOp::Eq => equals(lhs, rhs, op),
        CmpOp::Ne => equals(lhs, rhs, op).map(|eq| !eq),
        CmpOp::Gt | CmpOp::Lt | CmpOp::Gte | CmpOp::Lte => {
            let (l, r) = match (lhs.as_decimal(), rhs.as_decimal()) {
                (Some(l), Some(r)) => (l, r),
                _ => {
                    return Err(PolicyError::TypeMismatch {
                        lhs: lhs.kind(),
                        rhs: rhs.kind(),
                        op: op.symbol(),
                    })
                }
            };
            Ok(match op {
                CmpOp::Gt => l > r,
                CmpOp::Lt => l < r,
                CmpOp::Gte => l >= r,
                CmpOp::Lte => l <= r,
                _ => unreachable!(),
            })
        }
    }
}

fn equals(lhs: &Value, rhs: &Value, op: CmpOp) -> Result<bool, PolicyError> {
    match rhs {
        Value::Int(_) | Value::Number(_) => match (lhs.as_decimal(), rhs.as_decimal()) {
            (Some(l), Some(r)) => Ok(l == r),
            _ => Err(PolicyError::TypeMismatch {
                lhs: lhs.kind(),
                rhs: rhs.kind(),
                op: op.symbol(),
            }),
        },
        // Text equality stringifies the left side; case folding must cover
        // non-ASCII text too.
        Value::Text(r) => Ok(lhs.to_string().to_lowercase() == r.to_lowercase()),
        Value::Bool(r) => match lhs {
            Value::Bool(l) => Ok(l == r),
            other => Err(PolicyError::TypeMismatch {
                lhs: other.kind(),
                rhs: "bool",
                op: op.symbol(),
            }),
        },
        Value::List(_) | Value::Map(_) => Err(PolicyError::TypeMismatch {
            lhs: lhs.kind(),
            rhs: rhs.kind(),
            op: op.symbol(),
        }),
    }
}

/// Membership: list element equality, substring for text, value-set
/// membership for maps. Non-containers never match.
pub fn has_value(base: &Value, needle: &Value) -> bool {
    match base {
        Value::List(items) => items.iter().any(|item| item == needle),
        Value::Text(s) => s.contains(&needle.to_string()),
        Value::Map(map) => map.values().any(|value| value == needle),
        _ => false,
    }
}

/// Walk nested maps by dot-separated segments.
pub fn walk_path<'a>(base: &'a Value, path: &str) -> Result<Value, PolicyError> {
    let mut current: Option<&'a Value> = Some(base);

    for segment in path.split('.') {
        current = match current {
            Some(Value::Map(map)) => map.get(segment),
            _ => None,
        };
        if current.is_none() {
            break;
        }
    }

    current
        .cloned()
        .ok_or_else(|| PolicyError::PathNotFound(path.to_string()))
}

fn combine(lhs: &Value, rhs: &Value, op: &'static str) -> Result<(bool, bool), PolicyError> {
    match (lhs, rhs) {
        (Value::Bool(l), Value::Bool(r)) => Ok((*l, *r)),
        _ => Err(PolicyError::TypeMismatch {
            lhs: lhs.kind(),
            rhs: rhs.kind(),
            op,
        }),
    }
}
