//! Condition expressions
//!
//! An `Expr` is a caller-built boolean expression over metadata values.
//! Fluent combinators chain left-to-right, so `a.and(b).or(c)` always means
//! `(a AND b) OR c` - there is no precedence between `and` and `or`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use moneyflow_core::Value;

/// Comparison operator. The string form is used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum CmpOp {
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">=")]
    Gte,
    #[strum(serialize = "<=")]
    Lte,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
}

impl CmpOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Gte => ">=",
            CmpOp::Lte => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        }
    }
}

/// A condition expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    /// Metadata lookup by id
    Param { id: String },
    /// Literal value
    Lit { value: Value },
    /// Dot-separated walk through nested maps
    Path { base: Box<Expr>, path: String },
    /// Comparison
    Cmp {
        op: CmpOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Membership test (list element, substring, map value)
    Has { base: Box<Expr>, needle: Box<Expr> },
    /// Map key membership
    HasKey { base: Box<Expr>, key: String },
    /// Boolean AND, both sides already evaluated
    And { lhs: Box<Expr>, rhs: Box<Expr> },
    /// Boolean OR, both sides already evaluated
    Or { lhs: Box<Expr>, rhs: Box<Expr> },
}

impl Expr {
    /// Reference a metadata entry.
    pub fn param(id: impl Into<String>) -> Self {
        Expr::Param { id: id.into() }
    }

    /// Literal value.
    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Lit {
            value: value.into(),
        }
    }

    /// Walk nested maps: `path("a.b.c")`.
    pub fn path(self, path: impl Into<String>) -> Self {
        Expr::Path {
            base: Box::new(self),
            path: path.into(),
        }
    }

    pub fn cmp(self, op: CmpOp, rhs: impl Into<Expr>) -> Self {
        Expr::Cmp {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Self {
        self.cmp(CmpOp::Gt, rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Self {
        self.cmp(CmpOp::Lt, rhs)
    }

    pub fn gte(self, rhs: impl Into<Expr>) -> Self {
        self.cmp(CmpOp::Gte, rhs)
    }

    pub fn lte(self, rhs: impl Into<Expr>) -> Self {
        self.cmp(CmpOp::Lte, rhs)
    }

    pub fn eq(self, rhs: impl Into<Expr>) -> Self {
        self.cmp(CmpOp::Eq, rhs)
    }

    pub fn ne(self, rhs: impl Into<Expr>) -> Self {
        self.cmp(CmpOp::Ne, rhs)
    }

    pub fn has(self, needle: impl Into<Expr>) -> Self {
        Expr::Has {
            base: Box::new(self),
            needle: Box::new(needle.into()),
        }
    }

    /// Alias for [`has`](Expr::has).
    pub fn has_value(self, needle: impl Into<Expr>) -> Self {
        self.has(needle)
    }

    pub fn has_key(self, key: impl Into<String>) -> Self {
        Expr::HasKey {
            base: Box::new(self),
            key: key.into(),
        }
    }

    pub fn and(self, rhs: impl Into<Expr>) -> Self {
        Expr::And {
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }

    pub fn or(self, rhs: impl Into<Expr>) -> Self {
        Expr::Or {
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::lit(value)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::lit(b)
    }
}

impl From<i32> for Expr {
    fn from(i: i32) -> Self {
        Expr::lit(i)
    }
}

impl From<i64> for Expr {
    fn from(i: i64) -> Self {
        Expr::lit(i)
    }
}

impl From<Decimal> for Expr {
    fn from(d: Decimal) -> Self {
        Expr::lit(d)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::lit(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chaining_is_left_to_right() {
        // a.and(b).or(c) must parse as (a AND b) OR c
        let expr = Expr::param("a").and(Expr::param("b")).or(Expr::param("c"));

        let Expr::Or { lhs, rhs } = expr else {
            panic!("expected Or at the root");
        };
        assert!(matches!(*lhs, Expr::And { .. }));
        assert!(matches!(*rhs, Expr::Param { .. }));
    }

    #[test]
    fn test_literal_conversions() {
        assert_eq!(
            Expr::from(5),
            Expr::Lit {
                value: Value::Int(5)
            }
        );
        assert_eq!(
            Expr::from("gold"),
            Expr::Lit {
                value: Value::Text("gold".into())
            }
        );
    }

    #[test]
    fn test_op_symbols() {
        assert_eq!(CmpOp::Gte.symbol(), ">=");
        assert_eq!(CmpOp::Ne.to_string(), "!=");
    }

    #[test]
    fn test_expr_serde_roundtrip() {
        let expr = Expr::param("order")
            .path("customer.tier")
            .eq("gold")
            .and(Expr::param("volume").gt(100));

        let json = serde_json::to_string(&expr).unwrap();
        let parsed: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(expr, parsed);
    }
}
