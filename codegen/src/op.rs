//! Operation → header mapping tables.
//!
//! Each [`Operation`] supplies its result function, its sweep shape, and the
//! fixed names that appear in its generated header. Everything else about
//! table generation is shared.

use std::fmt;

use serde::Serialize;

/// Shape of the operand sweep for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sweep {
    /// Inner operand runs from the outer operand down to 0 (`b <= a`).
    Triangular,
    /// Inner operand runs over the full domain for every outer operand.
    Rectangular,
}

/// An arithmetic or comparison operation emulated by a lookup header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `a + b`.
    Add,
    /// `1` if `a == b`, else `0`.
    Equal,
    /// `1` if `a > b`, else `0`.
    GreaterThan,
}

impl Operation {
    /// All operations, in the order their headers are generated.
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Equal, Operation::GreaterThan];

    /// Computes the table value for the operand pair `(a, b)`.
    pub fn result(self, a: u32, b: u32) -> u64 {
        match self {
            Self::Add => u64::from(a) + u64::from(b),
            Self::Equal => u64::from(a == b),
            Self::GreaterThan => u64::from(a > b),
        }
    }

    /// Addition only covers `b <= a`; the consumer reorders arguments for the
    /// symmetric case.
    pub fn sweep(self) -> Sweep {
        match self {
            Self::Add => Sweep::Triangular,
            Self::Equal | Self::GreaterThan => Sweep::Rectangular,
        }
    }

    /// Prefix of every token defined in the table, e.g. `i_ADD`.
    pub fn symbol_prefix(self) -> &'static str {
        match self {
            Self::Add => "i_ADD",
            Self::Equal => "i_EQ",
            Self::GreaterThan => "i_GT",
        }
    }

    /// Name of the two-level lookup macro, e.g. `RP_ADD`.
    pub fn lookup_macro(self) -> &'static str {
        match self {
            Self::Add => "RP_ADD",
            Self::Equal => "RP_EQ",
            Self::GreaterThan => "RP_GT",
        }
    }

    /// Parameter names of the lookup macro.
    pub fn macro_params(self) -> (&'static str, &'static str) {
        match self {
            Self::Add | Self::Equal => ("v1__", "v2__"),
            Self::GreaterThan => ("v1_", "v2_"),
        }
    }

    /// File name of the generated header.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Add => "rf_xmacro_add.h",
            Self::Equal => "rf_xmacro_eq.h",
            Self::GreaterThan => "rf_xmacro_gt.h",
        }
    }

    /// Name of the binary that regenerates the header.
    pub fn generator_name(self) -> &'static str {
        match self {
            Self::Add => "gen-xmacro-add",
            Self::Equal => "gen-xmacro-eq",
            Self::GreaterThan => "gen-xmacro-gt",
        }
    }

    /// Noun used in the banner and macro comment ("addition", ...).
    pub fn description(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Equal => "equality check",
            Self::GreaterThan => "greater than check",
        }
    }

    /// Date recorded in the banner.
    pub fn banner_date(self) -> &'static str {
        match self {
            Self::Add => "01/10/2015",
            Self::Equal | Self::GreaterThan => "13/02/2012",
        }
    }

    /// Comment heading the group of tokens for outer operand `a`.
    pub fn group_comment(self, a: u32) -> String {
        match self {
            Self::Add => format!("These are the tokens for addition with {a}"),
            Self::Equal => format!("These are the tokens for equality with {a}"),
            Self::GreaterThan => format!("These are the tokens for greater than {a} check"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Equal => f.write_str("eq"),
            Self::GreaterThan => f.write_str("gt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_functions() {
        assert_eq!(Operation::Add.result(64, 64), 128);
        assert_eq!(Operation::Add.result(0, 0), 0);
        assert_eq!(Operation::Equal.result(3, 3), 1);
        assert_eq!(Operation::Equal.result(3, 2), 0);
        assert_eq!(Operation::GreaterThan.result(3, 2), 1);
        assert_eq!(Operation::GreaterThan.result(2, 3), 0);
        assert_eq!(Operation::GreaterThan.result(2, 2), 0);
    }

    #[test]
    fn add_result_does_not_overflow_u32() {
        assert_eq!(
            Operation::Add.result(u32::MAX, u32::MAX),
            2 * u64::from(u32::MAX)
        );
    }

    #[test]
    fn only_addition_is_triangular() {
        assert_eq!(Operation::Add.sweep(), Sweep::Triangular);
        assert_eq!(Operation::Equal.sweep(), Sweep::Rectangular);
        assert_eq!(Operation::GreaterThan.sweep(), Sweep::Rectangular);
    }

    #[test]
    fn names_are_distinct_per_operation() {
        for (i, x) in Operation::ALL.iter().enumerate() {
            for y in &Operation::ALL[i + 1..] {
                assert_ne!(x.symbol_prefix(), y.symbol_prefix());
                assert_ne!(x.lookup_macro(), y.lookup_macro());
                assert_ne!(x.file_name(), y.file_name());
            }
        }
    }
}
