// src/schema/policy.rs

use std::{collections::BTreeMap, fmt, str::FromStr};

/// Numeric storage types a CSV column can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    Float32,
    Float64,
    Int32,
    Int64,
}

impl FromStr for NumericType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "float32" | "f32" => Ok(Self::Float32),
            "float64" | "f64" => Ok(Self::Float64),
            "int32" | "i32" => Ok(Self::Int32),
            "int64" | "i64" => Ok(Self::Int64),
            other => Err(format!(
                "unknown numeric type `{other}` (expected float32, float64, int32 or int64)"
            )),
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
        };
        f.write_str(s)
    }
}

/// Column name → numeric type, with a fallback for every unlisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePolicy {
    pub default: NumericType,
    pub overrides: BTreeMap<String, NumericType>,
}

impl Default for TypePolicy {
    /// Samples are stored as `float32`; the `n` counter needs `float64`.
    fn default() -> Self {
        Self::new(NumericType::Float32).with_override("n", NumericType::Float64)
    }
}

impl TypePolicy {
    pub fn new(default: NumericType) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, column: impl Into<String>, ty: NumericType) -> Self {
        self.overrides.insert(column.into(), ty);
        self
    }

    /// Type assigned to `column`. Matching is exact and case sensitive.
    pub fn type_for(&self, column: &str) -> NumericType {
        self.overrides.get(column).copied().unwrap_or(self.default)
    }
}

/// A `NAME=TYPE` pair as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOverride {
    pub column: String,
    pub ty: NumericType,
}

impl FromStr for ColumnOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, ty) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=TYPE, got `{s}`"))?;
        if column.is_empty() {
            return Err(format!("empty column name in `{s}`"));
        }
        Ok(Self {
            column: column.to_string(),
            ty: ty.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_widens_only_n() {
        let policy = TypePolicy::default();
        assert_eq!(policy.type_for("n"), NumericType::Float64);
        assert_eq!(policy.type_for("x"), NumericType::Float32);
        assert_eq!(policy.type_for("N"), NumericType::Float32);
        assert_eq!(policy.type_for("n "), NumericType::Float32);
    }

    #[test]
    fn overrides_replace_default() {
        let policy = TypePolicy::default().with_override("lab", NumericType::Int32);
        assert_eq!(policy.type_for("lab"), NumericType::Int32);
        assert_eq!(policy.type_for("n"), NumericType::Float64);
    }

    #[test]
    fn parses_column_override() {
        let o: ColumnOverride = "xT=float64".parse().unwrap();
        assert_eq!(o.column, "xT");
        assert_eq!(o.ty, NumericType::Float64);
        assert!("xT".parse::<ColumnOverride>().is_err());
        assert!("=f32".parse::<ColumnOverride>().is_err());
        assert!("x=decimal".parse::<ColumnOverride>().is_err());
    }
}
