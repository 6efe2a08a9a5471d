//! Generic syntax tree
//!
//! The contract between a frontend and the SMT translator. A frontend builds one
//! tree per input program; the translator borrows it read-only.
//!
//! The serialized form is internally tagged on `kind`, so a tree produced by any
//! other frontend can be fed to the translator as JSON:
//!
//! ```json
//! {"kind": "BinOp", "left": {"kind": "Name", "identifier": "x"},
//!  "op": "Add", "right": {"kind": "Constant", "value": 1}}
//! ```

use num_bigint::BigInt;
use num_traits::cast::ToPrimitive;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A syntax tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Node {
    /// Top-level program
    Module { statements: Vec<Node> },
    /// Function declaration; every parameter takes the configured sort
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Node>,
    },
    /// Variable binding (`a = b = value` has two targets)
    Assign { targets: Vec<Node>, value: Box<Node> },
    BinOp {
        left: Box<Node>,
        op: BinaryOperator,
        right: Box<Node>,
    },
    /// Comparison chain; `ops` and `comparators` have the same length
    Compare {
        left: Box<Node>,
        ops: Vec<CompareOperator>,
        comparators: Vec<Node>,
    },
    BoolOp { op: BoolOperator, values: Vec<Node> },
    UnaryOp { op: UnaryOperator, operand: Box<Node> },
    If {
        test: Box<Node>,
        body: Vec<Node>,
        orelse: Vec<Node>,
    },
    Return {
        #[serde(default)]
        value: Option<Box<Node>>,
    },
    /// Variable reference, or a `true`/`false` literal in any case
    Name { identifier: String },
    Constant { value: Constant },
    /// Statement-wrapped expression
    Expr { value: Box<Node> },
    /// A construct the frontend recognized but the translator has no mapping for
    /// (loops, calls, `pass`, augmented assignment, ...)
    Unsupported { construct: String },
}

impl Node {
    /// Kind name, as it appears in the serialized tree and in sentinel output
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Module { .. } => "Module",
            Node::FunctionDef { .. } => "FunctionDef",
            Node::Assign { .. } => "Assign",
            Node::BinOp { .. } => "BinOp",
            Node::Compare { .. } => "Compare",
            Node::BoolOp { .. } => "BoolOp",
            Node::UnaryOp { .. } => "UnaryOp",
            Node::If { .. } => "If",
            Node::Return { .. } => "Return",
            Node::Name { .. } => "Name",
            Node::Constant { .. } => "Constant",
            Node::Expr { .. } => "Expr",
            Node::Unsupported { construct } => construct,
        }
    }

    pub fn name(identifier: impl Into<String>) -> Self {
        Node::Name {
            identifier: identifier.into(),
        }
    }

    pub fn int(value: impl Into<BigInt>) -> Self {
        Node::Constant {
            value: Constant::Int(value.into()),
        }
    }

    pub fn binop(left: Node, op: BinaryOperator, right: Node) -> Self {
        Node::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn compare(left: Node, op: CompareOperator, right: Node) -> Self {
        Node::Compare {
            left: Box::new(left),
            ops: vec![op],
            comparators: vec![right],
        }
    }

    pub fn unary(op: UnaryOperator, operand: Node) -> Self {
        Node::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn ret(value: Node) -> Self {
        Node::Return {
            value: Some(Box::new(value)),
        }
    }
}

/// Literal value
///
/// Integers are unbounded. In JSON they are plain numbers of any length;
/// strings are JSON strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(BigInt),
    Float(f64),
    Str(String),
}

impl Constant {
    /// Read a JSON number from its literal text. Integer text stays exact.
    fn from_number_text(text: &str) -> Result<Self, String> {
        if let Ok(value) = text.parse::<BigInt>() {
            return Ok(Constant::Int(value));
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Constant::Float(value)),
            _ => Err(format!("number {} is out of range", text)),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(value) => write!(f, "{}", value),
            Constant::Float(value) => write!(f, "{}", decimal_text(*value)),
            Constant::Str(value) => write!(f, "\"{}\"", value),
        }
    }
}

/// Positional decimal with at least one fractional digit: `2.0`, `0.00001`,
/// `10000000000000000.0`. Never exponent notation.
fn decimal_text(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

impl Serialize for Constant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Constant::Int(value) => {
                if let Some(small) = value.to_i64() {
                    serializer.serialize_i64(small)
                } else if let Some(small) = value.to_u64() {
                    serializer.serialize_u64(small)
                } else {
                    serde_json::Number::from_str(&value.to_string())
                        .map_err(S::Error::custom)?
                        .serialize(serializer)
                }
            }
            Constant::Float(value) => serializer.serialize_f64(*value),
            Constant::Str(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for Constant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(number) => {
                Constant::from_number_text(&number.to_string()).map_err(D::Error::custom)
            }
            serde_json::Value::String(value) => Ok(Constant::Str(value)),
            other => Err(D::Error::custom(format!(
                "expected a number or string constant, found {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// `//`, recognized by the frontend but not translated
    FloorDiv,
    /// `**`, recognized by the frontend but not translated
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    /// Membership and identity tests, recognized by the frontend but not translated
    In,
    NotIn,
    Is,
    IsNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Neg,
    /// Unary `+`, not translated
    Pos,
    /// `~`, not translated
    Invert,
}

/// SMT-LIB2 sort shared by every parameter and the result of a translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sort {
    #[default]
    Int,
    Bool,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Int => write!(f, "Int"),
            Sort::Bool => write!(f, "Bool"),
        }
    }
}

impl FromStr for Sort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int" => Ok(Sort::Int),
            "bool" => Ok(Sort::Bool),
            _ => Err(format!("Unknown sort: {}. Expected: Int, Bool", s)),
        }
    }
}
