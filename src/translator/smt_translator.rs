//! SMT translator: syntax tree → SMT-LIB2 text
//!
//! A single recursive dispatch over the closed `Node` type. Control flow is
//! encoded structurally:
//! - `if/elif/else` becomes right-nested `(ite test then else)`
//! - assignment becomes a textual `(let target value)` fragment, concatenated
//!   with the following statement rather than nested around it
//! - `!=` becomes `(not (= ...))`
//!
//! Every function parameter and the function result take the one configured
//! sort. The translator holds no mutable state, so one value can be shared
//! across threads.

use crate::tree::{BinaryOperator, BoolOperator, CompareOperator, Node, Sort, UnaryOperator};

/// What to do with constructs outside the supported subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Emit an `UNKNOWN_TYPE_<kind>` marker in place of the construct and keep going
    #[default]
    Sentinel,
    /// Abort the translation with an error
    Strict,
}

/// SMT-LIB2 translator for one result sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmtTranslator {
    sort: Sort,
    policy: UnsupportedPolicy,
}

impl SmtTranslator {
    /// Create a translator that marks unsupported constructs with sentinels
    pub fn new(sort: Sort) -> Self {
        SmtTranslator {
            sort,
            policy: UnsupportedPolicy::Sentinel,
        }
    }

    /// Create a translator that fails on unsupported constructs
    pub fn strict(sort: Sort) -> Self {
        Self::new(sort).with_policy(UnsupportedPolicy::Strict)
    }

    pub fn with_policy(mut self, policy: UnsupportedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    pub fn policy(&self) -> UnsupportedPolicy {
        self.policy
    }

    /// Translate a syntax tree to SMT-LIB2 text
    pub fn translate(&self, node: &Node) -> Result<String, TranslationError> {
        match node {
            Node::Module { statements } => {
                log::debug!("Translating module with {} statements", statements.len());
                self.translate_block(statements)
            }
            Node::FunctionDef { name, params, body } => {
                self.translate_function_def(name, params, body)
            }
            Node::Assign { targets, value } => {
                let targets = self.translate_all(targets)?.join(" ");
                let value = self.translate(value)?;
                Ok(format!("(let {} {})", targets, value))
            }
            Node::BinOp { left, op, right } => {
                let left = self.translate(left)?;
                let right = self.translate(right)?;
                self.translate_binary_op(*op, left, right)
            }
            Node::Compare {
                left,
                ops,
                comparators,
            } => self.translate_compare(left, ops, comparators),
            Node::BoolOp { op, values } => {
                let values = self.translate_all(values)?.join(" ");
                Ok(format!("({} {})", bool_operator_symbol(*op), values))
            }
            Node::UnaryOp { op, operand } => {
                let operand = self.translate(operand)?;
                self.translate_unary_op(*op, operand)
            }
            Node::If { test, body, orelse } => {
                let test = self.translate(test)?;
                let body = self.translate_block(body)?;
                let orelse = self.translate_block(orelse)?;
                Ok(format!("(ite {} {} {})", test, body, orelse))
            }
            Node::Return { value } => match value {
                Some(value) => self.translate(value),
                None => Ok("nil".to_string()),
            },
            Node::Expr { value } => self.translate(value),
            Node::Name { identifier } => Ok(translate_name(identifier)),
            Node::Constant { value } => Ok(value.to_string()),
            Node::Unsupported { construct } => self.unsupported_node(construct),
        }
    }

    /// Strip comments from Python source, parse it, and translate the tree
    pub fn translate_source(&self, source: &str) -> Result<String, crate::Error> {
        let tree = crate::parser::parse_source(source)?;
        Ok(self.translate(&tree)?)
    }

    /// Translate a statement sequence, one fragment per line
    fn translate_block(&self, nodes: &[Node]) -> Result<String, TranslationError> {
        Ok(self.translate_all(nodes)?.join("\n"))
    }

    fn translate_all(&self, nodes: &[Node]) -> Result<Vec<String>, TranslationError> {
        nodes.iter().map(|node| self.translate(node)).collect()
    }

    fn translate_function_def(
        &self,
        name: &str,
        params: &[String],
        body: &[Node],
    ) -> Result<String, TranslationError> {
        log::debug!(
            "Translating function {} ({} parameters, sort {})",
            name,
            params.len(),
            self.sort
        );
        let params = params
            .iter()
            .map(|param| format!("({} {})", param, self.sort))
            .collect::<Vec<_>>()
            .join(" ");
        let body = self.translate_block(body)?;
        Ok(format!(
            "(define-fun {} ({}) {} {})",
            name, params, self.sort, body
        ))
    }

    /// Translate a binary operation given already-translated operands
    fn translate_binary_op(
        &self,
        op: BinaryOperator,
        left: String,
        right: String,
    ) -> Result<String, TranslationError> {
        match binary_operator_symbol(op) {
            Some(symbol) => Ok(format!("({} {} {})", symbol, left, right)),
            None => self.unsupported_operator("BinOp", format!("{:?}", op), &[left, right]),
        }
    }

    /// Any `!=` in the chain collapses it to a negated equality against the
    /// first comparator. Otherwise operators and operands are flattened into one
    /// form, which is only well-formed SMT-LIB2 for a single comparison.
    fn translate_compare(
        &self,
        left: &Node,
        ops: &[CompareOperator],
        comparators: &[Node],
    ) -> Result<String, TranslationError> {
        let left = self.translate(left)?;
        if ops.contains(&CompareOperator::NotEq) {
            let first = match comparators.first() {
                Some(comparator) => self.translate(comparator)?,
                None => String::new(),
            };
            return Ok(format!("(not (= {} {}))", left, first));
        }
        let comparators = self.translate_all(comparators)?;
        let mut symbols = Vec::with_capacity(ops.len());
        for op in ops {
            match compare_operator_symbol(*op) {
                Some(symbol) => symbols.push(symbol),
                None => {
                    let mut operands = vec![left];
                    operands.extend(comparators);
                    return self.unsupported_operator("Compare", format!("{:?}", op), &operands);
                }
            }
        }
        Ok(format!(
            "({} {} {})",
            symbols.join(" "),
            left,
            comparators.join(" ")
        ))
    }

    /// Translate a unary operation given an already-translated operand
    fn translate_unary_op(
        &self,
        op: UnaryOperator,
        operand: String,
    ) -> Result<String, TranslationError> {
        match op {
            UnaryOperator::Not => Ok(format!("(not {})", operand)),
            UnaryOperator::Neg => Ok(format!("(- {})", operand)),
            UnaryOperator::Pos | UnaryOperator::Invert => {
                self.unsupported_operator("UnaryOp", format!("{:?}", op), &[operand])
            }
        }
    }

    fn unsupported_node(&self, kind: &str) -> Result<String, TranslationError> {
        match self.policy {
            UnsupportedPolicy::Strict => Err(TranslationError::UnsupportedNodeKind(kind.to_string())),
            UnsupportedPolicy::Sentinel => {
                log::warn!("Unsupported node kind {}, emitting sentinel", kind);
                Ok(format!("{}{}", SENTINEL_PREFIX, kind))
            }
        }
    }

    fn unsupported_operator(
        &self,
        family: &'static str,
        operator: String,
        operands: &[String],
    ) -> Result<String, TranslationError> {
        match self.policy {
            UnsupportedPolicy::Strict => {
                Err(TranslationError::UnsupportedOperator { family, operator })
            }
            UnsupportedPolicy::Sentinel => {
                log::warn!("Unsupported {} operator {}, emitting sentinel", family, operator);
                Ok(format!(
                    "({}{}_{} {})",
                    SENTINEL_PREFIX,
                    family,
                    operator,
                    operands.join(" ")
                ))
            }
        }
    }
}

/// Prefix of the marker emitted for unsupported constructs
pub const SENTINEL_PREFIX: &str = "UNKNOWN_TYPE_";

/// SMT-LIB2 symbol for a supported arithmetic operator
pub fn binary_operator_symbol(op: BinaryOperator) -> Option<&'static str> {
    match op {
        BinaryOperator::Add => Some("+"),
        BinaryOperator::Sub => Some("-"),
        BinaryOperator::Mul => Some("*"),
        // Integer division
        BinaryOperator::Div => Some("div"),
        BinaryOperator::Mod => Some("mod"),
        BinaryOperator::FloorDiv | BinaryOperator::Pow => None,
    }
}

pub fn compare_operator_symbol(op: CompareOperator) -> Option<&'static str> {
    match op {
        CompareOperator::Eq => Some("="),
        // Chains containing `!=` are rewritten before reaching the flat form
        CompareOperator::NotEq => Some("distinct"),
        CompareOperator::Lt => Some("<"),
        CompareOperator::LtE => Some("<="),
        CompareOperator::Gt => Some(">"),
        CompareOperator::GtE => Some(">="),
        CompareOperator::In | CompareOperator::NotIn | CompareOperator::Is | CompareOperator::IsNot => {
            None
        }
    }
}

fn bool_operator_symbol(op: BoolOperator) -> &'static str {
    match op {
        BoolOperator::And => "and",
        BoolOperator::Or => "or",
    }
}

/// `true`/`false` in any case are literals; every other name is a symbol
fn translate_name(identifier: &str) -> String {
    if identifier.eq_ignore_ascii_case("true") {
        "true".to_string()
    } else if identifier.eq_ignore_ascii_case("false") {
        "false".to_string()
    } else {
        identifier.to_string()
    }
}

/// Translation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    #[error("Unsupported node kind: {0}")]
    UnsupportedNodeKind(String),
    #[error("Unsupported {family} operator: {operator}")]
    UnsupportedOperator {
        family: &'static str,
        operator: String,
    },
}
