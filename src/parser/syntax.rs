//! Recursive-descent parser for the Python subset
//!
//! Builds the generic syntax tree consumed by the SMT translator. Constructs
//! the translator has no mapping for (loops, calls, subscripts, conditional
//! expressions, `pass`, augmented assignment and the like) are still parsed, so
//! syntax errors inside them surface, and are returned as `Node::Unsupported`.
//! Python keywords that start a statement or expression outside the subset
//! (`import`, `class`, `yield`, ...) are rejected as unsupported constructs.

use crate::parser::error::{SyntaxError, SyntaxResult};
use crate::parser::lexer::{tokenize, Token, TokenKind};
use crate::tree::{BinaryOperator, BoolOperator, CompareOperator, Constant, Node, UnaryOperator};

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> SyntaxResult<Self> {
        let tokens = tokenize(source)?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    /// Parse a whole program into a `Node::Module`
    pub fn parse_module(mut self) -> SyntaxResult<Node> {
        let mut statements = Vec::new();
        while !self.check(&TokenKind::EOF) {
            if self.consume_newlines() {
                continue;
            }
            if self.check(&TokenKind::Indent) {
                return Err(self.error("unexpected indent"));
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Node::Module { statements })
    }

    fn parse_statement(&mut self) -> SyntaxResult<Node> {
        match self.current().kind {
            TokenKind::Def => self.parse_function_def(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            _ => self.parse_simple_statement(),
        }
    }

    fn parse_function_def(&mut self) -> SyntaxResult<Node> {
        self.expect(TokenKind::Def, "'def'")?;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.expect_identifier()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::Colon, "':'")?;
        let body = self.parse_suite()?;
        Ok(Node::FunctionDef { name, params, body })
    }

    /// `if` with its `elif`/`else` clauses; each `elif` nests as an `If` in `orelse`
    fn parse_if(&mut self) -> SyntaxResult<Node> {
        self.expect(TokenKind::If, "'if'")?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::Colon, "':'")?;
        let body = self.parse_suite()?;

        // `if c: x` followed by an indented `else: y` on the next line
        let hanging = self.check(&TokenKind::Indent)
            && matches!(self.peek_kind(1), TokenKind::Elif | TokenKind::Else);
        if hanging {
            self.advance();
        }
        let orelse = self.parse_else_chain()?;
        if hanging {
            self.consume_newlines();
            self.expect(TokenKind::Dedent, "dedent")?;
        }

        Ok(Node::If {
            test: Box::new(test),
            body,
            orelse,
        })
    }

    fn parse_else_chain(&mut self) -> SyntaxResult<Vec<Node>> {
        if self.eat(&TokenKind::Elif) {
            let test = self.parse_expression()?;
            self.expect(TokenKind::Colon, "':'")?;
            let body = self.parse_suite()?;
            let orelse = self.parse_else_chain()?;
            Ok(vec![Node::If {
                test: Box::new(test),
                body,
                orelse,
            }])
        } else if self.eat(&TokenKind::Else) {
            self.expect(TokenKind::Colon, "':'")?;
            self.parse_suite()
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_while(&mut self) -> SyntaxResult<Node> {
        self.expect(TokenKind::While, "'while'")?;
        self.parse_expression()?;
        self.expect(TokenKind::Colon, "':'")?;
        self.parse_suite()?;
        self.parse_loop_else()?;
        Ok(unsupported("While"))
    }

    fn parse_for(&mut self) -> SyntaxResult<Node> {
        self.expect(TokenKind::For, "'for'")?;
        // Targets are postfix expressions; `in` must not be read as a comparison
        loop {
            self.parse_call()?;
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::In, "'in'")?;
        self.parse_expression_list()?;
        self.expect(TokenKind::Colon, "':'")?;
        self.parse_suite()?;
        self.parse_loop_else()?;
        Ok(unsupported("For"))
    }

    fn parse_loop_else(&mut self) -> SyntaxResult<()> {
        if self.eat(&TokenKind::Else) {
            self.expect(TokenKind::Colon, "':'")?;
            self.parse_suite()?;
        }
        Ok(())
    }

    /// Block after a `:`. Either an indented block, or a statement on the same
    /// line, which may be continued by an indented block on the following lines.
    fn parse_suite(&mut self) -> SyntaxResult<Vec<Node>> {
        let mut body = Vec::new();
        if self.eat(&TokenKind::Newline) {
            self.consume_newlines();
            if !self.eat(&TokenKind::Indent) {
                return Err(self.error("expected an indented block"));
            }
        } else {
            body.push(self.parse_simple_statement()?);
            let continued = self.check(&TokenKind::Indent)
                && !matches!(self.peek_kind(1), TokenKind::Elif | TokenKind::Else);
            if !continued {
                return Ok(body);
            }
            self.advance();
        }

        while !self.check(&TokenKind::Dedent) && !self.check(&TokenKind::EOF) {
            if self.consume_newlines() {
                continue;
            }
            body.push(self.parse_statement()?);
        }
        self.expect(TokenKind::Dedent, "dedent")?;
        Ok(body)
    }

    fn parse_simple_statement(&mut self) -> SyntaxResult<Node> {
        let statement = match self.current().kind {
            TokenKind::Return => {
                self.advance();
                if self.at_statement_end() {
                    Node::Return { value: None }
                } else {
                    Node::ret(self.parse_expression_list()?)
                }
            }
            TokenKind::Pass => {
                self.advance();
                unsupported("Pass")
            }
            TokenKind::Break => {
                self.advance();
                unsupported("Break")
            }
            TokenKind::Continue => {
                self.advance();
                unsupported("Continue")
            }
            _ => self.parse_assignment_or_expression()?,
        };
        self.end_statement()?;
        Ok(statement)
    }

    fn parse_assignment_or_expression(&mut self) -> SyntaxResult<Node> {
        let first = self.parse_expression_list()?;

        if matches!(
            self.current().kind,
            TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::StarEqual
                | TokenKind::SlashEqual
                | TokenKind::PercentEqual
        ) {
            self.expect_assignable(&first)?;
            self.advance();
            self.parse_expression_list()?;
            return Ok(unsupported("AugAssign"));
        }

        if !self.check(&TokenKind::Equal) {
            return Ok(Node::Expr {
                value: Box::new(first),
            });
        }

        // a = b = value: every expression before the last `=` is a target
        let mut targets = vec![first];
        while self.eat(&TokenKind::Equal) {
            targets.push(self.parse_expression_list()?);
        }
        let value = targets.pop().ok_or_else(|| self.error("invalid syntax"))?;
        for target in &targets {
            self.expect_assignable(target)?;
        }
        Ok(Node::Assign {
            targets,
            value: Box::new(value),
        })
    }

    /// `a, b` without brackets is a tuple
    fn parse_expression_list(&mut self) -> SyntaxResult<Node> {
        let first = self.parse_expression()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        while self.eat(&TokenKind::Comma) {
            if self.at_expression_list_end() {
                break;
            }
            self.parse_expression()?;
        }
        Ok(unsupported("Tuple"))
    }

    fn at_expression_list_end(&self) -> bool {
        self.at_statement_end()
            || matches!(
                self.current().kind,
                TokenKind::Equal
                    | TokenKind::PlusEqual
                    | TokenKind::MinusEqual
                    | TokenKind::StarEqual
                    | TokenKind::SlashEqual
                    | TokenKind::PercentEqual
            )
    }

    /// Full expression, including `x if cond else y` and `lambda`
    fn parse_expression(&mut self) -> SyntaxResult<Node> {
        if matches!(self.current().kind, TokenKind::Identifier("lambda")) {
            return self.parse_lambda();
        }
        let body = self.parse_or()?;
        if !self.eat(&TokenKind::If) {
            return Ok(body);
        }
        self.parse_or()?;
        self.expect(TokenKind::Else, "'else'")?;
        self.parse_expression()?;
        Ok(unsupported("IfExp"))
    }

    fn parse_lambda(&mut self) -> SyntaxResult<Node> {
        self.advance();
        while !self.check(&TokenKind::Colon) {
            self.expect_identifier()?;
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Colon, "':'")?;
        self.parse_expression()?;
        Ok(unsupported("Lambda"))
    }

    fn parse_or(&mut self) -> SyntaxResult<Node> {
        let first = self.parse_and()?;
        self.parse_bool_chain(first, TokenKind::Or, BoolOperator::Or, Self::parse_and)
    }

    fn parse_and(&mut self) -> SyntaxResult<Node> {
        let first = self.parse_not()?;
        self.parse_bool_chain(first, TokenKind::And, BoolOperator::And, Self::parse_not)
    }

    /// `a or b or c` is one `BoolOp` with three values
    fn parse_bool_chain(
        &mut self,
        first: Node,
        keyword: TokenKind<'a>,
        op: BoolOperator,
        operand: fn(&mut Self) -> SyntaxResult<Node>,
    ) -> SyntaxResult<Node> {
        if !self.check(&keyword) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.eat(&keyword) {
            values.push(operand(self)?);
        }
        Ok(Node::BoolOp { op, values })
    }

    fn parse_not(&mut self) -> SyntaxResult<Node> {
        if self.eat(&TokenKind::Not) {
            let operand = self.parse_not()?;
            return Ok(Node::unary(UnaryOperator::Not, operand));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> SyntaxResult<Node> {
        let left = self.parse_arith()?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = self.eat_compare_operator() {
            ops.push(op);
            comparators.push(self.parse_arith()?);
        }
        if ops.is_empty() {
            return Ok(left);
        }
        Ok(Node::Compare {
            left: Box::new(left),
            ops,
            comparators,
        })
    }

    fn parse_arith(&mut self) -> SyntaxResult<Node> {
        let mut expr = self.parse_term()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            expr = Node::binop(expr, op, right);
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> SyntaxResult<Node> {
        let mut expr = self.parse_factor()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOperator::Mul,
                TokenKind::Slash => BinaryOperator::Div,
                TokenKind::DoubleSlash => BinaryOperator::FloorDiv,
                TokenKind::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            expr = Node::binop(expr, op, right);
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> SyntaxResult<Node> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOperator::Neg,
            TokenKind::Plus => UnaryOperator::Pos,
            TokenKind::Tilde => UnaryOperator::Invert,
            _ => return self.parse_power(),
        };
        self.advance();
        let operand = self.parse_factor()?;
        Ok(Node::unary(op, operand))
    }

    /// `**` binds tighter than unary minus on its left and is right-associative
    fn parse_power(&mut self) -> SyntaxResult<Node> {
        let base = self.parse_call()?;
        if self.eat(&TokenKind::DoubleStar) {
            let exponent = self.parse_factor()?;
            return Ok(Node::binop(base, BinaryOperator::Pow, exponent));
        }
        Ok(base)
    }

    /// Symbolic comparison operators plus `in`, `not in`, `is` and `is not`
    fn eat_compare_operator(&mut self) -> Option<CompareOperator> {
        let next = self.peek_kind(1);
        let (op, width) = match &self.current().kind {
            TokenKind::In => (CompareOperator::In, 1),
            TokenKind::Not if *next == TokenKind::In => (CompareOperator::NotIn, 2),
            TokenKind::Identifier("is") if *next == TokenKind::Not => (CompareOperator::IsNot, 2),
            TokenKind::Identifier("is") => (CompareOperator::Is, 1),
            kind => (compare_operator(kind)?, 1),
        };
        for _ in 0..width {
            self.advance();
        }
        Some(op)
    }

    /// Calls, subscripts and attribute access
    fn parse_call(&mut self) -> SyntaxResult<Node> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::LParen) {
                self.parse_arguments()?;
                expr = unsupported("Call");
            } else if self.eat(&TokenKind::LBracket) {
                self.parse_subscript()?;
                expr = unsupported("Subscript");
            } else if self.eat(&TokenKind::Dot) {
                self.expect_identifier()?;
                expr = unsupported("Attribute");
            } else {
                return Ok(expr);
            }
        }
    }

    /// Positional and keyword arguments up to the closing `)`
    fn parse_arguments(&mut self) -> SyntaxResult<()> {
        while !self.check(&TokenKind::RParen) {
            self.parse_expression()?;
            if self.eat(&TokenKind::Equal) {
                self.parse_expression()?;
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")
    }

    /// Index or slice up to the closing `]`
    fn parse_subscript(&mut self) -> SyntaxResult<()> {
        while !self.check(&TokenKind::RBracket) {
            if !matches!(self.current().kind, TokenKind::Colon | TokenKind::Comma) {
                self.parse_expression()?;
            }
            if !self.eat(&TokenKind::Colon) && !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "']'")
    }

    /// Elements of a bracketed display; returns whether any `key: value` pair was seen
    fn parse_display(&mut self, close: TokenKind<'a>, description: &str) -> SyntaxResult<bool> {
        let mut has_pairs = false;
        while !self.check(&close) {
            self.parse_expression()?;
            if self.eat(&TokenKind::Colon) {
                has_pairs = true;
                self.parse_expression()?;
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close, description)?;
        Ok(has_pairs)
    }

    fn parse_primary(&mut self) -> SyntaxResult<Node> {
        let node = match &self.current().kind {
            TokenKind::Integer(value) => Node::int(value.clone()),
            TokenKind::Float(value) => Node::Constant {
                value: Constant::Float(*value),
            },
            TokenKind::String(value) => Node::Constant {
                value: Constant::Str(value.clone()),
            },
            TokenKind::Identifier(name) if is_unsupported_keyword(name) => {
                return Err(self.error(format!("unsupported construct '{}'", name)));
            }
            TokenKind::Identifier(name) => Node::name(*name),
            TokenKind::LParen => {
                self.advance();
                if self.eat(&TokenKind::RParen) {
                    return Ok(unsupported("Tuple"));
                }
                let expr = self.parse_expression()?;
                if self.eat(&TokenKind::Comma) {
                    self.parse_display(TokenKind::RParen, "')'")?;
                    return Ok(unsupported("Tuple"));
                }
                self.expect(TokenKind::RParen, "')'")?;
                return Ok(expr);
            }
            TokenKind::LBracket => {
                self.advance();
                self.parse_display(TokenKind::RBracket, "']'")?;
                return Ok(unsupported("List"));
            }
            TokenKind::LBrace => {
                self.advance();
                let is_empty = self.check(&TokenKind::RBrace);
                let has_pairs = self.parse_display(TokenKind::RBrace, "'}'")?;
                let kind = if is_empty || has_pairs { "Dict" } else { "Set" };
                return Ok(unsupported(kind));
            }
            _ => return Err(self.error("invalid syntax")),
        };
        self.advance();
        Ok(node)
    }

    fn expect_assignable(&self, target: &Node) -> SyntaxResult<()> {
        match target {
            Node::Name { .. } => Ok(()),
            Node::Unsupported { construct }
                if matches!(
                    construct.as_str(),
                    "Subscript" | "Attribute" | "Tuple" | "List"
                ) =>
            {
                Ok(())
            }
            other => Err(self.error(format!("cannot assign to {}", other.kind_name()))),
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Newline | TokenKind::Dedent | TokenKind::EOF
        )
    }

    /// A statement ends at a line break, or at a dedent / end of input
    /// when the last line has no trailing newline.
    fn end_statement(&mut self) -> SyntaxResult<()> {
        if self.eat(&TokenKind::Newline) {
            return Ok(());
        }
        if self.at_statement_end() {
            return Ok(());
        }
        Err(self.error("invalid syntax"))
    }

    fn consume_newlines(&mut self) -> bool {
        let mut consumed = false;
        while self.eat(&TokenKind::Newline) {
            consumed = true;
        }
        consumed
    }

    fn expect_identifier(&mut self) -> SyntaxResult<String> {
        if let TokenKind::Identifier(name) = self.current().kind {
            let name = name.to_string();
            self.advance();
            Ok(name)
        } else {
            Err(self.error("expected identifier"))
        }
    }

    fn expect(&mut self, kind: TokenKind<'a>, description: &str) -> SyntaxResult<()> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.error(format!("expected {}", description)))
        }
    }

    fn eat(&mut self, kind: &TokenKind<'a>) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: &TokenKind<'a>) -> bool {
        &self.current().kind == kind
    }

    fn current(&self) -> &Token<'a> {
        self.token_at(self.pos)
    }

    fn peek_kind(&self, offset: usize) -> &TokenKind<'a> {
        &self.token_at(self.pos + offset).kind
    }

    /// The token stream always ends in `EOF`; positions past it read as `EOF`
    fn token_at(&self, index: usize) -> &Token<'a> {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[index.min(last)]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let span = self.current().span;
        SyntaxError::new(message, self.source, span.line, span.column)
    }
}

fn compare_operator(kind: &TokenKind<'_>) -> Option<CompareOperator> {
    match kind {
        TokenKind::EqEq => Some(CompareOperator::Eq),
        TokenKind::NotEq => Some(CompareOperator::NotEq),
        TokenKind::Less => Some(CompareOperator::Lt),
        TokenKind::LessEqual => Some(CompareOperator::LtE),
        TokenKind::Greater => Some(CompareOperator::Gt),
        TokenKind::GreaterEqual => Some(CompareOperator::GtE),
        _ => None,
    }
}

/// Reserved Python words with no place in the subset
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "import", "from", "class", "with", "try", "except", "finally", "raise", "global",
    "nonlocal", "del", "assert", "async", "await", "yield", "as",
];

fn is_unsupported_keyword(name: &str) -> bool {
    UNSUPPORTED_KEYWORDS.iter().any(|keyword| *keyword == name)
}

fn unsupported(construct: &str) -> Node {
    Node::Unsupported {
        construct: construct.to_string(),
    }
}

/// Parse source text (already stripped of comments) into a `Node::Module`
pub fn parse(source: &str) -> SyntaxResult<Node> {
    Parser::new(source)?.parse_module()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn statements(source: &str) -> Vec<Node> {
        match parse(source).expect("parse failed") {
            Node::Module { statements } => statements,
            other => panic!("expected module, got {:?}", other),
        }
    }

    fn expression(source: &str) -> Node {
        match statements(source).pop() {
            Some(Node::Expr { value }) => *value,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn parses_function_with_assignment_and_return() {
        let source = indoc! {"
            def f(x, y):
                z = x + 1
                return z
        "};
        let expected = vec![Node::FunctionDef {
            name: "f".to_string(),
            params: vec!["x".to_string(), "y".to_string()],
            body: vec![
                Node::Assign {
                    targets: vec![Node::name("z")],
                    value: Box::new(Node::binop(
                        Node::name("x"),
                        BinaryOperator::Add,
                        Node::int(1),
                    )),
                },
                Node::ret(Node::name("z")),
            ],
        }];
        assert_eq!(statements(source), expected);
    }

    #[test]
    fn elif_nests_in_orelse() {
        let source = indoc! {"
            if a:
                return 1
            elif b:
                return 2
            else:
                return 3
        "};
        let expected = vec![Node::If {
            test: Box::new(Node::name("a")),
            body: vec![Node::ret(Node::int(1))],
            orelse: vec![Node::If {
                test: Box::new(Node::name("b")),
                body: vec![Node::ret(Node::int(2))],
                orelse: vec![Node::ret(Node::int(3))],
            }],
        }];
        assert_eq!(statements(source), expected);
    }

    #[test]
    fn inline_suite_continues_on_indented_lines() {
        let nodes = statements("def f(x): y = x + 1\n    return y");
        let Node::FunctionDef { body, .. } = &nodes[0] else {
            panic!("expected function");
        };
        assert_eq!(body.len(), 2);
        assert_eq!(body[1], Node::ret(Node::name("y")));
    }

    #[test]
    fn hanging_else_after_inline_if() {
        let nodes = statements("if a > 0: return 1\n    else: return -1");
        let expected = Node::If {
            test: Box::new(Node::compare(
                Node::name("a"),
                CompareOperator::Gt,
                Node::int(0),
            )),
            body: vec![Node::ret(Node::int(1))],
            orelse: vec![Node::ret(Node::unary(UnaryOperator::Neg, Node::int(1)))],
        };
        assert_eq!(nodes, vec![expected]);
    }

    #[test]
    fn precedence_follows_python() {
        // a + b * c
        assert_eq!(
            expression("a + b * c"),
            Node::binop(
                Node::name("a"),
                BinaryOperator::Add,
                Node::binop(Node::name("b"), BinaryOperator::Mul, Node::name("c")),
            )
        );
        // -x ** 2 is -(x ** 2)
        assert_eq!(
            expression("-x ** 2"),
            Node::unary(
                UnaryOperator::Neg,
                Node::binop(Node::name("x"), BinaryOperator::Pow, Node::int(2)),
            )
        );
        // left-associative subtraction
        assert_eq!(
            expression("a - b - c"),
            Node::binop(
                Node::binop(Node::name("a"), BinaryOperator::Sub, Node::name("b")),
                BinaryOperator::Sub,
                Node::name("c"),
            )
        );
    }

    #[test]
    fn boolean_chains_flatten() {
        assert_eq!(
            expression("a or b or not c"),
            Node::BoolOp {
                op: BoolOperator::Or,
                values: vec![
                    Node::name("a"),
                    Node::name("b"),
                    Node::unary(UnaryOperator::Not, Node::name("c")),
                ],
            }
        );
    }

    #[test]
    fn comparison_chain_keeps_every_operator() {
        assert_eq!(
            expression("a < b <= c"),
            Node::Compare {
                left: Box::new(Node::name("a")),
                ops: vec![CompareOperator::Lt, CompareOperator::LtE],
                comparators: vec![Node::name("b"), Node::name("c")],
            }
        );
    }

    #[test]
    fn chained_assignment_collects_targets() {
        assert_eq!(
            statements("a = b = 1\n"),
            vec![Node::Assign {
                targets: vec![Node::name("a"), Node::name("b")],
                value: Box::new(Node::int(1)),
            }]
        );
    }

    #[test]
    fn unsupported_constructs_are_kept() {
        let source = indoc! {"
            while x < 3:
                x += 1
                pass
            for i in items:
                print(i)
        "};
        assert_eq!(
            statements(source),
            vec![unsupported("While"), unsupported("For")]
        );
        assert_eq!(expression("f(1, 2)"), unsupported("Call"));
    }

    #[test]
    fn python_outside_the_subset_is_unsupported() {
        assert_eq!(expression("a if b else c"), unsupported("IfExp"));
        assert_eq!(expression("a[0]"), unsupported("Subscript"));
        assert_eq!(expression("a[1:2, ::3]"), unsupported("Subscript"));
        assert_eq!(expression("a.b"), unsupported("Attribute"));
        assert_eq!(expression("a.b(c, key=1)"), unsupported("Call"));
        assert_eq!(expression("[1, 2]"), unsupported("List"));
        assert_eq!(expression("(1, 2)"), unsupported("Tuple"));
        assert_eq!(expression("()"), unsupported("Tuple"));
        assert_eq!(expression("{}"), unsupported("Dict"));
        assert_eq!(expression("{'a': 1}"), unsupported("Dict"));
        assert_eq!(expression("{1, 2}"), unsupported("Set"));
        assert_eq!(expression("lambda x, y: x + y"), unsupported("Lambda"));
    }

    #[test]
    fn membership_and_identity_compare() {
        assert_eq!(
            expression("a not in b"),
            Node::compare(Node::name("a"), CompareOperator::NotIn, Node::name("b"))
        );
        assert_eq!(
            expression("a is not None"),
            Node::compare(Node::name("a"), CompareOperator::IsNot, Node::name("None"))
        );
        assert_eq!(
            expression("a in b"),
            Node::compare(Node::name("a"), CompareOperator::In, Node::name("b"))
        );
    }

    #[test]
    fn subscript_and_tuple_targets() {
        assert_eq!(
            statements("a[0] = 1\nx, y = 1, 2\n"),
            vec![
                Node::Assign {
                    targets: vec![unsupported("Subscript")],
                    value: Box::new(Node::int(1)),
                },
                Node::Assign {
                    targets: vec![unsupported("Tuple")],
                    value: Box::new(unsupported("Tuple")),
                },
            ]
        );
        assert_eq!(
            statements("for k, v in items:\n    pass\n"),
            vec![unsupported("For")]
        );
    }

    #[test]
    fn reserved_keywords_are_unsupported_constructs() {
        let err = parse("import os\n").expect_err("expected rejection");
        assert_eq!(err.message, "unsupported construct 'import'");
        assert_eq!((err.line, err.column), (1, 1));

        let err = parse("def f(x):\n    yield x\n").expect_err("expected rejection");
        assert_eq!(err.message, "unsupported construct 'yield'");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn integer_literals_are_unbounded() {
        let big: num_bigint::BigInt = "10000000000000000000".parse().unwrap();
        assert_eq!(expression("10000000000000000000"), Node::int(big));
    }

    #[test]
    fn literals() {
        assert_eq!(
            expression("'text'"),
            Node::Constant {
                value: Constant::Str("text".to_string())
            }
        );
        assert_eq!(expression("True"), Node::name("True"));
        assert_eq!(
            statements("return\n"),
            vec![Node::Return { value: None }]
        );
    }

    #[test]
    fn reports_position_of_bad_token() {
        let err = parse("x = 1\ny = * 2\n").expect_err("expected syntax error");
        assert_eq!(err.message, "invalid syntax");
        assert_eq!((err.line, err.column), (2, 5));
        assert_eq!(err.text, "y = * 2");
    }

    #[test]
    fn rejects_missing_block() {
        let err = parse("def f(x):\nreturn x\n").expect_err("expected syntax error");
        assert_eq!(err.message, "expected an indented block");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn rejects_unexpected_indent() {
        let err = parse("x = 1\n    y = 2\n").expect_err("expected syntax error");
        assert_eq!(err.message, "unexpected indent");
    }

    #[test]
    fn rejects_assignment_to_expression() {
        let err = parse("x + 1 = 2\n").expect_err("expected syntax error");
        assert_eq!(err.message, "cannot assign to BinOp");
    }
}
