use std::rc::Rc;
use lazy_static::lazy_static;
use tracing::debug;
use crate::interpreter::ast::{Block, Expr, Identifier, InfixOperator, PrefixOperator, Program, Stmt};
use crate::interpreter::lexer::{Lexer, Token, TokenType};


lazy_static! {
    /// Tokens that can only begin a statement; error recovery resumes at them.
    static ref STATEMENT_KEYWORDS: [TokenType; 6] = [
        TokenType::Prep,
        TokenType::Praise,
        TokenType::If,
        TokenType::FeastWhile,
        TokenType::Serve,
        TokenType::Wrangle,
    ];

    /// Tokens after which a bare `serve` returns nothing.
    static ref EMPTY_RETURN_FOLLOWERS: [TokenType; 4] = [
        TokenType::Beef,
        TokenType::Else,
        TokenType::Semicolon,
        TokenType::Eof,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    LogicalOr,
    LogicalAnd,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

impl Precedence {
    pub fn of(token_type: TokenType) -> Precedence {
        match token_type {
            TokenType::Or | TokenType::OrWord => Precedence::LogicalOr,
            TokenType::And | TokenType::AndWord => Precedence::LogicalAnd,
            TokenType::Equal | TokenType::NotEqual => Precedence::Equals,
            TokenType::Less | TokenType::LessEqual
            | TokenType::Greater | TokenType::GreaterEqual => Precedence::LessGreater,
            TokenType::Plus | TokenType::Minus => Precedence::Sum,
            TokenType::Multiply | TokenType::Divide | TokenType::Modulo => Precedence::Product,
            TokenType::ParenthesisLeft | TokenType::Dot => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

fn infix_operator(token_type: TokenType) -> Option<InfixOperator> {
    Some(match token_type {
        TokenType::Plus => InfixOperator::Add,
        TokenType::Minus => InfixOperator::Subtract,
        TokenType::Multiply => InfixOperator::Multiply,
        TokenType::Divide => InfixOperator::Divide,
        TokenType::Modulo => InfixOperator::Modulo,
        TokenType::Equal => InfixOperator::Equal,
        TokenType::NotEqual => InfixOperator::NotEqual,
        TokenType::Less => InfixOperator::Less,
        TokenType::LessEqual => InfixOperator::LessEqual,
        TokenType::Greater => InfixOperator::Greater,
        TokenType::GreaterEqual => InfixOperator::GreaterEqual,
        TokenType::And | TokenType::AndWord => InfixOperator::And,
        TokenType::Or | TokenType::OrWord => InfixOperator::Or,
        _ => return None,
    })
}

/// Pratt parser over a two-token window. Never aborts: problems are collected
/// as messages in [`Parser::errors`] and parsing resumes at the next statement.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    previous: Token, current: Token, peek: Token,

    errors: Vec<String>,
    panic_mode: bool,
}

impl<'source> Parser<'source> {
    pub fn new(mut lexer: Lexer<'source>) -> Parser<'source> {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        Parser {
            lexer,
            previous: current.clone(), current, peek,
            errors: Vec::new(), panic_mode: false,
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    // Statement parsing

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.is_eof() {
            if self.matches(TokenType::Semicolon) {
                continue;
            }

            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }

            if self.panic_mode {
                self.synchronize(&[]);
            }
        }

        debug!(statements = statements.len(), errors = self.errors.len(), "parsed program");
        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        let statement = match self.current.token_type() {
            TokenType::Prep => self.parse_variable_declaration(),
            TokenType::Identifier if self.peek.token_type() == TokenType::Assign => self.parse_assignment(),
            TokenType::Serve => self.parse_return_statement(),
            TokenType::If => self.parse_if_statement(),
            TokenType::FeastWhile => self.parse_while_loop(),
            TokenType::Praise => self.parse_function_declaration(),
            TokenType::Wrangle => self.parse_import_statement(),
            _ => self.parse_expression_statement(),
        };

        self.matches(TokenType::Semicolon);
        statement
    }

    fn parse_variable_declaration(&mut self) -> Option<Stmt> {
        let token = self.advance();
        let name = self.expect(TokenType::Identifier, &format!("Expected variable name after '{}'", token.source()))?;
        self.expect(TokenType::Assign, "Expected '=' after variable name")?;

        let value = self.parse_expression(Precedence::Lowest)?;
        Some(Stmt::Variable { token, name: Identifier::new(name), value })
    }

    fn parse_assignment(&mut self) -> Option<Stmt> {
        let token = self.advance();
        self.advance(); // the '='

        let value = self.parse_expression(Precedence::Lowest)?;
        Some(Stmt::Assign { name: Identifier::new(token.clone()), token, value })
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        let token = self.advance();

        let value = if self.check_any(&*EMPTY_RETURN_FOLLOWERS) {
            None
        } else {
            Some(self.parse_expression(Precedence::Lowest)?)
        };

        Some(Stmt::Return { token, value })
    }

    fn parse_if_statement(&mut self) -> Option<Stmt> {
        let token = self.advance();

        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenType::Colon, "Expected ':' after 'if' condition")?;

        let consequence = self.parse_block(&[TokenType::Else, TokenType::Beef]);

        let alternative = if self.matches(TokenType::Else) {
            if self.check(TokenType::If) {
                // `else if` nests, and the nested statement consumes the shared `beef`
                let block_token = self.current.clone();
                let nested = self.parse_if_statement()?;

                let alternative = Some(Block { token: block_token, statements: vec![nested] });
                return Some(Stmt::If { token, condition, consequence, alternative });
            }

            self.expect(TokenType::Colon, "Expected ':' after 'else'")?;
            Some(self.parse_block(&[TokenType::Beef]))
        } else {
            None
        };

        self.expect_block_end("Expected 'beef' after 'if' block")?;
        Some(Stmt::If { token, condition, consequence, alternative })
    }

    fn parse_while_loop(&mut self) -> Option<Stmt> {
        let token = self.advance();

        if token.source() == "feast" {
            if self.check(TokenType::FeastWhile) && self.current.source() == "while" {
                self.consume();
            } else {
                self.error_at_current("Expected 'while' after 'feast'", true);
                return None;
            }
        }

        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenType::Colon, "Expected ':' after loop condition")?;

        let body = self.parse_block(&[TokenType::Beef]);
        self.expect_block_end("Expected 'beef' after loop body")?;

        Some(Stmt::While { token, condition, body })
    }

    fn parse_function_declaration(&mut self) -> Option<Stmt> {
        let token = self.advance();

        let Some((name, parameters)) = self.parse_function_header() else {
            self.skip_block();
            return None;
        };

        let body = self.parse_block(&[TokenType::Beef]);
        self.expect_block_end("Expected 'beef' after function body")?;

        Some(Stmt::Function { token, name: Identifier::new(name), parameters, body: Rc::new(body) })
    }

    fn parse_function_header(&mut self) -> Option<(Token, Vec<Identifier>)> {
        let name = self.expect(TokenType::Identifier, "Expected function name after 'praise'")?;

        self.expect(TokenType::ParenthesisLeft, "Expected '(' after function name")?;
        let mut parameters: Vec<Identifier> = vec![];

        if !self.check(TokenType::ParenthesisRight) {
            loop {
                let parameter = self.expect(TokenType::Identifier, "Expected parameter name")?;

                if parameters.iter().any(|existing| existing.value == parameter.source()) {
                    self.error("Duplicate parameter", false);
                }

                parameters.push(Identifier::new(parameter));

                if !self.matches(TokenType::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenType::ParenthesisRight, "Expected ')' after function parameters")?;
        self.expect(TokenType::Colon, "Expected ':' after ')'")?;

        Some((name, parameters))
    }

    fn parse_import_statement(&mut self) -> Option<Stmt> {
        let token = self.advance();
        let name = self.expect(TokenType::Identifier, "Expected module name after 'wrangle'")?;

        Some(Stmt::Import { token, name: Identifier::new(name) })
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let token = self.current.clone();
        let expr = self.parse_expression(Precedence::Lowest)?;

        Some(Stmt::Expression { token, expr })
    }

    /// Parses statements up to (not including) one of `terminators`. The `:`
    /// opening the block has already been consumed.
    fn parse_block(&mut self, terminators: &[TokenType]) -> Block {
        let token = self.previous.clone();
        let mut statements = Vec::new();

        while !self.is_eof() && !self.check_any(terminators) {
            if self.matches(TokenType::Semicolon) {
                continue;
            }

            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }

            if self.panic_mode {
                self.synchronize(terminators);
            }
        }

        Block { token, statements }
    }

    /// A block is closed by `beef`; running out of input closes it as well.
    fn expect_block_end(&mut self, message: &str) -> Option<()> {
        if self.is_eof() {
            return Some(());
        }

        self.expect(TokenType::Beef, message).map(|_| ())
    }

    // Expression parsing

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while precedence < Precedence::of(self.current.token_type()) {
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.current.token_type() {
            TokenType::Int => self.parse_integer_literal(),
            TokenType::True | TokenType::False => {
                let token = self.advance();
                Some(Expr::Boolean { value: token.token_type() == TokenType::True, token })
            },
            TokenType::String => {
                let token = self.advance();
                Some(Expr::String { value: token.source().to_owned(), token })
            },
            TokenType::Identifier => Some(Expr::Identifier(Identifier::new(self.advance()))),
            TokenType::Minus => self.parse_prefix_expression(PrefixOperator::Negate),
            TokenType::Not | TokenType::NotWord => self.parse_prefix_expression(PrefixOperator::Not),
            TokenType::ParenthesisLeft => {
                self.consume();
                let expr = self.parse_expression(Precedence::Lowest)?;
                self.expect(TokenType::ParenthesisRight, "Expected ')' after expression")?;

                Some(expr)
            },
            // Block boundaries are left for the enclosing statement to deal with
            TokenType::Beef | TokenType::Else | TokenType::Eof => {
                self.error_at_current("Expected expression", true);
                None
            },
            TokenType::Illegal => {
                self.error_at_current("Illegal token", true);
                self.consume();
                None
            },
            _ => {
                self.error_at_current("Expected expression", true);
                self.consume();
                None
            },
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expr> {
        let token = self.advance();

        match token.source().parse::<i64>() {
            Ok(value) => Some(Expr::Integer { token, value }),
            Err(err) => {
                self.error(&format!("Failed to parse int literal: {}", err), true);
                None
            },
        }
    }

    fn parse_prefix_expression(&mut self, operator: PrefixOperator) -> Option<Expr> {
        let token = self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expr::Prefix { token, operator, right: Box::new(right) })
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.current.token_type() {
            TokenType::ParenthesisLeft => return self.finish_call(left),
            TokenType::Dot => return self.parse_member(left),
            _ => {},
        }

        let token = self.advance();
        let Some(operator) = infix_operator(token.token_type()) else {
            self.error("Expected binary operator", true);
            return None;
        };

        // Parsing the right side at the operator's own precedence keeps equal-precedence chains left-associative
        let right = self.parse_expression(Precedence::of(token.token_type()))?;
        Some(Expr::Infix { token, left: Box::new(left), operator, right: Box::new(right) })
    }

    fn finish_call(&mut self, callee: Expr) -> Option<Expr> {
        let paren_left = self.advance();
        let mut args = vec![];

        if !self.check(TokenType::ParenthesisRight) {
            args.push(self.parse_expression(Precedence::Lowest)?);

            while self.matches(TokenType::Comma) {
                args.push(self.parse_expression(Precedence::Lowest)?);
            }
        }

        self.expect(TokenType::ParenthesisRight, "Expected ')' after function call arguments")?;
        Some(Expr::Call { token: paren_left, callee: Box::new(callee), args })
    }

    fn parse_member(&mut self, receiver: Expr) -> Option<Expr> {
        let token = self.advance();
        let name = self.expect(TokenType::Identifier, "Expected member name after '.'")?;

        Some(Expr::Member { token, receiver: Box::new(receiver), name: Identifier::new(name) })
    }

    // Token window

    fn consume(&mut self) {
        let next = self.lexer.next_token();
        let current = std::mem::replace(&mut self.peek, next);
        self.previous = std::mem::replace(&mut self.current, current);
    }

    fn advance(&mut self) -> Token {
        self.consume();
        self.previous.clone()
    }

    fn expect(&mut self, token_type: TokenType, message: &str) -> Option<Token> {
        if self.check(token_type) {
            return Some(self.advance());
        }

        self.error_at_current(message, true);
        None
    }

    fn matches(&mut self, token_type: TokenType) -> bool {
        if !self.check(token_type) {
            return false;
        }

        self.consume();
        true
    }

    #[inline]
    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type() == token_type
    }

    fn check_any(&self, token_types: &[TokenType]) -> bool {
        token_types.contains(&self.current.token_type())
    }

    fn is_eof(&self) -> bool {
        self.current.token_type() == TokenType::Eof
    }

    // Error handling

    /// Skips ahead to a point where a new statement can begin. Inside a block
    /// its `terminators` are kept for the block; at the top level there are none.
    fn synchronize(&mut self, terminators: &[TokenType]) {
        self.panic_mode = false;

        while !self.is_eof() {
            if self.check_any(&*STATEMENT_KEYWORDS) || self.check_any(terminators) {
                return;
            }

            self.consume();

            if self.previous.token_type() == TokenType::Semicolon {
                return;
            }
        }
    }

    /// Skips a body whose header could not be parsed, up to and including
    /// the `beef` that closes it, so its statements are not parsed on their own.
    fn skip_block(&mut self) {
        let mut depth = 1;

        while !self.is_eof() {
            let previous = self.previous.token_type();
            let token = self.advance();

            match token.token_type() {
                // `else if` shares the enclosing `beef`
                TokenType::If if previous != TokenType::Else => depth += 1,
                TokenType::Praise => depth += 1,
                TokenType::FeastWhile if token.source() == "while" => depth += 1,
                TokenType::Beef => {
                    depth -= 1;

                    if depth == 0 {
                        break;
                    }
                },
                _ => {},
            }
        }

        self.panic_mode = false;
    }

    fn error_at_current(&mut self, message: &str, panic: bool) {
        let message = Self::format_error(&self.current, message);
        self.report(message, panic);
    }

    fn error(&mut self, message: &str, panic: bool) {
        let message = Self::format_error(&self.previous, message);
        self.report(message, panic);
    }

    fn format_error(token: &Token, message: &str) -> String {
        format!("{} Error at {}: {}", token.start(), token, message)
    }

    fn report(&mut self, message: String, panic: bool) {
        if self.panic_mode {
            return;
        } else if panic {
            self.panic_mode = true;
        }

        debug!(%message, "parse error");
        self.errors.push(message);
    }
}
