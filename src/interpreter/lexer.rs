use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::Chars;
use lazy_static::lazy_static;
use crate::util;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPos {
    pub line: i32,
    pub column: i32,
}

impl TokenPos {
    pub fn new(line: i32, column: i32) -> TokenPos {
        TokenPos { line, column }
    }

    /// Cursor position before anything has been consumed. Columns count
    /// consumed characters, so the first character of a line is column 1.
    pub fn begin() -> TokenPos {
        TokenPos::new(1, 0)
    }
}

impl Display for TokenPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {} column {}]", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenType {
    Illegal,

    ParenthesisLeft, ParenthesisRight,
    Dot, Comma, Semicolon, Colon,

    Assign, Equal,
    Not, NotEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    Plus, Minus,
    Multiply, Divide, Modulo,

    And, Or,

    Identifier,
    Int,
    String,

    // Keywords
    Prep,
    Praise,
    Beef,
    FeastWhile,
    If, Else,
    Serve,
    Genesis,
    True, False,
    AndWord, OrWord, NotWord,
    Wrangle, Herd,

    // EOF
    Eof,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::ParenthesisLeft => "(",
            TokenType::ParenthesisRight => ")",
            TokenType::Dot => ".",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Colon => ":",
            TokenType::Assign => "=",
            TokenType::Equal => "==",
            TokenType::Not => "!",
            TokenType::NotEqual => "!=",
            TokenType::Greater => ">",
            TokenType::GreaterEqual => ">=",
            TokenType::Less => "<",
            TokenType::LessEqual => "<=",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Multiply => "*",
            TokenType::Divide => "/",
            TokenType::Modulo => "%",
            TokenType::And => "&&",
            TokenType::Or => "||",
            TokenType::Identifier => "IDENT",
            TokenType::Int => "INT",
            TokenType::String => "STRING",
            TokenType::Prep => "PREP",
            TokenType::Praise => "PRAISE",
            TokenType::Beef => "BEEF",
            TokenType::FeastWhile => "FEAST_WHILE",
            TokenType::If => "IF",
            TokenType::Else => "ELSE",
            TokenType::Serve => "SERVE",
            TokenType::Genesis => "GENESIS",
            TokenType::True => "TRUE",
            TokenType::False => "FALSE",
            TokenType::AndWord => "AND",
            TokenType::OrWord => "OR",
            TokenType::NotWord => "NOT",
            TokenType::Wrangle => "WRANGLE",
            TokenType::Herd => "HERD",
            TokenType::Eof => "EOF",
        })
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = HashMap::from([
        ("prep", TokenType::Prep),
        ("cut", TokenType::Prep),
        ("praise", TokenType::Praise),
        ("beef", TokenType::Beef),
        ("feast", TokenType::FeastWhile),
        ("while", TokenType::FeastWhile),
        ("if", TokenType::If),
        ("else", TokenType::Else),
        ("serve", TokenType::Serve),
        ("genesis", TokenType::Genesis),
        ("true", TokenType::True),
        ("false", TokenType::False),
        ("and", TokenType::AndWord),
        ("or", TokenType::OrWord),
        ("not", TokenType::NotWord),
        ("wrangle", TokenType::Wrangle),
        ("herd", TokenType::Herd),
    ]);
}

/// Maps reserved spellings to their keyword type, everything else is an identifier.
pub fn lookup_identifier(name: &str) -> TokenType {
    KEYWORDS.get(name).copied().unwrap_or(TokenType::Identifier)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    source: String,
    start: TokenPos,
}

impl Token {
    pub fn new(token_type: TokenType, source: String, start: TokenPos) -> Token {
        Token {
            token_type, source,
            start,
        }
    }

    pub fn token_type(&self) -> TokenType { self.token_type }
    pub fn source(&self) -> &str { &self.source }
    pub fn start(&self) -> &TokenPos { &self.start }
    pub fn line(&self) -> i32 { self.start.line }
    pub fn column(&self) -> i32 { self.start.column }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::Eof => f.write_str("end"),
            TokenType::String => write!(f, "'\"{}\"'", self.source),
            _ => write!(f, "'{}'", self.source),
        }
    }
}

/// Pull-based tokenizer. Never fails: characters it cannot classify come back
/// as [`TokenType::Illegal`] tokens for the parser to reject.
pub struct Lexer<'source> {
    input: &'source str,

    chars: Chars<'source>,
    peek_1: Option<char>,

    start_index: usize,
    current_index: usize,

    start_pos: TokenPos,
    current_pos: TokenPos,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Lexer<'source> {
        Lexer {
            input: source,

            chars: source.chars(),
            peek_1: None,

            start_index: 0,
            current_index: 0,

            start_pos: TokenPos::begin(),
            current_pos: TokenPos::begin(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            self.start_index = self.current_index;
            self.start_pos = TokenPos::new(self.current_pos.line, self.current_pos.column + 1);

            let c = match self.consume() {
                Some(c) => c,
                None => return self.make_token(TokenType::Eof),
            };

            return match c {
                '#' => {
                    self.skip_line();
                    continue;
                },

                '(' => self.make_token(TokenType::ParenthesisLeft),
                ')' => self.make_token(TokenType::ParenthesisRight),
                '.' => self.make_token(TokenType::Dot),
                ',' => self.make_token(TokenType::Comma),
                ';' => self.make_token(TokenType::Semicolon),
                ':' => self.make_token(TokenType::Colon),

                '=' => if self.expect('=') { self.make_token(TokenType::Equal) } else {
                    self.make_token(TokenType::Assign)
                },
                '!' => if self.expect('=') { self.make_token(TokenType::NotEqual) } else {
                    self.make_token(TokenType::Not)
                },
                '>' => if self.expect('=') { self.make_token(TokenType::GreaterEqual) } else {
                    self.make_token(TokenType::Greater)
                },
                '<' => if self.expect('=') { self.make_token(TokenType::LessEqual) } else {
                    self.make_token(TokenType::Less)
                },
                // Single `&` and `|` have no meaning
                '&' => if self.expect('&') { self.make_token(TokenType::And) } else {
                    self.make_token(TokenType::Illegal)
                },
                '|' => if self.expect('|') { self.make_token(TokenType::Or) } else {
                    self.make_token(TokenType::Illegal)
                },

                '+' => self.make_token(TokenType::Plus),
                '-' => self.make_token(TokenType::Minus),
                '*' => self.make_token(TokenType::Multiply),
                '/' => self.make_token(TokenType::Divide),
                '%' => self.make_token(TokenType::Modulo),

                '"' => self.scan_string(),
                c if util::is_numeric(c) => self.scan_number(),
                c if util::is_alphabetic(c) => self.scan_identifier(),

                _ => self.make_token(TokenType::Illegal),
            };
        }
    }

    fn scan_string(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }

            self.consume();
        }

        if self.consume().is_none() {
            // Unterminated; hand the whole rest of the input to the parser as one bad token
            return self.make_token(TokenType::Illegal);
        }

        // Don't add leading and trailing '"' characters to token
        Token::new(TokenType::String, self.input[(self.start_index + 1)..(self.current_index - 1)].to_owned(), self.start_pos)
    }

    fn scan_number(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_numeric(c) {
                break;
            }

            self.consume();
        }

        self.make_token(TokenType::Int)
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_alphanumeric(c) {
                break;
            }

            self.consume();
        }

        let name = &self.input[self.start_index..self.current_index];
        Token::new(lookup_identifier(name), name.to_owned(), self.start_pos)
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token::new(token_type, self.input[self.start_index..self.current_index].to_owned(), self.start_pos)
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek_1.take().or_else(|| self.chars.next())?;
        self.current_index += c.len_utf8();

        if c == '\n' {
            self.current_pos.line += 1;
            self.current_pos.column = 0;
        } else {
            self.current_pos.column += 1;
        }

        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        if self.peek_1.is_none() {
            self.peek_1 = self.chars.next();
        }

        self.peek_1
    }

    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.consume();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !util::is_whitespace(c) {
                return;
            }

            self.consume();
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                return;
            }

            self.consume();
        }
    }
}

/// Yields every token up to, but not including, [`TokenType::Eof`].
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.token_type() != TokenType::Eof).then_some(token)
    }
}
