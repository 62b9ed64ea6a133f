use pretty_assertions::assert_eq;
use crate::interpreter::lexer::{TokenPos, TokenType};
use super::*;

fn token(token_type: TokenType, source: &str) -> Token {
    Token::new(token_type, source.to_owned(), TokenPos::new(1, 1))
}

fn identifier(name: &str) -> Identifier {
    Identifier::new(token(TokenType::Identifier, name))
}

fn integer(value: i64) -> Expr {
    Expr::Integer { token: token(TokenType::Int, &value.to_string()), value }
}

mod expressions {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn infix_is_fully_parenthesised() {
        let expr = Expr::Infix {
            token: token(TokenType::Plus, "+"),
            left: Box::new(integer(5)),
            operator: InfixOperator::Add,
            right: Box::new(Expr::Infix {
                token: token(TokenType::Multiply, "*"),
                left: Box::new(integer(3)),
                operator: InfixOperator::Multiply,
                right: Box::new(integer(2)),
            }),
        };

        assert_eq!("(5 + (3 * 2))", expr.to_string());
        assert_eq!("+", expr.token_literal());
    }

    #[test]
    fn prefix_call_and_member() {
        let negated = Expr::Prefix {
            token: token(TokenType::Minus, "-"),
            operator: PrefixOperator::Negate,
            right: Box::new(Expr::Identifier(identifier("x"))),
        };
        assert_eq!("(-x)", negated.to_string());

        let call = Expr::Call {
            token: token(TokenType::ParenthesisLeft, "("),
            callee: Box::new(Expr::Member {
                token: token(TokenType::Dot, "."),
                receiver: Box::new(Expr::Identifier(identifier("io"))),
                name: identifier("preach"),
            }),
            args: vec![integer(1), Expr::String { token: token(TokenType::String, "beef"), value: String::from("beef") }],
        };
        assert_eq!("io.preach(1, \"beef\")", call.to_string());
        assert_eq!("(", call.token_literal());
    }
}

mod statements {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn declarations_keep_their_keyword() {
        let stmt = Stmt::Variable {
            token: token(TokenType::Prep, "cut"),
            name: identifier("x"),
            value: integer(42),
        };

        assert_eq!("cut x = 42", stmt.to_string());
        assert_eq!("cut", stmt.token_literal());
    }

    #[test]
    fn if_else_renders_a_single_beef() {
        let stmt = Stmt::If {
            token: token(TokenType::If, "if"),
            condition: Expr::Boolean { token: token(TokenType::True, "true"), value: true },
            consequence: Block {
                token: token(TokenType::Colon, ":"),
                statements: vec![Stmt::Expression { token: token(TokenType::Int, "10"), expr: integer(10) }],
            },
            alternative: Some(Block {
                token: token(TokenType::Colon, ":"),
                statements: vec![Stmt::Return { token: token(TokenType::Serve, "serve"), value: None }],
            }),
        };

        assert_eq!("if true: 10 else: serve beef", stmt.to_string());
    }

    #[test]
    fn empty_program() {
        let program = Program::default();

        assert_eq!("", program.token_literal());
        assert_eq!("", program.to_string());
    }
}
