use std::fmt::{Display, Formatter};
use std::rc::Rc;
use crate::interpreter::lexer::Token;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefixOperator {
    Negate,
    Not,
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixOperator::Negate => write!(f, "-"),
            PrefixOperator::Not => write!(f, "!"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfixOperator {
    Add, Subtract,
    Multiply, Divide, Modulo,
    Equal, NotEqual,
    Less, LessEqual,
    Greater, GreaterEqual,
    And, Or,
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Modulo => "%",
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
            InfixOperator::Less => "<",
            InfixOperator::LessEqual => "<=",
            InfixOperator::Greater => ">",
            InfixOperator::GreaterEqual => ">=",
            InfixOperator::And => "&&",
            InfixOperator::Or => "||",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn new(token: Token) -> Identifier {
        let value = token.source().to_owned();
        Identifier { token, value }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Integer {
        token: Token,
        value: i64,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    String {
        token: Token,
        value: String,
    },
    Identifier(Identifier),

    Prefix {
        token: Token,
        operator: PrefixOperator,
        right: Box<Expr>,
    },
    Infix {
        token: Token,
        left: Box<Expr>,
        operator: InfixOperator,
        right: Box<Expr>,
    },
    Call {
        token: Token,
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        token: Token,
        receiver: Box<Expr>,
        name: Identifier,
    },
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Integer { token, .. }
            | Expr::Boolean { token, .. }
            | Expr::String { token, .. }
            | Expr::Prefix { token, .. }
            | Expr::Infix { token, .. }
            | Expr::Call { token, .. }
            | Expr::Member { token, .. } => token,
            Expr::Identifier(identifier) => &identifier.token,
        }
    }

    pub fn token_literal(&self) -> &str {
        self.token().source()
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Integer { value, .. } => write!(f, "{}", value),
            Expr::Boolean { value, .. } => write!(f, "{}", value),
            Expr::String { value, .. } => write!(f, "\"{}\"", value),
            Expr::Identifier(identifier) => write!(f, "{}", identifier),
            Expr::Prefix { operator, right, .. } => write!(f, "({}{})", operator, right),
            Expr::Infix { left, operator, right, .. } => write!(f, "({} {} {})", left, operator, right),
            Expr::Call { callee, args, .. } => write!(f, "{}({})", callee, args.iter()
                .map(|arg| arg.to_string())
                .collect::<Vec<String>>().join(", ")),
            Expr::Member { receiver, name, .. } => write!(f, "{}.{}", receiver, name),
        }
    }
}

/// Statements between a `:` and the closing `beef` (or `else`).
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub token: Token,
    pub statements: Vec<Stmt>,
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ":")?;

        for statement in &self.statements {
            write!(f, " {}", statement)?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Variable {
        token: Token,
        name: Identifier,
        value: Expr,
    },
    Assign {
        token: Token,
        name: Identifier,
        value: Expr,
    },
    Return {
        token: Token,
        value: Option<Expr>,
    },
    If {
        token: Token,
        condition: Expr,
        consequence: Block,
        alternative: Option<Block>,
    },
    While {
        token: Token,
        condition: Expr,
        body: Block,
    },
    Function {
        token: Token,
        name: Identifier,
        parameters: Vec<Identifier>,
        body: Rc<Block>,
    },
    Import {
        token: Token,
        name: Identifier,
    },
    Expression {
        token: Token,
        expr: Expr,
    },
}

impl Stmt {
    pub fn token(&self) -> &Token {
        match self {
            Stmt::Variable { token, .. }
            | Stmt::Assign { token, .. }
            | Stmt::Return { token, .. }
            | Stmt::If { token, .. }
            | Stmt::While { token, .. }
            | Stmt::Function { token, .. }
            | Stmt::Import { token, .. }
            | Stmt::Expression { token, .. } => token,
        }
    }

    pub fn token_literal(&self) -> &str {
        self.token().source()
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Variable { token, name, value } => write!(f, "{} {} = {}", token.source(), name, value),
            Stmt::Assign { name, value, .. } => write!(f, "{} = {}", name, value),
            Stmt::Return { value: Some(value), .. } => write!(f, "serve {}", value),
            Stmt::Return { value: None, .. } => write!(f, "serve"),
            Stmt::If { condition, consequence, alternative, .. } => {
                write!(f, "if {}{}", condition, consequence)?;

                if let Some(alternative) = alternative {
                    write!(f, " else{}", alternative)?;
                }

                write!(f, " beef")
            },
            Stmt::While { condition, body, .. } => write!(f, "while {}{} beef", condition, body),
            Stmt::Function { name, parameters, body, .. } => write!(f, "praise {}({}){} beef", name, parameters.iter()
                .map(|parameter| parameter.value.clone())
                .collect::<Vec<String>>().join(", "), body),
            Stmt::Import { name, .. } => write!(f, "wrangle {}", name),
            Stmt::Expression { expr, .. } => write!(f, "{}", expr),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements.first().map(Stmt::token_literal).unwrap_or("")
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>().join("\n"))
    }
}
