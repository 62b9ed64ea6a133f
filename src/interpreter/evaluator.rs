use std::rc::Rc;
use tracing::{debug, trace};
use crate::interpreter::ast::{Block, Expr, InfixOperator, PrefixOperator, Program, Stmt};
use crate::interpreter::environment::{Env, Environment};
use crate::interpreter::lexer::TokenPos;
use crate::interpreter::object::{Function, Object, FALSE, NULL, TRUE};


/// Faults that stop evaluation. Everything else (type mismatches, unknown
/// names, calling a non-function) evaluates to `null` instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("{pos} Division by zero")]
    DivisionByZero { pos: TokenPos },
    #[error("{pos} Modulo by zero")]
    ModuloByZero { pos: TokenPos },
}

pub type EvalResult<T> = Result<T, RuntimeError>;

pub fn eval_program(program: &Program, env: &Env) -> EvalResult<Object> {
    let mut result = NULL;

    for statement in &program.statements {
        result = eval_statement(statement, env)?;

        if let Object::ReturnValue(value) = result {
            return Ok(*value);
        }
    }

    Ok(result)
}

/// Evaluates `block` in `env` itself; only calls open a new scope. A
/// [`Object::ReturnValue`] is passed up still wrapped.
pub fn eval_block(block: &Block, env: &Env) -> EvalResult<Object> {
    let mut result = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env)?;

        if let Object::ReturnValue(_) = result {
            break;
        }
    }

    Ok(result)
}

pub fn eval_statement(statement: &Stmt, env: &Env) -> EvalResult<Object> {
    match statement {
        Stmt::Variable { name, value, .. } | Stmt::Assign { name, value, .. } => {
            let value = eval_expression(value, env)?;
            Ok(env.borrow_mut().set(&name.value, value))
        },
        Stmt::Return { value, .. } => {
            let value = match value {
                Some(value) => eval_expression(value, env)?,
                None => NULL,
            };

            Ok(Object::ReturnValue(Box::new(value)))
        },
        Stmt::If { condition, consequence, alternative, .. } => {
            if eval_expression(condition, env)?.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Ok(NULL)
            }
        },
        Stmt::While { condition, body, .. } => {
            let mut result = NULL;

            while eval_expression(condition, env)?.is_truthy() {
                result = eval_block(body, env)?;

                if let Object::ReturnValue(_) = result {
                    break;
                }
            }

            Ok(result)
        },
        Stmt::Function { name, parameters, body, .. } => {
            let function = Object::Function(Rc::new(Function {
                name: name.value.clone(),
                parameters: parameters.iter().map(|parameter| parameter.value.clone()).collect(),
                body: Rc::clone(body),
                env: Rc::clone(env),
            }));

            Ok(env.borrow_mut().set(&name.value, function))
        },
        Stmt::Import { name, .. } => {
            let module = env.borrow().find_module(&name.value);

            match module {
                Some(module) => Ok(env.borrow_mut().set(&name.value, Object::Module(module))),
                None => {
                    debug!(module = %name.value, pos = %name.token.start(), "unknown module");
                    Ok(NULL)
                },
            }
        },
        Stmt::Expression { expr, .. } => eval_expression(expr, env),
    }
}

pub fn eval_expression(expr: &Expr, env: &Env) -> EvalResult<Object> {
    match expr {
        Expr::Integer { value, .. } => Ok(Object::Integer(*value)),
        Expr::Boolean { value, .. } => Ok(Object::from_bool(*value)),
        Expr::String { value, .. } => Ok(Object::string(value)),
        Expr::Identifier(identifier) => {
            let value = env.borrow().get(&identifier.value);

            Ok(value.unwrap_or_else(|| {
                debug!(name = %identifier.value, pos = %identifier.token.start(), "unresolved identifier");
                NULL
            }))
        },
        Expr::Prefix { operator, right, .. } => {
            let right = eval_expression(right, env)?;
            Ok(eval_prefix_expression(*operator, right))
        },
        Expr::Infix { left, operator: operator @ (InfixOperator::And | InfixOperator::Or), right, .. } =>
            eval_logical_expression(*operator, left, right, env),
        Expr::Infix { token, left, operator, right } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;

            eval_infix_expression(*operator, left, right, *token.start())
        },
        Expr::Call { callee, args, .. } => {
            let callee = eval_expression(callee, env)?;
            let args = args.iter()
                .map(|arg| eval_expression(arg, env))
                .collect::<EvalResult<Vec<Object>>>()?;

            apply_function(callee, args)
        },
        Expr::Member { receiver, name, .. } => {
            match eval_expression(receiver, env)? {
                Object::Module(module) => Ok(module.get(&name.value).unwrap_or(NULL)),
                other => {
                    debug!(receiver = %other.object_type(), member = %name.value, "member access on a non-module");
                    Ok(NULL)
                },
            }
        },
    }
}

fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> Object {
    match operator {
        PrefixOperator::Not => Object::from_bool(!right.is_truthy()),
        PrefixOperator::Negate => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            _ => NULL,
        },
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Object, right: Object, pos: TokenPos) -> EvalResult<Object> {
    match (&left, &right) {
        (Object::Integer(left), Object::Integer(right)) => eval_integer_infix_expression(operator, *left, *right, pos),
        (Object::String(left), Object::String(right)) => Ok(match operator {
            InfixOperator::Add => Object::string(&format!("{}{}", left, right)),
            _ => NULL,
        }),
        _ => Ok(match operator {
            InfixOperator::Equal => Object::from_bool(left == right),
            InfixOperator::NotEqual => Object::from_bool(left != right),
            _ => NULL,
        }),
    }
}

fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64, pos: TokenPos) -> EvalResult<Object> {
    Ok(match operator {
        InfixOperator::Add => Object::Integer(left.wrapping_add(right)),
        InfixOperator::Subtract => Object::Integer(left.wrapping_sub(right)),
        InfixOperator::Multiply => Object::Integer(left.wrapping_mul(right)),
        InfixOperator::Divide if right == 0 => return Err(RuntimeError::DivisionByZero { pos }),
        InfixOperator::Divide => Object::Integer(left.wrapping_div(right)),
        InfixOperator::Modulo if right == 0 => return Err(RuntimeError::ModuloByZero { pos }),
        InfixOperator::Modulo => Object::Integer(left.wrapping_rem(right)),
        InfixOperator::Equal => Object::from_bool(left == right),
        InfixOperator::NotEqual => Object::from_bool(left != right),
        InfixOperator::Less => Object::from_bool(left < right),
        InfixOperator::LessEqual => Object::from_bool(left <= right),
        InfixOperator::Greater => Object::from_bool(left > right),
        InfixOperator::GreaterEqual => Object::from_bool(left >= right),
        InfixOperator::And | InfixOperator::Or => NULL,
    })
}

/// The right operand is only evaluated when the left one does not decide the result.
fn eval_logical_expression(operator: InfixOperator, left: &Expr, right: &Expr, env: &Env) -> EvalResult<Object> {
    let left = eval_expression(left, env)?.is_truthy();

    let result = match operator {
        InfixOperator::And if !left => false,
        InfixOperator::Or if left => true,
        _ => eval_expression(right, env)?.is_truthy(),
    };

    Ok(if result { TRUE } else { FALSE })
}

#[tracing::instrument(level = "trace", skip_all, fields(callee = %callee.object_type(), args = args.len()))]
fn apply_function(callee: Object, args: Vec<Object>) -> EvalResult<Object> {
    match callee {
        Object::Function(function) => {
            let env = Environment::new_with_parent(Rc::clone(&function.env));

            // Surplus arguments are dropped and missing ones stay unbound
            for (parameter, arg) in function.parameters.iter().zip(args) {
                env.borrow_mut().set(parameter, arg);
            }

            trace!(function = %function.name, "entering function body");

            Ok(match eval_block(&function.body, &env)? {
                Object::ReturnValue(value) => *value,
                _ => NULL,
            })
        },
        Object::Builtin(builtin) => Ok(builtin.call(&args)),
        other => {
            debug!(callee = %other.inspect(), "called a value that is not a function");
            Ok(NULL)
        },
    }
}
