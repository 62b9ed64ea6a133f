use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use crate::interpreter::ast::Block;
use crate::interpreter::environment::Env;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Null,
    Function,
    ReturnValue,
    Module,
    Builtin,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::String => "STRING",
            ObjectType::Null => "NULL",
            ObjectType::Function => "FUNCTION",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Module => "MODULE",
            ObjectType::Builtin => "BUILTIN",
        })
    }
}

/// A user-defined function together with the environment it was declared in.
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Rc<Block>,
    pub env: Env,
}

// The captured environment usually contains the function itself
impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "praise {}({})", self.name, self.parameters.join(", "))
    }
}

pub type BuiltinFunction = fn(&[Object]) -> Object;

/// A native function exposed to scripts, usually as a [`Module`] member.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub function: BuiltinFunction,
}

impl Builtin {
    pub fn new(name: &'static str, function: BuiltinFunction) -> Builtin {
        Builtin { name, function }
    }

    pub fn call(&self, args: &[Object]) -> Object {
        (self.function)(args)
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "builtin {}", self.name)
    }
}

#[derive(Debug)]
pub struct Module {
    name: String,
    members: HashMap<String, Object>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Module {
        Module { name: name.into(), members: HashMap::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        self.members.get(name).cloned()
    }

    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.members.insert(name.into(), value);
    }

    pub fn with_builtin(mut self, builtin: Builtin) -> Module {
        self.set(builtin.name, Object::Builtin(builtin));
        self
    }
}

#[derive(Clone, Debug)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
    Null,
    Function(Rc<Function>),
    /// Carries a `serve`d value up through blocks and loops until a call unwraps it.
    ReturnValue(Box<Object>),
    Module(Rc<Module>),
    Builtin(Builtin),
}

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

impl Object {
    pub fn from_bool(value: bool) -> Object {
        if value { TRUE } else { FALSE }
    }

    pub fn string(value: &str) -> Object {
        Object::String(Rc::from(value))
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Null => ObjectType::Null,
            Object::Function(_) => ObjectType::Function,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Module(_) => ObjectType::Module,
            Object::Builtin(_) => ObjectType::Builtin,
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(value) => value.to_string(),
            Object::Boolean(value) => value.to_string(),
            Object::String(value) => value.to_string(),
            Object::Null => String::from("null"),
            Object::Function(function) => format!("{:?}", function),
            Object::ReturnValue(value) => value.inspect(),
            Object::Module(module) => format!("<module '{}'>", module.name()),
            Object::Builtin(_) => String::from("<builtin>"),
        }
    }

    /// Only `null` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inspect())
    }
}

/// Scalars compare by value; functions and modules only equal themselves.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(left), Object::Integer(right)) => left == right,
            (Object::Boolean(left), Object::Boolean(right)) => left == right,
            (Object::String(left), Object::String(right)) => left == right,
            (Object::Null, Object::Null) => true,
            (Object::Function(left), Object::Function(right)) => Rc::ptr_eq(left, right),
            (Object::ReturnValue(left), Object::ReturnValue(right)) => left == right,
            (Object::Module(left), Object::Module(right)) => Rc::ptr_eq(left, right),
            (Object::Builtin(left), Object::Builtin(right)) => left.name == right.name,
            _ => false,
        }
    }
}
