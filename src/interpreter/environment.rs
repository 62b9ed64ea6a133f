use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;
use crate::interpreter::object::{Module, Object};

#[cfg(test)]
mod tests;

pub type Env = Rc<RefCell<Environment>>;

/// One frame of the scope chain. Reads walk outward through `parent`;
/// writes always land in this frame.
#[derive(Default)]
pub struct Environment {
    variables: HashMap<String, Object>,
    modules: HashMap<String, Rc<Module>>,

    parent: Option<Env>,
}

impl Environment {
    pub fn new_global() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn new_with_parent(parent: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            variables: HashMap::new(),
            modules: HashMap::new(),

            parent: Some(parent),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        self.variables.get(name).cloned()
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.borrow().get(name)))
    }

    /// Binds `name` in this frame, shadowing any outer binding of the same name.
    pub fn set(&mut self, name: &str, value: Object) -> Object {
        self.variables.insert(name.to_owned(), value.clone());
        value
    }

    /// Makes `module` available to `wrangle` in this frame and every frame nested in it.
    pub fn install_module(&mut self, module: Module) {
        self.modules.insert(module.name().to_owned(), Rc::new(module));
    }

    pub fn find_module(&self, name: &str) -> Option<Rc<Module>> {
        self.modules.get(name).map(Rc::clone)
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.borrow().find_module(name)))
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.variables.keys().collect();
        names.sort();

        f.debug_struct("Environment")
            .field("variables", &names)
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .field("parent", &self.parent.as_ref().map(|parent| parent.borrow()))
            .finish()
    }
}
