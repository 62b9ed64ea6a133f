use pretty_assertions::assert_eq;
use super::*;
use crate::interpreter::object::{Builtin, NULL};

#[test]
fn set_then_get() {
    let env = Environment::new_global();
    env.borrow_mut().set("x", Object::Integer(42));

    assert_eq!(Some(Object::Integer(42)), env.borrow().get("x"));
}

#[test]
fn missing_names() {
    let env = Environment::new_global();

    assert_eq!(None, env.borrow().get("nonexistent"));
}

#[test]
fn set_returns_the_bound_value() {
    let env = Environment::new_global();

    assert_eq!(Object::string("beef"), env.borrow_mut().set("s", Object::string("beef")));
}

#[test]
fn inner_frames_read_outer_bindings() {
    let outer = Environment::new_global();
    outer.borrow_mut().set("x", Object::Integer(10));

    let inner = Environment::new_with_parent(Rc::clone(&outer));
    inner.borrow_mut().set("y", Object::Integer(20));

    assert_eq!(Some(Object::Integer(10)), inner.borrow().get("x"));
    assert_eq!(Some(Object::Integer(20)), inner.borrow().get("y"));
    assert_eq!(None, outer.borrow().get("y"));
}

#[test]
fn shadowing_leaves_the_outer_binding_alone() {
    let outer = Environment::new_global();
    outer.borrow_mut().set("x", Object::Integer(10));

    let inner = Environment::new_with_parent(Rc::clone(&outer));
    inner.borrow_mut().set("x", Object::Integer(999));

    assert_eq!(Some(Object::Integer(999)), inner.borrow().get("x"));
    assert_eq!(Some(Object::Integer(10)), outer.borrow().get("x"));
}

#[test]
fn lookups_walk_the_whole_chain() {
    let global = Environment::new_global();
    global.borrow_mut().set("depth", Object::Integer(0));

    let middle = Environment::new_with_parent(Rc::clone(&global));
    let inner = Environment::new_with_parent(Rc::clone(&middle));

    assert_eq!(Some(Object::Integer(0)), inner.borrow().get("depth"));

    global.borrow_mut().set("depth", Object::Integer(1));
    assert_eq!(Some(Object::Integer(1)), inner.borrow().get("depth"));
}

#[test]
fn modules_are_visible_from_nested_frames() {
    fn nothing(_: &[Object]) -> Object {
        NULL
    }

    let global = Environment::new_global();
    global.borrow_mut().install_module(Module::new("io").with_builtin(Builtin::new("preach", nothing)));

    let inner = Environment::new_with_parent(Rc::clone(&global));
    let module = inner.borrow().find_module("io").expect("module should be found through the parent");

    assert_eq!("io", module.name());
    assert!(module.get("preach").is_some());
    assert!(inner.borrow().find_module("math").is_none());
}
