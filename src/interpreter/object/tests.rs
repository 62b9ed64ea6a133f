use pretty_assertions::assert_eq;
use super::*;
use crate::interpreter::environment::Environment;
use crate::interpreter::lexer::{Token, TokenPos, TokenType};

fn first_or_null(args: &[Object]) -> Object {
    args.first().cloned().unwrap_or(NULL)
}

fn function(name: &str, parameters: &[&str]) -> Object {
    Object::Function(Rc::new(Function {
        name: name.to_owned(),
        parameters: parameters.iter().map(|parameter| parameter.to_string()).collect(),
        body: Rc::new(Block {
            token: Token::new(TokenType::Colon, String::from(":"), TokenPos::new(1, 1)),
            statements: vec![],
        }),
        env: Environment::new_global(),
    }))
}

mod inspect {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!((ObjectType::Integer, String::from("42")), (Object::Integer(42).object_type(), Object::Integer(42).inspect()));
        assert_eq!((ObjectType::Boolean, String::from("true")), (TRUE.object_type(), TRUE.inspect()));
        assert_eq!("false", FALSE.inspect());
        assert_eq!((ObjectType::String, String::from("Hello, Beef!")), (Object::string("Hello, Beef!").object_type(), Object::string("Hello, Beef!").inspect()));
        assert_eq!((ObjectType::Null, String::from("null")), (NULL.object_type(), NULL.inspect()));
    }

    #[test]
    fn type_names() {
        assert_eq!("INTEGER", ObjectType::Integer.to_string());
        assert_eq!("RETURN_VALUE", ObjectType::ReturnValue.to_string());
        assert_eq!("BUILTIN", ObjectType::Builtin.to_string());
    }

    #[test]
    fn functions_show_their_signature() {
        let add = function("add", &["x", "y"]);

        assert_eq!(ObjectType::Function, add.object_type());
        assert_eq!("praise add(x, y)", add.inspect());
    }

    #[test]
    fn return_values_show_their_contents() {
        let wrapped = Object::ReturnValue(Box::new(Object::Integer(7)));

        assert_eq!(ObjectType::ReturnValue, wrapped.object_type());
        assert_eq!("7", wrapped.inspect());
    }

    #[test]
    fn modules_and_builtins() {
        let module = Object::Module(Rc::new(Module::new("io")));
        assert_eq!(ObjectType::Module, module.object_type());
        assert_eq!("<module 'io'>", module.inspect());

        let builtin = Object::Builtin(Builtin::new("first", first_or_null));
        assert_eq!(ObjectType::Builtin, builtin.object_type());
        assert_eq!("<builtin>", builtin.to_string());
    }
}

mod truthiness {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn only_null_and_false_are_falsy() {
        assert!(!NULL.is_truthy());
        assert!(!FALSE.is_truthy());

        assert!(TRUE.is_truthy());
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::string("").is_truthy());
        assert!(function("f", &[]).is_truthy());
    }

    #[test]
    fn booleans_are_canonical() {
        assert_eq!(TRUE, Object::from_bool(true));
        assert_eq!(FALSE, Object::from_bool(false));
        assert_eq!(NULL, Object::Null);
    }
}

mod equality {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn functions_only_equal_themselves() {
        let first = function("f", &[]);
        let second = function("f", &[]);

        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn different_types_never_match() {
        assert_ne!(Object::Integer(1), TRUE);
        assert_ne!(NULL, FALSE);
        assert_ne!(Object::string("1"), Object::Integer(1));
    }
}

mod modules {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn get_and_set_members() {
        let mut module = Module::new("io");
        module.set("answer", Object::Integer(42));

        assert_eq!(Some(Object::Integer(42)), module.get("answer"));
        assert_eq!(None, module.get("nonexistent"));
    }

    #[test]
    fn builtins_are_callable() {
        let builtin = Builtin::new("first", first_or_null);

        assert_eq!(Object::Integer(42), builtin.call(&[Object::Integer(42), TRUE]));
        assert_eq!(NULL, builtin.call(&[]));
    }
}
