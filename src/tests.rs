use pretty_assertions::assert_eq;
use super::*;

fn script(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("beeflang-{}-{}.beef", std::process::id(), name));
    std::fs::write(&path, source).expect("should write test script");
    path
}

fn run_to_string(config: &Config) -> Result<String, Error> {
    let mut out = Vec::new();
    run(config, &mut out)?;

    Ok(String::from_utf8(out).expect("output should be UTF-8"))
}

mod interpret {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn returns_the_last_value() {
        assert_eq!(Object::Integer(15), interpret("prep x = 5; prep y = 10; x + y").expect("should evaluate"));
    }

    #[test]
    fn parse_errors_stop_before_evaluation() {
        match interpret("prep = 5\nprep y 10\n1 / 0") {
            Err(Error::Parse(errors)) => assert_eq!(2, errors.len()),
            other => panic!("expected parse errors, got {:?}", other),
        }
    }

    #[test]
    fn parse_errors_are_listed_indented() {
        let err = interpret("prep = 5\nprep y 10").unwrap_err();

        assert_eq!(
            "Parser errors:\n  [line 1 column 6] Error at '=': Expected variable name after 'prep'\n  [line 2 column 8] Error at '10': Expected '=' after variable name",
            err.to_string(),
        );
    }

    #[test]
    fn runtime_errors() {
        let err = interpret("prep x = 10\nx / 0").unwrap_err();
        assert_eq!("Runtime error: [line 2 column 3] Division by zero", err.to_string());
    }
}

mod tokens {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn dump_includes_end_of_input() {
        let mut out = Vec::new();
        dump_tokens("prep x = 5", "demo.beef", &mut out).expect("writing to a Vec should not fail");

        assert_eq!(
            "Tokens for demo.beef:\n\
             ---\n\
             PREP            prep       (line 1, col 1)\n\
             IDENT           x          (line 1, col 6)\n\
             =               =          (line 1, col 8)\n\
             INT             5          (line 1, col 10)\n\
             EOF                        (line 1, col 11)\n",
            String::from_utf8(out).expect("output should be UTF-8"),
        );
    }
}

mod runner {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn prints_non_null_results() {
        let input = script("print", "\"Hello\" + \" \" + \"Beef\"");
        let config = Config { input, dump_tokens: false, verbose: false };

        assert_eq!("Hello Beef\n", run_to_string(&config).expect("script should run"));
    }

    #[test]
    fn null_results_print_nothing() {
        let input = script("silent", "if false: 1 beef");
        let config = Config { input, dump_tokens: false, verbose: false };

        assert_eq!("", run_to_string(&config).expect("script should run"));
    }

    #[test]
    fn dump_tokens_skips_evaluation() {
        let input = script("dump", "10 / 0");
        let config = Config { input: input.clone(), dump_tokens: true, verbose: false };
        let output = run_to_string(&config).expect("dumping tokens should not evaluate");

        assert!(output.starts_with(&format!("Tokens for {}:\n---\n", input.display())), "{}", output);
        assert_eq!(6, output.lines().count());
    }

    #[test]
    fn missing_files() {
        let config = Config { input: PathBuf::from("/nonexistent/script.beef"), dump_tokens: false, verbose: false };

        match run_to_string(&config) {
            Err(Error::Io(_)) => {},
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }
}
