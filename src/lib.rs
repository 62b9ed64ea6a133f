pub mod util;
pub mod interpreter;

use std::io::Write;
use std::path::PathBuf;
use clap::Parser as ClapParser;
use tracing::{debug, info};
use crate::interpreter::environment::Environment;
use crate::interpreter::evaluator::{self, RuntimeError};
use crate::interpreter::lexer::{Lexer, TokenType};
use crate::interpreter::object::Object;
use crate::interpreter::parser::Parser;

#[cfg(test)]
mod tests;

#[derive(ClapParser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(help = "Beeflang script to run")]
    pub input: PathBuf,
    #[clap(long, help = "Print the token stream instead of running the script")]
    pub dump_tokens: bool,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parser errors:{}", .0.iter().map(|message| format!("\n  {}", message)).collect::<String>())]
    Parse(Vec<String>),
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Parses and evaluates `source` in a fresh global environment.
pub fn interpret(source: &str) -> Result<Object, Error> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    if parser.had_error() {
        return Err(Error::Parse(parser.errors().to_vec()));
    }

    let env = Environment::new_global();
    Ok(evaluator::eval_program(&program, &env)?)
}

/// Writes one line per token, up to and including the end of input.
pub fn dump_tokens(source: &str, name: &str, out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "Tokens for {}:", name)?;
    writeln!(out, "---")?;

    let mut lexer = Lexer::new(source);

    loop {
        let token = lexer.next_token();
        writeln!(out, "{:<15} {:<10} (line {}, col {})", token.token_type().to_string(), token.source(), token.line(), token.column())?;

        if token.token_type() == TokenType::Eof {
            return Ok(());
        }
    }
}

pub fn run(config: &Config, out: &mut impl Write) -> Result<(), Error> {
    let source = std::fs::read_to_string(&config.input)?;
    info!(input = %config.input.display(), bytes = source.len(), "read script");

    if config.dump_tokens {
        return dump_tokens(&source, &config.input.display().to_string(), out);
    }

    let result = interpret(&source)?;
    debug!(result = %result.object_type(), "script finished");

    if !result.is_null() {
        writeln!(out, "{}", result.inspect())?;
    }

    Ok(())
}
