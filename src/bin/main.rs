use lang_rs::{Outcome, Session, WriteReporter};
use std::{
    env,
    io::{self, Write},
};

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run_prompt()?,
        2 => run_file(args[1].as_str())?,
        _ => {
            writeln!(stdout, "Usage: lang-rs [script]")?;
            std::process::exit(64);
        },
    };

    Ok(())
}

fn run_file(path: &str) -> io::Result<()> {
    let mut stderr = io::stderr();
    let outcome = std::fs::read_to_string(path).and_then(|contents| {
        let mut session = Session::new(io::stdout(), WriteReporter::new(io::stderr()));
        session.run(contents.as_str())
    });

    match outcome {
        Ok(Outcome::Success) => Ok(()),
        Ok(Outcome::SyntaxError) => std::process::exit(65),
        Ok(Outcome::RuntimeError) => std::process::exit(70),
        Err(e) => {
            writeln!(stderr, "{}: {}", path, e)?;
            std::process::exit(65);
        },
    }
}

// One session for the whole prompt, so every line sees earlier bindings.
fn run_prompt() -> io::Result<()> {
    let stdin = io::stdin();
    let mut session = Session::new(io::stdout(), WriteReporter::new(io::stderr()));
    session.run_prompt(stdin.lock())
}
