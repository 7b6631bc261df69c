use std::io::Write;
use std::rc::Rc;

use brio_core::{
    environment::prelude::global_environment,
    eval::prelude::Evaluator,
    parser::prelude::parse_program,
    utils::prelude::ConsoleOutputEmitterIO,
};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
    let stdin = std::io::stdin();

    // One environment for the whole session, so bindings carry over
    // from line to line.
    let env = global_environment();
    let evaluator = Evaluator::new(Rc::new(ConsoleOutputEmitterIO));

    loop {
        let mut input = String::from("");

        print!("{}", PROMPT);
        std::io::stdout().flush()?;
        stdin.read_line(&mut input)?;

        if let Some('\n') = input.chars().next_back() {
            input.pop();
        }
        if let Some('\r') = input.chars().next_back() {
            input.pop();
        }

        match input.as_str() {
            "" => {},
            ".exit" => return Ok(()),
            _ => {
                let program = match parse_program(&input) {
                    Ok(program) => program,
                    Err(err) => {
                        let (message, messages) = err.details();

                        println!("Parse error: {}.\n\t{}", message, messages.join(";\n\t"));
                        continue;
                    }
                };

                match evaluator.eval_program(&program, &env) {
                    Ok(value) => println!("{value}"),
                    Err(err) => println!("Runtime error: {}", err.error)
                }
            }
        }
    }
}
