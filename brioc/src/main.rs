mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::path::PathBuf;
use std::rc::Rc;

use brio_core::{
    eval::prelude::interpret_from_stream,
    parser::prelude::parse_program,
    utils::prelude::{ConsoleOutputEmitterIO, Error},
};
use clap::Parser;
use cli::{print_finished, print_running};

#[derive(Parser)]
enum Command {
    /// Parses and evaluates a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the parsed program instead of evaluating it
        #[arg(long, default_value_t = false)]
        print_ast: bool,
        /// Print the value of the program's final statement
        #[arg(short, long, default_value_t = false)]
        print_result: bool,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
}

fn main() {
    let _ = ctrlc::set_handler(|| std::process::exit(0));

    match Command::parse() {
        Command::Run { path, print_ast, print_result } => {
            let buf_writer = cli::stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            print_running(path.to_str().unwrap_or_default());
            let start = std::time::Instant::now();

            match run(path, print_ast, print_result) {
                Ok(()) => {
                    print_finished(std::time::Instant::now() - start);
                },
                Err(err) => {
                    err.pretty(&mut buf);
                    buf_writer
                        .print(&buf)
                        .expect("Writing error to stderr");

                    std::process::exit(1);
                }
            }
        },
        Command::Repl => {
            let _ = repl::start();
        },
        Command::Rlpl => {
            let _ = rlpl::start();
        },
        Command::Rppl => {
            let _ = rppl::start();
        }
    }
}

fn run(path: PathBuf, print_ast: bool, print_result: bool) -> Result<(), Error> {
    if print_ast {
        let src = std::fs::read_to_string(path.clone())
            .map_err(|err| Error::StdIo { err: err.kind() })?;

        match parse_program(&src) {
            Ok(program) => println!("{program:#?}"),
            Err(error) => return Err(Error::Parse { path, src, error })
        }

        return Ok(());
    }

    let value = interpret_from_stream(path, Rc::new(ConsoleOutputEmitterIO))?;

    if print_result {
        println!("{value}");
    }

    Ok(())
}
