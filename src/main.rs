use std::{
    fs,
    io,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, error::ErrorKind};
use log::debug;
use quill::{ScriptError, Session, repl};

/// quill is a small, dynamically-typed scripting language with lexical
/// scoping and first-class functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to run. Starts the interactive prompt when omitted.
    script: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::try_parse().unwrap_or_else(|e| {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            let _ = e.print();
            process::exit(0);
        }
        eprintln!("{e}");
        process::exit(64);
    });

    let code = match args.script {
        Some(path) => run_file(&path),
        None => run_prompt(),
    };
    process::exit(code);
}

/// Runs a script file once and maps the outcome onto the exit-code
/// contract: 0 on success, 65 for scan/parse errors, 70 for runtime errors.
fn run_file(path: &Path) -> i32 {
    debug!("running script {}", path.display());

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to read '{}': {e}", path.display());
            return 64;
        },
    };
    let source = String::from_utf8_lossy(&bytes);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new(&mut out);

    match session.run(&source) {
        Ok(()) => 0,
        Err(ScriptError::Syntax(errors)) => {
            for error in &errors {
                eprintln!("{error}");
            }
            65
        },
        Err(ScriptError::Runtime(error)) => {
            eprintln!("{error}");
            70
        },
    }
}

/// Runs the interactive prompt on the process streams.
fn run_prompt() -> i32 {
    let stdin = io::stdin();
    let stdout = io::stdout();

    match repl::run(&mut stdin.lock(), &mut stdout.lock()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e}");
            1
        },
    }
}
