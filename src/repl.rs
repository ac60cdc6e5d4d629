use std::io::{BufRead, Write};

use crate::Session;

/// Runs the interactive prompt until end of input.
///
/// Reads one line at a time, prompting with `> `, and runs each line against
/// a single [`Session`] so definitions persist between lines. Program output
/// shares the writer with the prompt; diagnostics go to stderr, and a failed
/// line does not end the loop.
///
/// The streams are injected rather than hard-wired to stdin/stdout, which is
/// also what makes the loop testable.
///
/// # Errors
/// Returns any I/O error raised by the underlying streams.
pub fn run<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> std::io::Result<()> {
    let mut session = Session::new(writer);
    let mut line = String::new();

    loop {
        write!(session.output(), "> ")?;
        session.output().flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            writeln!(session.output())?;
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        if let Err(e) = session.run(&line) {
            eprintln!("{e}");
        }
    }

    Ok(())
}
