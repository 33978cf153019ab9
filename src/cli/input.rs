//! Interactive keyboard input for `zensoul run`.
//!
//! Each stdin line becomes one [`SessionCommand`]. Single-letter keys
//! control the session; any other non-blank line is recorded as a
//! response to the current grounding prompt.

use std::io::BufRead;

use tokio::sync::mpsc;

use crate::session::SessionCommand;

/// Help line shown when a session starts.
pub const KEY_HELP: &str =
    "keys: [s]tart  [p]ause/resume  [n]ext  [b]ack  [g N] go to step  [r]eset  [q]uit";

/// Parses one line of user input.
///
/// Returns `None` for blank lines. Step numbers for `g N` are 1-based.
pub fn parse_line(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line.to_ascii_lowercase().as_str() {
        "s" | "start" => SessionCommand::Start,
        "p" | "pause" | "resume" => SessionCommand::Pause,
        "n" | "next" => SessionCommand::Next,
        "b" | "back" | "prev" => SessionCommand::Previous,
        "r" | "reset" => SessionCommand::Reset,
        "q" | "quit" | "exit" => SessionCommand::Quit,
        lower => match parse_goto(lower) {
            Some(target) => SessionCommand::GoTo(target),
            None => SessionCommand::Respond(line.to_string()),
        },
    };
    Some(command)
}

/// Forwards every parsed line from `reader` to the session.
///
/// Stops when the session hangs up or input ends. With `quit_on_eof` the
/// end of input also sends [`SessionCommand::Quit`], so piped input cannot
/// leave a session waiting forever.
pub fn forward_lines<R: BufRead>(
    reader: R,
    commands: &mpsc::UnboundedSender<SessionCommand>,
    quit_on_eof: bool,
) {
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if let Some(command) = parse_line(&line) {
            if commands.send(command).is_err() {
                return;
            }
        }
    }
    if quit_on_eof {
        let _ = commands.send(SessionCommand::Quit);
    }
}

fn parse_goto(line: &str) -> Option<isize> {
    let rest = line.strip_prefix("g ").or_else(|| line.strip_prefix("goto "))?;
    rest.trim().parse::<isize>().ok().map(|step| step - 1)
}
