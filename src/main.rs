mod alias;
mod ast;
mod builtins;
mod editor;
mod executor;
mod history;
mod parser;
mod status;
mod terminal;

use alias::AliasTable;
use builtins::Builtin;
use editor::{format_prompt, Line, LineEditor};
use history::History;

/// Current working directory, refreshed after every successful `cd`. Kept
/// as a cached `String` rather than calling `getcwd` on every prompt, the
/// same caching the source's `main()` does around its `pwd` buffer.
fn refresh_cwd() -> String {
    std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn main() {
    let mut aliases = AliasTable::new();
    let mut history = History::new();
    let mut editor = LineEditor::new();

    let home = std::env::var("HOME").ok();
    let mut cwd = refresh_cwd();

    loop {
        let prompt = format_prompt(&cwd, home.as_deref());

        let line = match editor.read_line(&prompt, &mut history) {
            Ok(Line::Text(line)) => line,
            Ok(Line::EndOfInput) => {
                // Graceful shutdown: the tty's attributes are already
                // restored by `RawModeGuard`'s `Drop` inside `read_line`.
                std::process::exit(0);
            }
            Err(err) => {
                eprintln!("jsh: {err}");
                std::process::exit(1);
            }
        };

        history.push(&line);

        match builtins::classify(&line) {
            Some(Builtin::Comment) => continue,
            Some(Builtin::Exit) => std::process::exit(0),
            Some(Builtin::Alias { name, value }) => {
                aliases.add(&name, &value);
                continue;
            }
            Some(Builtin::Unalias { name }) => {
                aliases.remove(&name);
                continue;
            }
            Some(Builtin::Cd { target }) => {
                match builtins::cd(&target) {
                    Ok(()) => cwd = refresh_cwd(),
                    Err(_) => eprintln!("cannot cd {target}"),
                }
                continue;
            }
            None => {}
        }

        let expanded = aliases.expand(&line);
        match parser::parse(&expanded) {
            Ok(cmd) => executor::fork_and_run(&cmd),
            Err(err) => eprintln!("{err}"),
        }
    }
}
