/// Maximum number of words a single `Exec` node may carry.
///
/// Exceeding this at parse time is a fatal syntax error (`SyntaxError::TooManyArgs`).
pub const MAXARGS: usize = 10;

/// Capacity of one logical input line, including its trailing newline.
pub const CMD_LEN: usize = 150;

/// Which end of a redirection a file is opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `<` — the file is opened read-only and attached to fd 0.
    In,
    /// `>` — the file is opened write-only (create, truncate) and attached to fd 1.
    Out,
}

impl Direction {
    /// The fd a redirection of this direction always targets.
    ///
    /// Invariant (spec): `target_fd = 0` iff `direction = In`, else `1`.
    pub fn target_fd(self) -> i32 {
        match self {
            Direction::In => 0,
            Direction::Out => 1,
        }
    }
}

/// A parsed command tree node.
///
/// Ownership of subtrees is single-parent; there is no sharing. This is the
/// Rust rendering of the source's tagged `struct cmd` hierarchy
/// (`execcmd`/`redircmd`/`pipecmd`/`listcmd`/`backcmd`) as a closed sum type.
#[derive(Debug, Clone)]
pub enum Command {
    /// A single program invocation. `argv` is non-empty once the node is
    /// reached by the executor; an empty `argv` (possible only as the
    /// degenerate root of an empty line) is a no-op that exits 0.
    Exec { argv: Vec<String> },
    /// Wraps `child` with one redirection of `path` opened per `direction`
    /// and attached to `direction.target_fd()`.
    Redir {
        child: Box<Command>,
        path: String,
        direction: Direction,
    },
    /// `left | right` — left's stdout feeds right's stdin.
    Pipe { left: Box<Command>, right: Box<Command> },
    /// `left ; right` — left runs to completion, then right.
    List { left: Box<Command>, right: Box<Command> },
    /// `child &` — runs detached from the waiting parent.
    Back { child: Box<Command> },
}

/// Parse-time fatal errors, matching spec.md's error table verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Unexpected leftover text after the top-level `list` production.
    Leftovers(String),
    /// A redirection operator (`<` or `>`) was not followed by a WORD.
    MissingRedirectionTarget,
    /// A single `exec` node accumulated more than `MAXARGS` words.
    TooManyArgs,
    /// The tokenizer produced an operator where a command word was expected.
    Unexpected,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::Leftovers(rest) => write!(f, "leftovers: {rest}"),
            SyntaxError::MissingRedirectionTarget => write!(f, "missing file for redirection"),
            SyntaxError::TooManyArgs => write!(f, "too many args"),
            SyntaxError::Unexpected => write!(f, "syntax error"),
        }
    }
}

impl std::error::Error for SyntaxError {}
