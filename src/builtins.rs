/// A builtin recognised by raw-line prefix match, before alias expansion or
/// parsing ever see the line.
///
/// Grounded on the source's inline `main()` dispatch (`buf[0] == '#'`,
/// `memcmp(exit_cmd, buf, 4)`, the `"alias "`/`"unalias "`/`"cd "` prefix
/// checks): these five forms are the entire builtin surface spec.md names,
/// unlike the teacher's general-purpose `pwd`/`echo`/`export`/`unset`/`type`
/// set, which falls outside this scope and is dropped.
#[derive(Debug, PartialEq, Eq)]
pub enum Builtin {
    /// A comment line (`#...`): ignored entirely.
    Comment,
    /// `exit`: initiate graceful shutdown.
    Exit,
    /// `alias NAME='VALUE'`.
    Alias { name: String, value: String },
    /// `unalias NAME`.
    Unalias { name: String },
    /// `cd TARGET`.
    Cd { target: String },
}

/// Classify `line` (without its trailing newline) as a builtin, or `None`
/// if it should be alias-expanded and parsed as an ordinary command.
pub fn classify(line: &str) -> Option<Builtin> {
    if line.starts_with('#') {
        return Some(Builtin::Comment);
    }
    if line == "exit" {
        return Some(Builtin::Exit);
    }
    if let Some(rest) = line.strip_prefix("alias ") {
        return parse_alias(rest);
    }
    if let Some(rest) = line.strip_prefix("unalias ") {
        let name = rest.trim();
        if name.is_empty() {
            return None;
        }
        return Some(Builtin::Unalias {
            name: name.to_string(),
        });
    }
    if let Some(rest) = line.strip_prefix("cd ") {
        return Some(Builtin::Cd {
            target: rest.trim().to_string(),
        });
    }
    None
}

/// `NAME` is delimited by the space after `alias` and the `=`; `VALUE` is
/// delimited by the first and last single quotes on the line, per spec.md
/// §6's alias syntax.
fn parse_alias(rest: &str) -> Option<Builtin> {
    let eq = rest.find('=')?;
    let name = rest[..eq].trim();
    if name.is_empty() {
        return None;
    }

    let after_eq = &rest[eq + 1..];
    let first_quote = after_eq.find('\'')?;
    let last_quote = after_eq.rfind('\'')?;
    if last_quote <= first_quote {
        return None;
    }
    let value = &after_eq[first_quote + 1..last_quote];

    Some(Builtin::Alias {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Resolve `target` (translating a bare `~` into `$HOME`) and `chdir` into
/// it. Matches spec.md §4.6: only an exact `~` is substituted, not a
/// `~/...` prefix (tilde-prefix expansion elsewhere in arguments is a
/// Non-goal).
pub fn cd(target: &str) -> std::io::Result<()> {
    let resolved = if target == "~" {
        std::env::var("HOME").unwrap_or_else(|_| target.to_string())
    } else {
        target.to_string()
    };
    std::env::set_current_dir(resolved)
}
