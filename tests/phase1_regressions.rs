use std::io::Write;
use std::process::{Command, Stdio};

fn run_shell(lines: &[&str]) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jsh"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn jsh");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        for line in lines {
            writeln!(stdin, "{line}").expect("write line");
        }
        writeln!(stdin, "exit").expect("write exit");
    }

    child.wait_with_output().expect("wait output")
}

/// spec.md §8 scenario 1: `echo hello | wc -c` writes `6\n`.
#[test]
fn pipe_feeds_stdout_into_next_command() {
    let output = run_shell(&["echo hello | wc -c"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('6'), "stdout was: {stdout}");
}

/// spec.md §8 scenario 2: `echo a; echo b` writes `a\nb\n` in order.
#[test]
fn list_runs_left_then_right_in_order() {
    let output = run_shell(&["echo a; echo b"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let a_pos = stdout.find('a').expect("a in stdout");
    let b_pos = stdout.find('b').expect("b in stdout");
    assert!(a_pos < b_pos, "stdout was: {stdout}");
}

/// spec.md §8 scenario 3: redirect out then back in via a real file.
#[test]
fn redirect_round_trips_through_a_file() {
    let path = std::env::temp_dir().join(format!("jsh_redirect_{}.txt", std::process::id()));
    let path_str = path.display().to_string();

    let output = run_shell(&[
        &format!("echo out > {path_str}"),
        &format!("cat < {path_str}"),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("out"), "stdout was: {stdout}");

    let _ = std::fs::remove_file(&path);
}

/// spec.md §8 scenario 4: an alias expands to its replacement before the
/// command word that follows it.
#[test]
fn alias_expands_at_command_start() {
    let output = run_shell(&["alias say='echo'", "say hi-from-alias"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hi-from-alias"), "stdout was: {stdout}");
}

/// spec.md §8 scenario 6: a dangling pipe is a syntax error, and the shell
/// keeps running afterward.
#[test]
fn trailing_pipe_is_a_syntax_error_and_shell_survives() {
    let output = run_shell(&["echo |", "echo still-alive"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stderr.contains("syntax error"), "stderr was: {stderr}");
    assert!(stdout.contains("still-alive"), "stdout was: {stdout}");
}

/// spec.md §8 scenario 7: EOF on an empty prompt exits 0.
#[test]
fn eof_on_empty_prompt_exits_cleanly() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jsh"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn jsh");
    drop(child.stdin.take());

    let output = child.wait_with_output().expect("wait output");
    assert!(output.status.success(), "status was: {:?}", output.status);
}

/// Unknown commands fail with the exact diagnostic spec.md §4.5 prescribes,
/// and the shell keeps accepting further input.
#[test]
fn unknown_command_reports_could_not_be_completed() {
    let output = run_shell(&["this-command-does-not-exist-xyz", "echo after"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stderr.contains("couldn't be completed"),
        "stderr was: {stderr}"
    );
    assert!(stdout.contains("after"), "stdout was: {stdout}");
}

/// More than MAXARGS words in one exec is a parse-time fatal error.
#[test]
fn too_many_args_is_reported() {
    let words: Vec<String> = (0..11).map(|i| i.to_string()).collect();
    let line = format!("echo {}", words.join(" "));
    let output = run_shell(&[&line]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("too many args"), "stderr was: {stderr}");
}
