/// Decode a raw `waitpid` status into a shell-style exit code: the
/// process's own exit code if it exited normally, or `128 + signal` if it
/// was killed by a signal. `None` for a status that is neither (e.g. a stop
/// notification, which this shell never requests — no `WUNTRACED`).
pub fn exit_code_from_wait_status(raw_status: libc::c_int) -> Option<i32> {
    if unsafe { libc::WIFEXITED(raw_status) } {
        return Some(unsafe { libc::WEXITSTATUS(raw_status) });
    }

    if unsafe { libc::WIFSIGNALED(raw_status) } {
        let signal = unsafe { libc::WTERMSIG(raw_status) };
        return Some(128 + signal);
    }

    None
}
