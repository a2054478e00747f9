// Exit status -> single integer code

use std::process::ExitStatus;

/// Offset shells use for "terminated by signal N"
const SIGNAL_EXIT_BASE: i32 = 128;

/// Exit code of a finished child, `128 + signal` when killed by a signal
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_BASE + signal;
        }
    }
    SIGNAL_EXIT_BASE
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn test_normal_exit() {
        // Raw wait status: exit code in the high byte
        assert_eq!(exit_code_of(ExitStatus::from_raw(3 << 8)), 3);
        assert_eq!(exit_code_of(ExitStatus::from_raw(0)), 0);
    }

    #[test]
    fn test_killed_by_signal() {
        // SIGKILL
        assert_eq!(exit_code_of(ExitStatus::from_raw(9)), 137);
    }
}
