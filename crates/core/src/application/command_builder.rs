// Command Builder - raw command string to argument vector

use crate::domain::ArgumentVector;

/// Split `raw_command` on spaces and append `shared_file` when non-empty
///
/// No quoting or escaping: `grep "a b"` yields `["grep", "\"a", "b\""]`.
/// Runs of spaces do not produce empty tokens. A blank command yields an
/// empty vector (plus the file, if any); callers must catch blank commands
/// before building.
pub fn build(raw_command: &str, shared_file: &str) -> ArgumentVector {
    let mut tokens: Vec<String> = raw_command
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if !shared_file.is_empty() {
        tokens.push(shared_file.to_string());
    }
    ArgumentVector::new(tokens)
}
