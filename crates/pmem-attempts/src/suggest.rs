//! Alternative-approach hints derived from what already failed.

use pmem_core::Attempt;

use crate::lookup::get_failed_attempts;

pub const SUGGEST_POWERSHELL: &str =
    "Try a PowerShell equivalent of the shell command for Windows compatibility.";
pub const SUGGEST_BASH: &str =
    "Try a bash/sh equivalent of the PowerShell command for macOS and Linux compatibility.";
pub const SUGGEST_NODE: &str =
    "Try a cross-platform Node.js script (node/npx) instead of a shell-specific command.";
pub const SUGGEST_SHELL: &str =
    "Try a native shell command instead of a Node.js script to rule out the runtime.";
pub const SUGGEST_INSTALL: &str =
    "Check that the command or package is installed and on PATH.";
pub const SUGGEST_PERMISSIONS: &str =
    "Check file permissions or retry with elevated permissions.";
pub const SUGGEST_QUOTING: &str = "Quote file paths; paths containing spaces break unquoted commands.";
pub const SUGGEST_TIMEOUT: &str =
    "Increase the timeout or split the operation into smaller chunks.";

#[derive(Debug, Default)]
struct RuntimeUse {
    shell: bool,
    powershell: bool,
    node: bool,
}

impl RuntimeUse {
    fn scan(text: &str) -> Self {
        Self {
            shell: text.contains("bash") || text.contains("sh "),
            powershell: text.contains("powershell"),
            node: text.contains("node ") || text.contains("npx "),
        }
    }

    fn merge(&mut self, other: Self) {
        self.shell |= other.shell;
        self.powershell |= other.powershell;
        self.node |= other.node;
    }
}

/// Suggestions for the next attempt at `issue`, from its failed attempts'
/// commands and errors. Each suggestion appears once, in first-trigger order.
pub fn suggest_alternatives(issue: &str, attempts: &[Attempt]) -> Vec<String> {
    let failed = get_failed_attempts(issue, attempts);
    let mut out: Vec<&'static str> = Vec::new();
    let mut push = |s: &'static str| {
        if !out.contains(&s) {
            out.push(s);
        }
    };

    let mut runtimes = RuntimeUse::default();
    for attempt in &failed {
        let mut text = attempt.code_or_command.clone().unwrap_or_default();
        text.push(' ');
        text.push_str(attempt.error_message.as_deref().unwrap_or_default());
        runtimes.merge(RuntimeUse::scan(&text.to_lowercase()));
    }
    if runtimes.shell && !runtimes.powershell {
        push(SUGGEST_POWERSHELL);
    }
    if runtimes.powershell && !runtimes.shell {
        push(SUGGEST_BASH);
    }
    if (runtimes.shell || runtimes.powershell) && !runtimes.node {
        push(SUGGEST_NODE);
    }
    if runtimes.node && !runtimes.shell && !runtimes.powershell {
        push(SUGGEST_SHELL);
    }

    for attempt in &failed {
        let Some(error) = attempt.error_message.as_deref() else {
            continue;
        };
        let error = error.to_lowercase();
        if error.contains("not found") {
            push(SUGGEST_INSTALL);
        }
        if error.contains("permission") {
            push(SUGGEST_PERMISSIONS);
        }
        if error.contains("path") || error.contains("space") {
            push(SUGGEST_QUOTING);
        }
        if error.contains("timeout") {
            push(SUGGEST_TIMEOUT);
        }
    }

    out.into_iter().map(str::to_string).collect()
}
