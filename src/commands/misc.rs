//! Miscellaneous commands: shell completions

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use shopcat::cli::{Cli, CompletionShell};
use shopcat::error::Result;

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "shopcat", &mut io::stdout());
    Ok(())
}
