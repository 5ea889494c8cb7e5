//! `musrepo completions <shell>` – print a completion script to stdout.

use clap_complete::{generate, Shell};

pub fn run_completions(shell: Shell, cmd: &mut clap::Command) {
    generate(shell, cmd, "musrepo", &mut std::io::stdout());
}
