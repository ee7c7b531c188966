use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

/// Write a completion script for `shell` to `out`
pub fn write_completions<W: Write>(shell: Shell, cmd: &mut Command, out: &mut W) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Print a completion script for `shell` to stdout
pub fn print_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut io::stdout());
}
