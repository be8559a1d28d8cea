//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("btfgen")
        .about("Translate debug-information trees to BTF")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(emit_command())
        .subcommand(dump_command())
}

/// Build BTF from a JSON tree.
pub fn emit_command() -> Command {
    Command::new("emit")
        .about("Translate a JSON debug-info tree into a BTF blob")
        .after_help(
            r#"EXAMPLES:
  btfgen emit tree.json -o out.btf        # little-endian blob
  btfgen emit tree.json --endian big > x  # big-endian blob to stdout"#,
        )
        .arg(input_arg())
        .arg(output_arg())
        .arg(endian_arg())
}

/// Dump a tree (translated first) or a BTF blob.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the BTF for a JSON tree or an existing blob")
        .after_help(
            r#"EXAMPLES:
  btfgen dump tree.json           # translate, then dump
  btfgen dump out.btf --color=never"#,
        )
        .arg(input_arg())
        .arg(color_arg())
}
