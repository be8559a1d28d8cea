use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use btfgen_compiler::{EmitOptions, TypeGraph, emit};
use btfgen_format::Endian;

use super::input::{self, Input};

pub struct EmitArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub endian: Endian,
}

pub fn run(args: EmitArgs) -> Result<()> {
    let bytes = translate(&args)?;

    match &args.output {
        Some(path) => std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Load, translate and serialize, without touching the output.
pub fn translate(args: &EmitArgs) -> Result<Vec<u8>> {
    let parsed = match input::load(&args.input)? {
        Input::Tree(parsed) => parsed,
        Input::Blob(_) => bail!("{} is already a BTF blob", args.input.display()),
    };

    let graph = TypeGraph::build(&parsed.tree, &parsed.roots)?;
    let diagnostics = graph.diagnostics();
    tracing::info!(
        units = parsed.roots.len(),
        types = graph.len(),
        strings = graph.strings().len(),
        diagnostics = diagnostics.len(),
        "translated"
    );

    let options = EmitOptions {
        endian: args.endian,
    };
    Ok(emit(&graph, &options)?)
}
