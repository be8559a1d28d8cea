use std::path::PathBuf;

use anyhow::Result;
use btfgen_compiler::TypeGraph;
use btfgen_core::Colors;
use btfgen_format::{BtfModule, dump};

use super::input::{self, Input};

pub struct DumpArgs {
    pub input: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) -> Result<()> {
    print!("{}", render(&args)?);
    Ok(())
}

pub fn render(args: &DumpArgs) -> Result<String> {
    let colors = Colors::new(args.color);
    let text = match input::load(&args.input)? {
        Input::Blob(bytes) => {
            let module = BtfModule::from_bytes(&bytes)?;
            dump(&module, colors)
        }
        Input::Tree(parsed) => {
            let graph = TypeGraph::build(&parsed.tree, &parsed.roots)?;
            graph.dump(colors)?
        }
    };
    Ok(text)
}
