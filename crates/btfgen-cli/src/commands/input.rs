//! Loading command inputs: a JSON tree or an already-built BTF blob.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use btfgen_core::{ParsedTree, parse_tree};
use btfgen_format::Header;

/// What an input file turned out to contain.
#[derive(Debug)]
pub enum Input {
    Tree(ParsedTree),
    Blob(Vec<u8>),
}

/// Read `path` (`-` for stdin) and sniff its content.
///
/// Anything starting with the BTF magic in either byte order is a blob;
/// everything else is parsed as a JSON tree.
pub fn load(path: &Path) -> Result<Input> {
    let bytes = read_bytes(path)?;
    classify_bytes(bytes).with_context(|| format!("failed to load {}", path.display()))
}

pub fn classify_bytes(bytes: Vec<u8>) -> Result<Input> {
    if Header::detect_endian(&bytes).is_some() {
        return Ok(Input::Blob(bytes));
    }
    let text = String::from_utf8(bytes).context("input is neither BTF nor UTF-8 text")?;
    let parsed = parse_tree(&text)?;
    Ok(Input::Tree(parsed))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
