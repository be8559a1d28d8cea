//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use btfgen_format::Endian;
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::emit::EmitArgs;

pub struct EmitParams {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub endian: Endian,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: m.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned(),
            endian: parse_endian(m),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        Self {
            input: p.input,
            output: p.output,
            endian: p.endian,
        }
    }
}

pub struct DumpParams {
    pub input: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: m.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_endian(m: &ArgMatches) -> Endian {
    match m.get_one::<String>("endian").map(|s| s.as_str()) {
        Some("big") => Endian::Big,
        Some("native") => Endian::native(),
        _ => Endian::Little,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
