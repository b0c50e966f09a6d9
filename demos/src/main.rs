// SPDX-License-Identifier: Apache-2.0

//! Dump the skeleton of a JSON file, resolving every string span.

use std::fmt::{self, Write};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use skeljson::{
    ChunkReader, NeverCancel, Node, ParseError, SkeletonParser, DEFAULT_CHUNK_SIZE,
    DEFAULT_MAX_DEPTH,
};

#[derive(Parser, Debug)]
#[command(name = "skeljson-dump", version, about)]
struct Args {
    /// JSON file to parse
    file: PathBuf,

    /// Bytes scanned per tokenizer refill
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Maximum container nesting
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Only report success or failure
    #[arg(long, short)]
    quiet: bool,
}

/// 1-based line and column of a byte offset
fn line_column(data: &[u8], offset: usize) -> (usize, usize) {
    let upto = data.get(..offset).unwrap_or(data);
    let line = upto.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = upto.iter().rev().take_while(|&&b| b != b'\n').count() + 1;
    (line, column)
}

fn dump(data: &[u8], node: &Node, indent: usize, out: &mut String) -> fmt::Result {
    let pad = "  ".repeat(indent);
    match node {
        Node::String(span) => {
            let text = span.resolve_bytes(data).unwrap_or_default();
            writeln!(
                out,
                "{pad}\"{}\" @{}",
                String::from_utf8_lossy(text),
                span.start()
            )?;
        }
        Node::Object(object) => {
            writeln!(out, "{pad}{{ {} entries", object.len())?;
            for (key, value) in object {
                let key_text = key.resolve_bytes(data).unwrap_or_default();
                writeln!(out, "{pad}  \"{}\":", String::from_utf8_lossy(key_text))?;
                dump(data, value, indent + 2, out)?;
            }
            writeln!(out, "{pad}}}")?;
        }
        Node::Array(array) => {
            writeln!(out, "{pad}[ {} items", array.len())?;
            for item in array {
                dump(data, item, indent + 1, out)?;
            }
            writeln!(out, "{pad}]")?;
        }
        Node::Empty => writeln!(out, "{pad}<empty>")?,
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), String> {
    let data = fs::read(&args.file)
        .map_err(|e| format!("Unable to read file '{}': {e}", args.file.display()))?;
    log::info!("read {} bytes from {}", data.len(), args.file.display());

    let mut scratch = vec![0u8; args.chunk_size.max(1)];
    let root = SkeletonParser::new(ChunkReader::full_slice(&data), &mut scratch)
        .with_max_depth(args.max_depth)
        .parse(&NeverCancel)
        .map_err(|e: ParseError| match e.offset() {
            Some(offset) => {
                let (line, column) = line_column(&data, offset);
                format!("{}:{line}:{column}: {e}", args.file.display())
            }
            None => format!("{}: {e}", args.file.display()),
        })?;

    if !args.quiet {
        let mut out = String::new();
        dump(&data, &root, 0, &mut out).map_err(|e| format!("Unable to format tree: {e}"))?;
        print!("{out}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}
