use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use opath::format::Format;
use opath::output;
use opath::source;

#[derive(Parser)]
#[command(
    name = "opath",
    version,
    about = "Resolve a dot-path expression against a JSON/YAML/TOML document"
)]
struct Cli {
    /// Path expression (default: "." returns the whole document)
    #[arg(default_value = ".")]
    path: String,

    /// Input file (reads from stdin if omitted)
    file: Option<PathBuf>,

    /// Force input format [json, yaml, toml]
    #[arg(short = 'p', long = "input-format")]
    input_format: Option<String>,

    /// Output format [json, yaml, toml] (default: json)
    #[arg(short, long = "output-format")]
    output_format: Option<String>,

    /// Compact output (no pretty printing)
    #[arg(short, long)]
    compact: bool,

    /// Raw string output (no quotes for string values)
    #[arg(short, long)]
    raw: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let in_fmt = match &cli.input_format {
        Some(f) => Format::from_str_name(f)?,
        None => match &cli.file {
            Some(path) => Format::from_extension(path)?,
            None => detect_format(&input),
        },
    };

    let out_fmt = match &cli.output_format {
        Some(f) => Format::from_str_name(f)?,
        None => Format::Json,
    };

    let root = source::load(&input, in_fmt)?;
    let result = opath::resolve_path(&root, &cli.path)?;

    let formatted = output::pretty::format_value(&result, out_fmt, cli.compact, cli.raw)?;
    print!("{formatted}");
    if !formatted.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Guess the format from content when reading stdin without a flag.
fn detect_format(input: &str) -> Format {
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        Format::Json
    } else {
        // YAML also covers most plain text documents
        Format::Yaml
    }
}
