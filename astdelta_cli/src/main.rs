use std::fs;
use std::path::PathBuf;

use astdelta_diff::{
    DiffError, DiffOptions, Side, diff_sources, format_html_summary, format_text_report,
};
use astdelta_ir::{ParseOptions, SourceKind};
use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "ast-diff")]
#[command(about = "Compare two source files structurally and print a change report")]
struct Cli {
    file_a: PathBuf,
    file_b: PathBuf,

    #[arg(long)]
    json: bool,

    #[arg(long)]
    html: bool,

    #[arg(long, value_enum, default_value_t = CliSourceKind::Module)]
    source_kind: CliSourceKind,

    #[arg(long, default_value_t = 2020)]
    syntax_version: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSourceKind {
    Module,
    Script,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let a_text = fs::read_to_string(&cli.file_a)?;
    let b_text = fs::read_to_string(&cli.file_b)?;

    let options = DiffOptions {
        parse: ParseOptions {
            syntax_version: cli.syntax_version,
            source_kind: match cli.source_kind {
                CliSourceKind::Module => SourceKind::Module,
                CliSourceKind::Script => SourceKind::Script,
            },
        },
    };

    let outcome = match diff_sources(&a_text, &b_text, options) {
        Ok(outcome) => outcome,
        Err(err) => {
            let DiffError::Parse { side, .. } = &err;
            let file = match side {
                Side::Left => &cli.file_a,
                Side::Right => &cli.file_b,
            };
            return Err(format!("{}: {err}", file.display()).into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if cli.html {
        println!("{}", format_html_summary(&outcome.report));
    } else {
        println!(
            "{}",
            format_text_report(
                &outcome,
                &cli.file_a.display().to_string(),
                &cli.file_b.display().to_string(),
            )
        );
    }

    Ok(())
}
