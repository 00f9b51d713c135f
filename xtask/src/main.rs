//! Build automation tasks for the freight matrix workspace
//!
//! Currently generates the CLI reference from the clap definitions.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for freight matrix", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<freight_cli::Cli>();

    let content = format!(
        r#"# Freight Matrix CLI Reference

Generated from the CLI source code on {}.

`freight` validates freight-matrix files (SKU, postcode, price) from CSV,
JSON/NDJSON or pasted CSV text, and exports the valid records as batched
CSV and/or JSON files.

## Quick Start

```bash
# Check a file
freight preview rates.csv

# Summary as JSON
freight stats rates.json --json

# Export in files of 5000 rows, CSV and JSON
freight export rates.csv --csv --rows 5000 --out ./export

# One file per postcode
freight export rates.csv --group postcode

# Pasted text
pbpaste | freight preview --stdin
```

## Settings

Settings are stored as JSON in the user config directory
(`freight-matrix/settings.json`), or at the path given by `--config` /
`FREIGHT_CONFIG`. Export flags override them for a single run.

```bash
freight config show
freight config set batch.rows_per_file 2500
freight config set export.formats.csv true
freight config reset
```

## Environment Variables

- `FREIGHT_CONFIG` - Settings file path
- `FREIGHT_LOG_LEVEL` - Log level (`trace`, `debug`, `info`, `warn`, `error`)
- `FREIGHT_LOG_OUTPUT` - `console`, `file` or `both`
- `FREIGHT_LOG_FORMAT` - `text` or `json`
- `FREIGHT_LOG_DIR` - Directory for log files
- `FREIGHT_LOG_FILTER` - Extra filter directives (e.g. `freight_pipeline=trace`)

## Commands

{}

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
