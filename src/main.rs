use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sql_source_tables::{run_extract, ExtractOptions};

#[derive(Parser)]
#[command(name = "sql-source-tables")]
#[command(author, version, about = "Fast source-table extractor for Hive-family SQL scripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every table the given SQL reads from or writes to
    Extract {
        /// Paths to SQL script files
        files: Vec<PathBuf>,

        /// Inline SQL text to analyze
        #[arg(short, long)]
        sql: Option<String>,

        /// Base64-encoded script content, as upload front-ends send it
        #[arg(long)]
        base64: Option<String>,

        /// Join names with commas instead of newlines
        #[arg(long)]
        comma: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            files,
            sql,
            base64,
            comma,
            verbose,
        } => {
            let options = ExtractOptions {
                files,
                sql,
                base64,
                separator: if comma { ", " } else { "\n" }.to_string(),
                verbose,
            };

            println!("{}", run_extract(options)?);
        }
    }

    Ok(())
}
