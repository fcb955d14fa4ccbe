pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use self::commands::{check, compile, parse};

#[derive(Parser)]
#[command(name = "minnow")]
#[command(about = "Minnow compiler CLI", version, author)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a Minnow file and output the JSON representation of the AST
    Parse {
        /// The input Minnow file to parse
        #[arg(required = true)]
        input: PathBuf,

        /// The output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Type check a Minnow file without generating code
    Check {
        /// The input Minnow file to check
        #[arg(required = true)]
        input: PathBuf,

        /// Pretty-print the symbol table after a successful check
        #[arg(long, default_value_t = false)]
        table: bool,
    },

    /// Compile a Minnow file to 32-bit x86 assembly
    Compile {
        /// The input Minnow file to compile
        #[arg(required = true)]
        input: PathBuf,

        /// The output assembly file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { input, output } => parse::execute(input, output),
        Commands::Check { input, table } => check::execute(input, table),
        Commands::Compile { input, output } => compile::execute(input, output),
    }
}
