//! Command-line definitions for mcpgen.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mcpgen", about = "Generate complete MCP server projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a complete MCP server project from a tool list
    Generate(GenerateArgs),

    /// Validate a project name for package compatibility
    ValidateName {
        /// Project name to validate
        name: String,
    },

    /// Serve the generator's own tools over MCP on stdio
    Serve,

    /// Print version information
    Version,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Project name, e.g. my-mcp-server
    #[arg(long)]
    pub name: String,

    /// Project description
    #[arg(long)]
    pub description: String,

    /// Author name
    #[arg(long)]
    pub author: String,

    /// Author email
    #[arg(long)]
    pub email: String,

    /// JSON file with the tool declarations (array of tool objects)
    #[arg(long)]
    pub tools_file: PathBuf,

    /// Output directory; "." generates in place
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Package prefix: AUTO (detect from git), NONE, or a custom string
    #[arg(long, default_value = "AUTO")]
    pub prefix: String,

    /// Python version for the generated project; floored to 3.10
    #[arg(long)]
    pub python_version: Option<String>,

    /// Generate synchronous tool stubs instead of async
    #[arg(long)]
    pub sync: bool,
}
