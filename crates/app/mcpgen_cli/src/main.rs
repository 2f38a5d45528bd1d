// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands, GenerateArgs};

use mcpgen_core::identity::GitIdentity;
use mcpgen_core::models::{PrefixMode, ProjectRequest, Severity, ToolSpec};
use mcpgen_core::templates::BuiltinTemplates;
use mcpgen_core::{naming, plan, writer};

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    let args = Cli::parse();

    match &args.command {
        Commands::Generate(generate_args) => {
            logging::init()?;
            generate(generate_args)?;
        }
        Commands::ValidateName { name } => {
            logging::init()?;
            naming::validate_project_name(name)?;
            println!("{name} is a valid project name");
        }
        Commands::Serve => {
            // Stdout carries the MCP protocol; log to stderr.
            logging::init_stderr()?;
            serve()?;
        }
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let tools_json = std::fs::read_to_string(&args.tools_file)?;
    let tools: Vec<ToolSpec> = serde_json::from_str(&tools_json)?;

    let (prefix_mode, custom_prefix) = PrefixMode::parse_flag(&args.prefix);
    let request = ProjectRequest {
        project_name: args.name.clone(),
        description: args.description.clone(),
        author: args.author.clone(),
        email: args.email.clone(),
        tools,
        prefix_mode,
        custom_prefix,
        async_enabled: !args.sync,
        python_version: args.python_version.clone(),
    };

    let generation_plan = plan::build(&request, &GitIdentity, &BuiltinTemplates)?;

    for notice in &generation_plan.notices {
        log::info!("{notice}");
    }
    for finding in &generation_plan.warnings {
        let severity = match finding.severity {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
        };
        log::warn!(
            "[{severity}] tool {:?} matched {:?}: {}",
            finding.tool_name,
            finding.matched_pattern,
            finding.recommendation
        );
    }

    // "." means in-place generation; anything else gets a subdirectory.
    let project_dir = if args.output_dir == std::path::Path::new(".") {
        None
    } else {
        Some(naming::normalize(&request.project_name))
    };
    let report = writer::write_plan(&generation_plan, &args.output_dir, project_dir.as_deref())?;

    println!(
        "Generated project at {} ({} files)",
        report.project_path.display(),
        report.files_created.len()
    );
    for file in &report.files_created {
        println!("  {file}");
    }
    for file in &report.files_merged {
        println!("  {file} (merged into existing file)");
    }

    Ok(())
}

fn serve() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime
        .block_on(mcpgen_mcp::serve_stdio())
        .map_err(|e| Error::Custom(e.to_string()))
}
