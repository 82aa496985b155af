//! Matrixops CLI - integer matrix operations on CSV files
//!
//! # Commands
//!
//! ```bash
//! matrixops serve                       # Start HTTP server (port 3000)
//! matrixops run transpose matrix.csv    # Run one operation on a local file
//! matrixops formats                     # List accepted file formats
//! matrixops operations                  # List available operations
//! ```

use clap::{Parser, Subcommand};
use matrixops::{MatrixService, Operation, ServerConfig};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "matrixops")]
#[command(about = "Echo, transpose, flatten, sum or multiply integer matrices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Address to bind (default: MATRIXOPS_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on (default: MATRIXOPS_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run an operation on a matrix file
    Run {
        /// echo, transpose (or invert), flatten, sum, multiply
        operation: Operation,

        /// Input file; its extension selects the parser
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List accepted file formats
    Formats,

    /// List available operations
    Operations,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port } => cmd_serve(host, port).await,

        Commands::Run {
            operation,
            input,
            output,
        } => cmd_run(operation, &input, output.as_deref()),

        Commands::Formats => cmd_formats(),

        Commands::Operations => cmd_operations(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(host: Option<IpAddr>, port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    matrixops::server::start_server(config).await
}

fn cmd_run(
    operation: Operation,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = MatrixService::default();
    let result = service.run_file(input, operation)?;
    write_output(&result, output)?;
    Ok(())
}

fn cmd_formats() -> Result<(), Box<dyn std::error::Error>> {
    let service = MatrixService::default();
    for format in service.registry().formats() {
        println!("{}", format);
    }
    Ok(())
}

fn cmd_operations() -> Result<(), Box<dyn std::error::Error>> {
    for op in Operation::ALL {
        println!("{:<10} {}", op.name(), op.description());
    }
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
