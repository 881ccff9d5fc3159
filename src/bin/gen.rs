//! georange-gen: CLI tool for building and querying binary range databases.

use clap::{Parser, Subcommand};
use georange::{binary, Database, MemoryIndex};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "georange-gen")]
#[command(version = "0.1.0")]
#[command(about = "Build and query IPv4 geolocation range databases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a geolocation CSV dump to the binary format
    Convert {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output binary file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Look up a single address in a binary database
    Lookup {
        /// Binary database file
        #[arg(short, long)]
        database: PathBuf,

        /// Dotted-quad IPv4 address
        ip: String,
    },

    /// Serve LOAD/LOOKUP/EXIT commands over stdin against a CSV file
    Serve {
        /// Input CSV file, loaded on the LOAD command
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { input, output } => binary::build(&input, &output),
        Commands::Lookup { database, ip } => lookup(&database, &ip),
        Commands::Serve { input } => serve(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn lookup(database: &PathBuf, ip: &str) -> georange::Result<()> {
    let db = Database::open(database)?;
    match db.lookup_str(ip) {
        Some(label) => println!("{}", label),
        None => println!("no match"),
    }
    Ok(())
}

/// Line-oriented command loop over stdin.
///
/// Prints `READY`, then answers `LOAD` with `OK`/`ERR`, `LOOKUP <ip>` with
/// the label or `ERR`, and `EXIT` with `OK`. Failures never distinguish
/// error kinds on this surface; they are all a generic negative signal.
fn serve(input: &PathBuf) -> georange::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut index: Option<MemoryIndex> = None;

    writeln!(out, "READY")?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let cmd = line.trim_end();

        if cmd.starts_with("LOAD") {
            match MemoryIndex::load_csv(input) {
                Ok(idx) => {
                    index = Some(idx);
                    writeln!(out, "OK")?;
                }
                Err(e) => {
                    log::error!("load failed: {}", e);
                    writeln!(out, "ERR")?;
                }
            }
        } else if let Some(ip) = cmd.strip_prefix("LOOKUP ") {
            let Some(index) = index.as_ref() else {
                eprintln!("error: lookup requested before database was loaded");
                std::process::exit(1);
            };
            match index.lookup_str(ip.trim()) {
                Some(label) => writeln!(out, "{}", label)?,
                None => writeln!(out, "ERR")?,
            }
        } else if cmd.starts_with("EXIT") {
            writeln!(out, "OK")?;
            out.flush()?;
            break;
        } else {
            eprintln!("error: unknown command received");
            std::process::exit(1);
        }

        out.flush()?;
    }

    Ok(())
}
