use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use js_debundle_rs::{NameStyle, Options, beautify_file, unbundle_file};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Beautify scripts in place
    Beautify {
        #[arg(required = true)]
        scripts: Vec<PathBuf>,
        #[command(flatten)]
        flags: Flags,
    },
    /// Split a Browserify or Webpack bundle into one file per module
    Unbundle {
        script: PathBuf,
        target_dir: PathBuf,
        #[command(flatten)]
        flags: Flags,
        /// Write a JSON list of the written modules to this file
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}

#[derive(Args)]
struct Flags {
    /// Disable all modifications, reformat only
    #[arg(short = 'n', long)]
    no_mods: bool,
    /// Disable code rewriting
    #[arg(short = 'c', long)]
    no_code: bool,
    /// Disable variable name modification
    #[arg(short = 'v', long)]
    no_vars: bool,
    /// How generated variable names look
    #[arg(long, value_enum, default_value_t = Names::Dictionary)]
    names: Names,
}

#[derive(Clone, Copy, ValueEnum)]
enum Names {
    Dictionary,
    Phonetic,
}

impl Flags {
    fn options(&self, manifest: Option<PathBuf>) -> Options {
        Options {
            mods: !self.no_mods,
            code: !self.no_code,
            vars: !self.no_vars,
            name_style: match self.names {
                Names::Dictionary => NameStyle::Dictionary,
                Names::Phonetic => NameStyle::Phonetic,
            },
            manifest,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("js_debundle_rs=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Beautify { scripts, flags } => {
            let options = flags.options(None);
            let mut failed = 0usize;
            for script in &scripts {
                if let Err(e) = beautify_file(script, &options) {
                    eprintln!("{}: {}", script.display(), e);
                    failed += 1;
                }
            }
            if failed > 0 {
                return Err(format!("{failed} of {} scripts failed", scripts.len()).into());
            }
        }
        Command::Unbundle {
            script,
            target_dir,
            flags,
            manifest,
        } => {
            let options = flags.options(manifest);
            let written = unbundle_file(&script, &target_dir, &options)?;
            eprintln!(
                "{} modules written to {}",
                written.total_modules,
                target_dir.display()
            );
        }
    }
    Ok(())
}
