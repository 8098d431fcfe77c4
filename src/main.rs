use brkpt::bkpt::{AccessKind, BreakpointError, BreakpointList};
use brkpt::mem::{CpuType, MemoryType};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

//===========================================================================//

#[derive(Parser)]
#[clap(author, about, long_about = None, version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lists the breakpoints defined in a breakpoint script.
    Describe {
        /// The breakpoint script to read.
        script: PathBuf,
    },
    /// Encodes a script's active breakpoints for the debugging engine.
    Export {
        /// The breakpoint script to read.
        script: PathBuf,
        /// The file to write the export records to.
        output: PathBuf,
    },
    /// Finds the breakpoint (if any) that a memory access would trigger.
    Match {
        /// The breakpoint script to read.
        script: PathBuf,
        /// The memory type being accessed (e.g. `prg_rom`).
        #[clap(value_parser = parse_memory_type)]
        memory: MemoryType,
        /// The address being accessed (e.g. `$8000`).
        #[clap(value_parser = parse_address)]
        address: u32,
        /// The CPU making the access.
        #[clap(long, value_parser = parse_cpu_type)]
        cpu: Option<CpuType>,
        /// The kind of access.
        #[clap(long, value_enum, default_value = "exec")]
        kind: Kind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Read,
    Write,
    Exec,
}

impl From<Kind> for AccessKind {
    fn from(kind: Kind) -> AccessKind {
        match kind {
            Kind::Read => AccessKind::Read,
            Kind::Write => AccessKind::Write,
            Kind::Exec => AccessKind::Exec,
        }
    }
}

//===========================================================================//

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Describe { script } => {
            let list = load_script(&script)?;
            for (index, breakpoint) in list.iter().enumerate() {
                let mut line = format!(
                    "{index:>3}  {}  {}",
                    breakpoint.describe_type(),
                    breakpoint.describe_address()
                );
                if !breakpoint.enabled {
                    line.push_str("  (disabled)");
                }
                if breakpoint.mark_event {
                    line.push_str("  (mark)");
                }
                if !breakpoint.condition.is_empty() {
                    line.push_str("  if ");
                    line.push_str(&breakpoint.condition);
                }
                println!("{line}");
            }
        }
        Command::Export { script, output } => {
            let list = load_script(&script)?;
            let mut writer = io::BufWriter::new(File::create(&output)?);
            match list.write_records(&mut writer) {
                Ok(count) => {
                    writer.flush()?;
                    log::info!(
                        "wrote {count} breakpoint(s) to {}",
                        output.display()
                    );
                }
                Err(BreakpointError::Io(error)) => return Err(error),
                Err(error) => {
                    eprintln!("{}: {error}", script.display());
                    std::process::exit(1);
                }
            }
        }
        Command::Match { script, memory, address, cpu, kind } => {
            let list = load_script(&script)?;
            let kind = AccessKind::from(kind);
            let hit = list.find_match(address, memory, cpu, kind).or_else(|| {
                list.any_address_matches(memory, cpu, kind).next()
            });
            match hit {
                Some((index, breakpoint)) => println!("{index}: {breakpoint}"),
                None => std::process::exit(1),
            }
        }
    }
    Ok(())
}

fn load_script(path: &Path) -> io::Result<BreakpointList> {
    let source = fs::read_to_string(path)?;
    match BreakpointList::parse_script(&source) {
        Ok(list) => Ok(list),
        Err(errors) => {
            for error in errors {
                eprintln!("{}:{}", path.display(), error.display(&source));
            }
            std::process::exit(1);
        }
    }
}

//===========================================================================//

fn parse_memory_type(name: &str) -> Result<MemoryType, String> {
    MemoryType::from_name(name)
        .ok_or_else(|| format!("unknown memory type: {name}"))
}

fn parse_cpu_type(name: &str) -> Result<CpuType, String> {
    CpuType::from_name(name).ok_or_else(|| format!("unknown CPU type: {name}"))
}

fn parse_address(text: &str) -> Result<u32, String> {
    let result = if let Some(hex) = text.strip_prefix('$') {
        u32::from_str_radix(hex, 16)
    } else if let Some(hex) =
        text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else {
        text.parse::<u32>()
    };
    result.map_err(|error| format!("invalid address {text:?}: {error}"))
}

//===========================================================================//
