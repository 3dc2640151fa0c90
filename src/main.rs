use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use rotorcrypt::alphabet::to_letter;
use rotorcrypt::{Catalog, Machine, MachineConfig};

#[derive(Parser, Debug)]
#[command(name = "rotorcrypt", version, about = "Rotor cipher machine")]
struct Cli {
    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encipher (or decipher) text; reads stdin when TEXT is omitted
    Encrypt {
        text: Option<String>,

        /// TOML machine configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rotor names, leftmost first (e.g. I,II,III)
        #[arg(long, value_delimiter = ',')]
        rotors: Option<Vec<String>>,

        /// Reflector name
        #[arg(long)]
        reflector: Option<String>,

        /// Ring settings 1-26, one per rotor (e.g. 1,1,1)
        #[arg(long, value_delimiter = ',')]
        rings: Option<Vec<u8>>,

        /// Start window letters, one per rotor (e.g. AAA)
        #[arg(long)]
        positions: Option<String>,

        /// Plugboard pairs (e.g. "AB CD XZ")
        #[arg(long)]
        plugboard: Option<String>,
    },

    /// List the built-in rotors and reflectors
    Catalog,
}

#[derive(Serialize)]
struct EncryptOutput<'a> {
    output: &'a str,
    window: String,
}

#[derive(Serialize)]
struct CatalogEntry<'a> {
    kind: &'static str,
    name: &'a str,
    wiring: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notch: Option<char>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Encrypt {
            text,
            config,
            rotors,
            reflector,
            rings,
            positions,
            plugboard,
        } => {
            let mut file = match config {
                Some(path) => MachineConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => default_config(),
            };
            if let Some(rotors) = rotors {
                file.rotors = rotors;
            }
            if let Some(reflector) = reflector {
                file.reflector = reflector;
            }
            if rings.is_some() {
                file.rings = rings;
            }
            if positions.is_some() {
                file.positions = positions;
            }
            if plugboard.is_some() {
                file.plugboard = plugboard;
            }

            let settings = file.into_settings()?;
            let mut machine = Machine::new(&settings).context("building machine")?;

            let (input, from_stdin) = match text {
                Some(text) => (text, false),
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading stdin")?;
                    (buf, true)
                }
            };
            debug!(chars = input.chars().count(), "enciphering");

            let output = machine.encrypt(&input);
            if cli.json {
                let report = EncryptOutput {
                    output: &output,
                    window: machine.window(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if from_stdin {
                print!("{output}");
            } else {
                println!("{output}");
            }
        }
        Commands::Catalog => {
            let catalog = Catalog::historical();
            let entries = catalog_entries(&catalog);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for e in &entries {
                    match e.notch {
                        Some(notch) => {
                            println!("{:<9} {:<4} {}  notch {}", e.kind, e.name, e.wiring, notch)
                        }
                        None => println!("{:<9} {:<4} {}", e.kind, e.name, e.wiring),
                    }
                }
            }
        }
    }

    Ok(())
}

fn default_config() -> MachineConfig {
    MachineConfig {
        rotors: vec!["I".into(), "II".into(), "III".into()],
        reflector: "B".into(),
        ..MachineConfig::default()
    }
}

fn catalog_entries(catalog: &Catalog) -> Vec<CatalogEntry<'_>> {
    let rotors = catalog.rotors().iter().map(|r| CatalogEntry {
        kind: "rotor",
        name: r.name(),
        wiring: letters(&r.wiring()[..]),
        notch: Some(to_letter(r.notch() as i32)),
    });
    let reflectors = catalog.reflectors().iter().map(|r| CatalogEntry {
        kind: "reflector",
        name: r.name(),
        wiring: letters(&r.wiring()[..]),
        notch: None,
    });
    rotors.chain(reflectors).collect()
}

fn letters(wiring: &[u8]) -> String {
    wiring.iter().map(|&i| to_letter(i as i32)).collect()
}
