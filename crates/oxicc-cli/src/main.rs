use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use oxicc_core::{Colorspace, ProfileKind};

mod commands;

use commands::EditArgs;

#[derive(Parser)]
#[command(name = "oxicc")]
#[command(version, about = "Inspect and edit ICC color profiles", long_about = None)]
struct Cli {
    /// Log load and save details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the header and every tag
    Dump {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Summarize a profile
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Locale for localized fields, e.g. "en_GB"
        #[arg(long, value_name = "LOCALE")]
        locale: Option<String>,
    },

    /// Change fields and save
    Edit {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write here instead of replacing FILE
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        #[arg(long, value_name = "TEXT")]
        description: Option<String>,

        #[arg(long, value_name = "TEXT")]
        copyright: Option<String>,

        #[arg(long, value_name = "TEXT")]
        manufacturer: Option<String>,

        #[arg(long, value_name = "TEXT")]
        model: Option<String>,

        /// Locale the text options apply to (default entry if omitted)
        #[arg(long, value_name = "LOCALE")]
        locale: Option<String>,

        /// Add or replace a metadata entry
        #[arg(long = "set-metadata", value_name = "KEY=VALUE", value_parser = commands::parse_key_value)]
        set_metadata: Vec<(String, String)>,

        /// Remove a metadata entry
        #[arg(long = "remove-metadata", value_name = "KEY")]
        remove_metadata: Vec<String>,

        /// Remove all metadata before applying --set-metadata
        #[arg(long)]
        clear_metadata: bool,

        /// ICC version, e.g. 2.4 or 4.3
        #[arg(long, value_name = "V")]
        version: Option<f64>,

        /// Profile kind, e.g. display-device
        #[arg(long, value_name = "KIND")]
        kind: Option<ProfileKind>,

        /// Data colorspace, e.g. rgb
        #[arg(long, value_name = "COLORSPACE")]
        colorspace: Option<Colorspace>,
    },
}

fn init_logging(verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Dump { file } => commands::cmd_dump(&file),
        Commands::Info { file, json, locale } => commands::cmd_info(&file, json, locale.as_deref()),
        Commands::Edit {
            file,
            output,
            description,
            copyright,
            manufacturer,
            model,
            locale,
            set_metadata,
            remove_metadata,
            clear_metadata,
            version,
            kind,
            colorspace,
        } => commands::cmd_edit(
            &file,
            EditArgs {
                output,
                description,
                copyright,
                manufacturer,
                model,
                locale,
                set_metadata,
                remove_metadata,
                clear_metadata,
                version,
                kind,
                colorspace,
            },
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
