use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cloudlift_core::{
    fields_from_document, for_provider, InstanceScript, NetworkMapping, OptionValue,
    StorageMapping,
};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "cloudlift")]
#[command(about = "Transform cloud provider option schemas and wizard values into migration API payloads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a provider options schema into field descriptors
    Fields {
        /// Input options schema document
        input: PathBuf,

        /// Reported option values file; when given, descriptors are filled
        /// with the values and defaults it carries
        #[arg(long)]
        option_values: Option<PathBuf>,

        /// Provider whose transformation rules apply
        #[arg(short, long, default_value = "default")]
        provider: String,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Assemble a migration request body from wizard state files
    Payload {
        /// Submitted option values (flat JSON object)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Previously submitted option values, used to seed nested groups
        #[arg(long)]
        old_options: Option<PathBuf>,

        /// Network mappings file (JSON array)
        #[arg(long)]
        network_mappings: Option<PathBuf>,

        /// Storage mappings file (JSON array)
        #[arg(long)]
        storage_mappings: Option<PathBuf>,

        /// Default storage target
        #[arg(long)]
        default_storage: Option<String>,

        /// Destination for storage mappings whose target was left unset
        #[arg(long)]
        storage_config_default: Option<String>,

        /// User scripts file (JSON array)
        #[arg(long)]
        scripts: Option<PathBuf>,

        /// Provider whose transformation rules apply
        #[arg(short, long, default_value = "default")]
        provider: String,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fields {
            input,
            option_values,
            provider,
            output,
            format,
        } => {
            let document: Value = read_json(&input, "options schema")?;
            let plugin = for_provider(&provider);
            let mut fields = fields_from_document(&document)
                .context("Schema parsing failed")?;

            if let Some(path) = option_values {
                let values: Vec<OptionValue> = read_json(&path, "option values")?;
                fields = fields
                    .iter()
                    .map(|field| plugin.fill_field_values(field, &values, None))
                    .collect();
            }

            write_json(&fields, output.as_ref(), format)?;
        }
        Commands::Payload {
            options,
            old_options,
            network_mappings,
            storage_mappings,
            default_storage,
            storage_config_default,
            scripts,
            provider,
            output,
            format,
        } => {
            let plugin = for_provider(&provider);

            if options.is_none()
                && network_mappings.is_none()
                && storage_mappings.is_none()
                && default_storage.is_none()
                && scripts.is_none()
            {
                eprintln!("Warning: no wizard state supplied; the payload will be empty.");
            }

            let options: Option<Map<String, Value>> = options
                .map(|path| read_json(&path, "options"))
                .transpose()?;
            let old_options: Option<Map<String, Value>> = old_options
                .map(|path| read_json(&path, "old options"))
                .transpose()?;

            let mut body = Map::new();
            let env = plugin.destination_env(options.as_ref(), old_options.as_ref());
            body.insert("destination_environment".to_string(), Value::Object(env));

            if let Some(path) = network_mappings {
                let mappings: Vec<NetworkMapping> = read_json(&path, "network mappings")?;
                body.insert(
                    "network_map".to_string(),
                    Value::Object(plugin.network_map(Some(&mappings))),
                );
            }

            let storage: Option<Vec<StorageMapping>> = storage_mappings
                .map(|path| read_json(&path, "storage mappings"))
                .transpose()?;
            if let Some(payload) = plugin.storage_map(
                default_storage.as_deref(),
                storage.as_deref(),
                storage_config_default.as_deref(),
            ) {
                body.insert("storage_mappings".to_string(), Value::Object(payload));
            }

            if let Some(path) = scripts {
                let scripts: Vec<InstanceScript> = read_json(&path, "user scripts")?;
                body.insert(
                    "user_scripts".to_string(),
                    Value::Object(plugin.user_scripts(&scripts)),
                );
            }

            write_json(&Value::Object(body), output.as_ref(), format)?;
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf, what: &str) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {what} file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {what} from: {}", path.display()))
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;

    Ok(())
}
