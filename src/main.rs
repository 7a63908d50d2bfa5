use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ttn_payload_decoder::logging::{init_logger_with_level, log_error};
use ttn_payload_decoder::util::{decode_hex, PerfTimer};
use ttn_payload_decoder::{decode_base64, decode_buffer, log_info, transformer, SensorBox};

#[derive(Parser)]
#[command(name = "ttn-decode")]
#[command(about = "Decode TTN uplink payloads into sensor measurements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one payload against a box configuration
    Decode {
        /// Box configuration (JSON)
        #[arg(short = 'b', long = "box")]
        box_file: PathBuf,
        /// Payload as base64 (TTN payload_raw)
        #[arg(long, conflicts_with = "hex", required_unless_present = "hex")]
        base64: Option<String>,
        /// Payload as hex
        #[arg(long)]
        hex: Option<String>,
        /// Default createdAt, RFC 3339 or naive (UTC)
        #[arg(short, long)]
        timestamp: Option<String>,
        #[arg(long)]
        pretty: bool,
    },
    /// List the lora-serialization transformers
    Transformers,
}

fn parse_timestamp(input: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(input) {
        return Ok(time.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .with_context(|| format!("invalid timestamp '{input}'"))?;
    Ok(naive.and_utc())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger_with_level("warn");

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            box_file,
            base64,
            hex,
            timestamp,
            pretty,
        } => {
            let sensor_box = SensorBox::from_json_file(&box_file)
                .with_context(|| format!("loading {}", box_file.display()))?;
            let timestamp = timestamp.as_deref().map(parse_timestamp).transpose()?;

            let timer = PerfTimer::start("decode");
            let decoded = match (base64, hex) {
                (Some(text), _) => decode_base64(&text, &sensor_box, timestamp).await,
                (None, Some(hex)) => {
                    let bytes = decode_hex(&hex).context("invalid hex payload")?;
                    decode_buffer(&bytes, &sensor_box, timestamp).await
                }
                (None, None) => bail!("either --base64 or --hex is required"),
            };
            let result = decoded.map_err(|e| {
                log_error(&format!("Rejected uplink for {}: {e}", box_file.display()));
                e
            })?;
            timer.finish();

            log_info(&format!(
                "Decoded {} measurements, {} warnings",
                result.data.len(),
                result.warnings.len()
            ));
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
        }
        Commands::Transformers => {
            for t in transformer::all() {
                println!("{:<12} {} bytes  {}", t.name, t.width, t.effect);
            }
        }
    }

    Ok(())
}
