//! qrform command-line entrypoint

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use qrform::export::{
    ExportPipeline, FixedPermission, FsMediaStore, PermissionGate, PromptPermission,
};
use qrform::output::{Alert, Generation, alert_for, categories_value, render_generation};
use qrform::{
    Category, Error, ExportedImage, FormSession, ImageSource, QrEncoder, QrformConfig,
    SystemOpener, logging, send_email, send_sms,
};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrform",
    version,
    about = "Generate QR codes for WiFi, SMS, email, links and social profiles"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrform.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the supported categories and the fields each one takes
    Categories,
    /// Build the payload for a category and render its QR code
    Generate(GenerateArgs),
    /// Open the SMS composer with a prefilled message
    SendSms {
        /// Recipient phone number
        number: String,
        /// Message body
        message: String,
    },
    /// Open the mail composer with a prefilled message
    SendEmail {
        /// Recipient address
        address: String,
        /// Message body
        message: String,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Category (wifi, text, phone, youtube, email, sms, website, snapchat, facebook, instagram)
    category: Category,

    /// Primary value: network name, address, number, id or text
    #[arg(default_value = "")]
    primary: String,

    /// Secondary value: WiFi password or SMS/email message
    #[arg(long, short, value_name = "VALUE")]
    secondary: Option<String>,

    /// Save the rendered code into the gallery album
    #[arg(long)]
    save: bool,

    /// Also write the rendered PNG to this path
    #[arg(long, value_name = "PATH")]
    png: Option<PathBuf>,

    /// Grant storage permission without prompting
    #[arg(long, short)]
    yes: bool,

    /// Do not print the code to the terminal
    #[arg(long)]
    no_terminal: bool,

    /// Override the gallery root directory
    #[arg(long, value_name = "DIR")]
    gallery_dir: Option<PathBuf>,

    /// Override the album name
    #[arg(long, value_name = "NAME")]
    album: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, json);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = QrformConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    match cli.command {
        Command::Categories => {
            list_categories(cli.json)?;
            Ok(())
        }
        Command::Generate(args) => {
            if let Some(dir) = args.gallery_dir.clone() {
                config.export.gallery_dir = Some(dir);
            }
            if let Some(album) = args.album.clone() {
                config.export.album = album;
            }
            generate(args, &config, cli.json).await
        }
        Command::SendSms { number, message } => {
            let opener = opener(&config);
            let uri = send_sms(&opener, &number, &message).await?;
            print_dispatched(&uri, cli.json)
        }
        Command::SendEmail { address, message } => {
            let opener = opener(&config);
            let uri = send_email(&opener, &address, &message).await?;
            print_dispatched(&uri, cli.json)
        }
    }
}

fn list_categories(json: bool) -> qrform::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&categories_value())?);
        return Ok(());
    }

    println!("Select QR Code Type:");
    for category in Category::ALL {
        let primary = category.primary_field();
        match category.secondary_field() {
            Some(secondary) => println!(
                "  {:<10} {} ({}, {})",
                category.as_str(),
                category.display_name(),
                primary.label,
                secondary.label
            ),
            None => println!(
                "  {:<10} {} ({})",
                category.as_str(),
                category.display_name(),
                primary.label
            ),
        }
    }
    Ok(())
}

async fn generate(args: GenerateArgs, config: &QrformConfig, json: bool) -> anyhow::Result<()> {
    let mut session = FormSession::new();
    session.select(args.category)?;
    session.set_primary(args.primary)?;
    if let Some(secondary) = args.secondary {
        session.set_secondary(secondary)?;
    }
    let payload = session.generate()?.to_string();
    info!(category = %args.category, "Generated payload");

    let encoder = config.encoder();
    let terminal = if args.no_terminal || json {
        None
    } else {
        Some(encoder.encode_terminal(&payload)?)
    };

    if let Some(path) = &args.png {
        let png = encoder.encode_png(&payload)?;
        tokio::fs::write(path, png)
            .await
            .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
    }

    let exported = if args.save {
        Some(export(&encoder, &payload, config, args.yes).await?)
    } else {
        None
    };

    let rendered = render_generation(&Generation {
        category: args.category,
        payload: &payload,
        terminal: terminal.as_deref(),
        png_path: args.png.as_deref(),
        exported: exported.as_ref(),
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }
    Ok(())
}

async fn export(
    encoder: &QrEncoder,
    payload: &str,
    config: &QrformConfig,
    assume_yes: bool,
) -> qrform::Result<ExportedImage> {
    let options = &config.export;
    let gate: Box<dyn PermissionGate> = match (assume_yes, options.permission.fixed_status()) {
        (true, _) => Box::new(FixedPermission::granted()),
        (false, Some(status)) => Box::new(FixedPermission(status)),
        (false, None) => Box::new(PromptPermission::stdio()),
    };
    let store = FsMediaStore::new(
        options.resolved_private_dir()?,
        options.resolved_gallery_dir()?,
    );

    let mut pipeline = ExportPipeline::new(gate, store)
        .with_album(options.album.clone())
        .with_file_name(options.file_name.clone());

    let data_url = encoder.encode_data_url(payload)?;
    pipeline.export(ImageSource::Base64(data_url)).await
}

fn opener(config: &QrformConfig) -> SystemOpener {
    config
        .dispatch
        .opener
        .clone()
        .map(|program| SystemOpener::with_program(program))
        .unwrap_or_default()
}

fn print_dispatched(uri: &str, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "dispatched": uri }))?
        );
    } else {
        println!("Opened {uri}");
    }
    Ok(())
}

fn report(err: &anyhow::Error, json: bool) {
    tracing::debug!(error = ?err, "command failed");

    let alert = match err.downcast_ref::<Error>() {
        Some(err) => alert_for(err),
        None => Alert {
            title: "Error",
            message: format!("{err:#}"),
        },
    };

    if json {
        let payload = json!({ "error": { "title": alert.title, "message": alert.message } });
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(_) => eprintln!("{}: {}", alert.title, alert.message),
        }
    } else {
        eprintln!("{}: {}", alert.title, alert.message);
    }
}
