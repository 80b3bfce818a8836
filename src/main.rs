use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use plugin_help::render::HelpRenderer;
use plugin_help::{Config, HelpCommand, HelpReply, HostSnapshot, SvgRenderer};

/// Plugin Help - list and render the commands of a bot plugin host
#[derive(Parser)]
#[command(name = "plugin-help", version, about)]
struct Cli {
    /// Host snapshot with `plugins` and `handlers` arrays
    #[arg(short, long, env = "PLUGIN_HELP_SNAPSHOT", default_value = "host.json")]
    snapshot: PathBuf,

    /// Config file (defaults to ~/.config/plugin-help/config.toml)
    #[arg(short, long, env = "PLUGIN_HELP_CONFIG")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the command catalog as JSON
    Catalog,
    /// Render the help image to a file
    Render {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Handle a chat message as the help plugin would
    Respond {
        /// Where to write an image reply (defaults to help.<ext>)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,plugin_help=info",
        1 => "info,plugin_help=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    tracing::debug!(?config, "loaded configuration");

    let snapshot = HostSnapshot::load(&cli.snapshot)?;
    let help = HelpCommand::with_svg_renderer(config);

    match cli.command {
        Command::Catalog => {
            let catalog = help.catalog(&snapshot, snapshot.handlers());
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        Command::Render { out } => {
            let catalog = help.catalog(&snapshot, snapshot.handlers());
            let image = SvgRenderer::new(help.config().render.clone()).render(&catalog)?;
            write_file(&out, &image.data)?;
        }
        Command::Respond { out, text } => {
            let text = text.join(" ");
            if !HelpCommand::matches(&text) {
                tracing::info!(text = %text, "not a help command, ignoring");
                return Ok(());
            }

            match help.respond(&snapshot, snapshot.handlers()).await? {
                HelpReply::Text(reply) => println!("{reply}"),
                HelpReply::Image(attachment) => {
                    let out = out
                        .or_else(|| attachment.filename.clone().map(PathBuf::from))
                        .unwrap_or_else(|| PathBuf::from("help.bin"));
                    write_file(&out, &attachment.data)?;
                }
            }
        }
    }

    Ok(())
}

fn write_file(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, data)?;
    tracing::info!(path = %path.display(), bytes = data.len(), "wrote help image");
    Ok(())
}
