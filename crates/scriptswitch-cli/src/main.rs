use std::path::PathBuf;

use clap::Parser;
use scriptswitch_core::{classifier, Config, Extension};
use scriptswitch_host::MemoryHost;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scriptswitch")]
#[command(version, about = "Per-site JavaScript toggle, driven against a simulated browser host", long_about = None)]
struct Cli {
    /// Host snapshot file (defaults to the platform data dir)
    #[arg(long)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Toggle JavaScript for a URL, as an icon click on its tab would
    Toggle {
        /// URL of the active tab
        url: String,
    },
    /// List every rule the settings cache has mirrored
    Rules,
    /// Open the browser's JavaScript settings page via the menu shortcut
    Settings,
    /// Show the pattern a URL classifies to
    Classify {
        /// URL to classify
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scriptswitch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let state_path = match cli.state {
        Some(path) => path,
        None => default_state_path()?,
    };

    tracing::debug!("Host snapshot at {}", state_path.display());

    let config = Config::load()?;
    let host = MemoryHost::load(&state_path)?;
    let extension = Extension::new(host.apis(), config.clone());
    extension.startup().await?;

    match cli.command {
        Commands::Toggle { url } => {
            let tab = host.open_tab(&url);
            match extension.on_action_clicked(&tab).await? {
                Some(rule) => println!("{} is now {}", rule.primary_pattern, rule.setting),
                None => println!("{} is not togglable", url),
            }
        }
        Commands::Rules => {
            let rules = extension.cached_rules().await?;
            if rules.is_empty() {
                println!("No rules cached yet. Try `scriptswitch toggle <url>`.");
            }
            for rule in rules {
                println!("{}\t{}", rule.setting, rule.primary_pattern);
            }
        }
        Commands::Settings => {
            extension.on_menu_clicked(&config.menu.id).await?;
            println!("Opened {}", config.settings_page);
        }
        Commands::Classify { url } => match classifier::classify(&url) {
            Some(pattern) => println!("{}", pattern),
            None => println!("{} classifies to no pattern", url),
        },
    }

    host.save(&state_path)?;
    Ok(())
}

fn default_state_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?
        .join("scriptswitch");

    Ok(data_dir.join("host.json"))
}
