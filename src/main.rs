use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glossa::config::Config;
use glossa::loader::DictionaryLoader;
use glossa::locale::store::PageUrl;
use glossa::locale::{self, Language};
use glossa::page::PageModel;
use glossa::session::Session;

#[derive(Parser)]
#[command(
    name = "glossa",
    version,
    about = "Help-center translation engine: fallback-chain dictionary loading and DOM patching",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a page HTML file and print the resulting patch set
    Render {
        /// Path of the page HTML file
        #[arg(short, long)]
        input: PathBuf,

        /// Language code to request (overrides saved preference and locale)
        #[arg(short, long)]
        lang: Option<String>,

        /// Dictionary base URL (overrides configuration)
        #[arg(short, long)]
        base_url: Option<String>,
    },

    /// Show which language the resolver picks for given inputs
    Resolve {
        /// URL query parameter value
        #[arg(long)]
        url_lang: Option<String>,

        /// Saved preference value
        #[arg(long)]
        saved: Option<String>,

        /// System locale (detected when omitted)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Fetch a language's dictionary and report which source served it
    Fetch {
        /// Language code to request
        lang: String,

        /// Dictionary base URL (overrides configuration)
        #[arg(short, long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Render {
            input,
            lang,
            base_url,
        } => {
            if let Some(base_url) = base_url {
                config.endpoints.base_url = base_url;
            }
            config.validate()?;

            tracing::info!(input = %input.display(), lang = ?lang, "Starting render command");
            render(&config, &input, lang.as_deref()).await?;
        }

        Commands::Resolve {
            url_lang,
            saved,
            locale,
        } => {
            let system = locale.or_else(sys_locale::get_locale);
            let resolved =
                locale::resolve(url_lang.as_deref(), saved.as_deref(), system.as_deref());
            println!("{resolved}");
        }

        Commands::Fetch { lang, base_url } => {
            if let Some(base_url) = base_url {
                config.endpoints.base_url = base_url;
            }
            config.validate()?;

            tracing::info!(lang = %lang, "Starting fetch command");
            fetch(&config, &lang).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("glossa=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("glossa=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn render(config: &Config, input: &Path, lang: Option<&str>) -> Result<()> {
    let html = std::fs::read_to_string(input)?;
    let mut page = PageModel::scan(&html);

    // The --lang flag plays the role of the page URL's query parameter.
    let mut page_url = PageUrl::parse("http://localhost/help")?;
    if let Some(code) = lang.and_then(Language::from_code) {
        page_url.set_lang_param(code);
    }

    let mut session = Session::init(config, page_url).await?;
    let patches = session.apply(&mut page);

    println!("{}", serde_json::to_string_pretty(&patches)?);

    tracing::info!(
        active = %session.active_language(),
        rendered = ?session.rendered_language(),
        patches = patches.len(),
        "render complete"
    );
    Ok(())
}

async fn fetch(config: &Config, code: &str) -> Result<()> {
    let lang: Language = code.parse()?;
    let loader = DictionaryLoader::with_timeout(&config.endpoints.base_url, config.request_timeout())?;

    let outcome = loader.load(lang).await?;

    println!("requested: {}", outcome.requested);
    println!("served:    {}", outcome.served);
    println!("source:    {}", outcome.source);
    if outcome.is_fallback() {
        println!("note:      cross-language fallback is active");
    }
    println!(
        "{}",
        serde_json::to_string_pretty(outcome.dictionary.as_value())?
    );
    Ok(())
}
