use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use wikimark_config::{Config, MarkdownConfig, ServerHost};
use wikimark_engine::{
    BagUrlBuilder, DocumentId, HostInterlinker, Principal, RecipeTargetResolver, RenderContext,
    RenderOptions, SafeMode, Store, WikiFeatures, load_store, render,
};

#[derive(Parser)]
#[command(name = "wikimark")]
#[command(version, about = "Render a wiki document from a directory store to HTML", long_about = None)]
#[command(group(ArgGroup::new("container").required(true).args(["bag", "recipe"])))]
#[command(after_help = "EXAMPLES:
    wikimark --bag common 'Front Page'             Render from a bag
    wikimark --recipe cdent_public Notes --user cdent
    wikimark --store ./store --link-base /wiki/ --bag common Index")]
struct Cli {
    /// Title of the document to render
    #[arg(value_name = "TITLE")]
    title: String,

    /// Bag holding the document
    #[arg(long)]
    bag: Option<String>,

    /// Recipe to resolve the document through
    #[arg(long)]
    recipe: Option<String>,

    /// Principal to read as
    #[arg(long, default_value = Principal::GUEST)]
    user: String,

    /// Role held by the principal (repeatable)
    #[arg(long = "role", value_name = "ROLE")]
    roles: Vec<String>,

    /// Config file (defaults to ~/.config/wikimark/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Store directory, overriding the config file
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,

    /// Wiki link prefix, overriding the config file; enables wiki features
    #[arg(long, value_name = "PREFIX")]
    link_base: Option<String>,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;
    if let Some(link_base) = &cli.link_base {
        config.markdown.wiki_link_base = Some(link_base.clone());
    }
    log::debug!("using store at {}", config.store_path.display());

    let store = load_store(&config.store_path)
        .with_context(|| format!("Failed to load store from {}", config.store_path.display()))?;

    let principal = cli
        .roles
        .iter()
        .fold(Principal::new(cli.user.as_str()), |p, role| {
            p.with_role(role.as_str())
        });

    let id = match (&cli.bag, &cli.recipe) {
        (Some(bag), _) => DocumentId::in_bag(cli.title.as_str(), bag.as_str()),
        (None, Some(recipe)) => DocumentId::in_recipe(cli.title.as_str(), recipe.as_str()),
        (None, None) => bail!("either --bag or --recipe is required"),
    };

    let document = store
        .get(&principal, &id)
        .with_context(|| format!("Failed to fetch {}", cli.title))?;

    let mut ctx = RenderContext::new(principal)
        .with_store(&store)
        .with_options(render_options(&config.markdown));
    ctx.wiki = wiki_features(&config.markdown, config.server_host.as_ref());

    println!("{}", render(&document, &ctx));
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::info!("Config path: {}", config_path.display());

    let loaded = Config::load_from_path(&config_path)?;
    match (loaded, &cli.store) {
        (Some(mut config), Some(store)) => {
            config.store_path = store.clone();
            Ok(config)
        }
        (Some(config), None) => Ok(config),
        (None, Some(store)) => Ok(Config::new(store.clone())),
        (None, None) => bail!(
            "No --store given and no config file found at {}",
            config_path.display()
        ),
    }
}

fn render_options(markdown: &MarkdownConfig) -> RenderOptions {
    let mut options = RenderOptions::default();
    if let Some(mode) = &markdown.safe_mode {
        options.safe_mode = SafeMode::from_setting(mode);
    }
    if !markdown.render_types.is_empty() {
        options.render_types = markdown.render_types.clone();
    }
    options
}

fn wiki_features(markdown: &MarkdownConfig, host: Option<&ServerHost>) -> Option<WikiFeatures> {
    let mut features = WikiFeatures::new(markdown.wiki_link_base.clone()?)
        .with_target_resolver(RecipeTargetResolver::default());

    if let Some(host) = host {
        let mut interlinker = HostInterlinker::new(host.scheme.as_str(), host.host.as_str());
        interlinker.port = host.port.clone();
        features = features.with_interlinker(interlinker);
    }
    if let Some(prefix) = &markdown.transclude_url_prefix {
        features = features.with_transclude_url(BagUrlBuilder::new(prefix.as_str()));
    }
    Some(features)
}
