use anyhow::Result;
use clap::Parser;
use pcpr::App;
use pcpr::Config;
use pcpr::clients::git::RealGit;
use pcpr::clients::github::RealGithub;
use pcpr::credentials::TerminalPrompt;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer as _;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[derive(Parser)]
#[command(name = "pcpr", version)]
#[command(
    about = "Push HEAD as a GitHub pull request, or update the PR it already links to",
    long_about = "Push HEAD and HEAD~1 to branches under $USER/PR/ and open a pull request \
between them, then amend HEAD's message with a 'PR: <url>' line. When HEAD's message \
already has such a line, force-push the existing PR's branches instead."
)]
pub struct Cli {}

fn setup_logging() -> Result<()> {
    let timer = tracing_subscriber::fmt::time::ChronoLocal::new("%H:%M:%S%.3f".into());
    let format = tracing_subscriber::fmt::format().with_timer(timer);
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()?;
    let subscriber = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(subscriber).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();
    setup_logging()?;

    let config = Config::load()?;
    let gh = RealGithub::new(&config.api_url)?;
    let git = RealGit::new(std::env::current_dir()?);
    let mut app = App::new(config, git, gh);

    app.authenticate(&TerminalPrompt).await?;
    app.cmd_submit(&mut std::io::stdout()).await?;

    Ok(())
}
