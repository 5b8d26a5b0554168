use clap::Parser;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Parser, Debug)]
#[command(name = "pr-sniper")]
#[command(
    about = "Watch a GitHub issue counter and open a pull request when it reaches a target",
    long_about = "Configuration is read from the environment: OWNER, REPO, PR_BRANCH, PR_TITLE, \
                  PR_BODY (required); TARGET, POLL_INTERVAL, GITHUB_TOKEN, DRAFT_PR, \
                  DISCORD_WEBHOOK_URL (optional)."
)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();

    if let Err(e) = pr_sniper::logging::init(cli.verbose) {
        eprintln!("{}", e);
        std::process::exit(EXIT_FAILURE);
    }

    let config = match pr_sniper::config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    tracing::info!(
        repo = %config.repo_ref(),
        target = config.target,
        interval = %humantime::format_duration(config.poll_interval),
        draft = config.pr.draft,
        webhook = config.discord_webhook_url.is_some(),
        "Watching for issue number {}",
        config.target.saturating_sub(1)
    );

    let ctx = pr_sniper::poll::PollContext::from_config(&config);

    match pr_sniper::poll::run(&ctx).await {
        Ok(_) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}
