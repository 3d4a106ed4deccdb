use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitbot::{Action, BotError, Config, ConsoleChat, GitbotCommand, Handlers, Identity};
use gitbot_forge::Dispatcher;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    info!(
        admins = config.admins.len(),
        operator = %config.operator,
        "Starting gitbot console runner"
    );

    let handlers = Handlers::new(
        &config,
        Arc::new(ConsoleChat),
        Arc::new(Dispatcher::new(config.access_token.clone())),
    );
    let operator = config.operator.clone();

    // Each stdin line stands in for one inbound chat message from the
    // operator; the real chat framework dispatches to the same handlers.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(parsed) = GitbotCommand::parse_line(&line) else {
            continue;
        };

        let reply = match parsed {
            Ok(command) => match run(&handlers, command, &operator).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!(error = %e, "command failed");
                    format!("Command failed: {e}")
                }
            },
            Err(usage) => usage,
        };

        println!("{reply}");
    }

    Ok(())
}

async fn run(
    handlers: &Handlers,
    command: GitbotCommand,
    operator: &Identity,
) -> Result<String, BotError> {
    match command.action {
        Action::Request(args) => {
            handlers
                .request(args.access, &args.url, &args.username, operator)
                .await
        }
        Action::Grant(args) => {
            handlers
                .grant(args.access, &args.url, &args.username, operator)
                .await
        }
    }
}
