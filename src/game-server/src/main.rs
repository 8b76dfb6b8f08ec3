use clap::{Parser, Subcommand};
use common::utility::create_shutdown_channel;
use game_server::{
    entrypoint::{serve, GameServerConfig},
    session::GameSession,
    terminal,
};
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rock Paper Scissors against an adaptive computer opponent")]
struct Cli {
    /// REST API address
    #[arg(long, env = "RPS_MANAGER_ADDRESS", default_value = "0.0.0.0:8082")]
    manager_address: String,

    /// Websocket address
    #[arg(long, env = "RPS_SOCKET_ADDRESS", default_value = "0.0.0.0:3002")]
    socket_address: String,

    #[arg(long, env = "RPS_LOG_LEVEL", default_value_t = Level::DEBUG)]
    log_level: Level,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve sessions over REST and websocket (default)
    Serve,
    /// Play a single session in this terminal
    Play {
        /// Seed for a reproducible opponent
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let playing = matches!(cli.command, Some(Command::Play { .. }));
    let subscriber = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(cli.log_level);
    // Keep stdout for the game itself
    if playing {
        subscriber.with_writer(std::io::stderr).init();
    } else {
        subscriber.init();
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = GameServerConfig {
                manager_address: cli.manager_address,
                socket_address: cli.socket_address,
            };
            let shutdown_receiver = create_shutdown_channel();
            if let Err(e) = serve(config, shutdown_receiver, None).await {
                error!("Game server failed: {}", e);
                std::process::exit(1);
            }
        }
        Command::Play { seed } => {
            let mut session = seed.map(GameSession::seeded).unwrap_or_default();
            let result = tokio::task::spawn_blocking(move || {
                terminal::run(&mut session, std::io::stdin().lock(), std::io::stdout())
            })
            .await;
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Terminal I/O failed: {}", e),
                Err(e) => error!("Terminal task panicked: {}", e),
            }
        }
    }
}
