//! Multi-room board game server using the room actor model.
//!
//! Rooms are created over HTTP with their seat list; players then connect
//! to `/ws/{room_id}` and every state transition is broadcast to the whole
//! room.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use monopoly::{SessionRegistry, StaticDirectory};
use pico_args::Arguments;

use mp_server::api::{self, AppState};
use mp_server::config::ServerConfig;

const HELP: &str = "\
Run a multi-room board game server

USAGE:
  mp_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8008]
  --cash       N           Starting cash per seat      [default: env STARTING_CASH or 1500]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8008)
  STARTING_CASH            Cash each seat starts with
  DICE_SEED                Fixed dice seed for deterministic games
  RUST_LOG                 Log filter (e.g., info, debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let cash_override: Option<i64> = pargs.opt_value_from_str("--cash")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = ServerConfig::from_env(bind_override, cash_override)?;
    info!("Starting board game server at {}", config.bind);

    let directory = Arc::new(StaticDirectory::new());
    let registry = Arc::new(SessionRegistry::new(directory.clone()));

    let state = AppState {
        registry,
        directory,
        config: config.clone(),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Server listening on {}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
