use backend::{Backend, GameOutcome};
use board::Color;
use clap::Parser;
use rules::{GameConfig, Interposition};
use terminal_ui::TerminalUIPlayer;
use tracing_subscriber::EnvFilter;

/// Two players taking turns at one terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Which pieces may block a check when deciding whether it's mate
    #[arg(long, value_enum, default_value_t = Interposition::AllPieces)]
    interposition: Interposition,

    /// Log filter to use when `RUST_LOG` isn't set
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig {
        interposition: args.interposition,
    };
    let mut backend = Backend::new(
        config,
        TerminalUIPlayer::new(Color::White),
        TerminalUIPlayer::new(Color::Black),
    );
    tracing::info!(config = ?backend.game_state().config(), "starting game");
    match backend.play_game() {
        GameOutcome::Checkmate { winner } => println!("{winner} wins by checkmate"),
        GameOutcome::Quit(color) => println!("{color} quit the game"),
    }
}
