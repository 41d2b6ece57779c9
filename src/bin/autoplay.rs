//! Headless self-play: the selector plays pieces until the limit or a top-out.
//!
//! Usage: `autoplay [config.toml]`. Without an argument `Stackbot.toml` is
//! read from the working directory, falling back to defaults.

use std::env;
use std::process::ExitCode;

use log::{debug, error, info, warn};
use stackbot::{Config, Game, SelectorError, TwoPlySelector};

struct Summary {
    pieces: usize,
    lines: u32,
    score: u64,
    over: bool,
}

fn play(
    config: &Config,
    selector: &TwoPlySelector,
    game: &mut Game,
) -> Result<Summary, SelectorError> {
    game.start();
    let mut pieces = 0;

    while pieces < config.autoplay.pieces && !game.is_over() {
        let decision = selector.compute_move(game)?;
        if decision.uses_hold && !game.hold_piece() {
            warn!("hold refused for {:?}", game.current());
        }
        for &movement in &decision.inputs {
            game.apply(movement);
        }
        let cleared = game.line_clears();
        pieces += 1;

        let inputs: String = decision.inputs.iter().map(|m| m.to_char()).collect();
        debug!(
            "#{} {:?} {} score {:.2} cleared {}",
            pieces, decision.piece, inputs, decision.score, cleared
        );
        if config.autoplay.show_board {
            info!("\n{}", game.field().grid());
        }

        if game.is_over() {
            break;
        }
        game.make_piece(false);
    }

    Ok(Summary {
        pieces,
        lines: game.lines(),
        score: game.score(),
        over: game.is_over(),
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::load_or_default(),
    };

    let selector = match config.selector() {
        Ok(selector) => selector,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut game = config.new_game();
    match play(&config, &selector, &mut game) {
        Ok(summary) => {
            info!(
                "pieces {}, lines {}, score {}, game over: {}",
                summary.pieces, summary.lines, summary.score, summary.over
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("search failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
