use std::fs::File;
use std::io::{stdout, BufWriter};

use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bullet_hell::config::{Cli, GameConfig};
use bullet_hell::entities::GameState;
use bullet_hell::error::GameError;
use bullet_hell::game::{run, FramePacer};
use bullet_hell::terminal::{TerminalCanvas, TerminalInput};

// ── Logging ───────────────────────────────────────────────────────────────────

/// stdout is the game screen, so logs only go to a file when one is given.
fn init_logging(cli: &Cli) -> Result<(), GameError> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    let config = cli.game_config()?;
    log::debug!("{config:?}");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut term = stdout();
    terminal::enable_raw_mode()?;
    term.execute(terminal::EnterAlternateScreen)?;
    term.execute(cursor::Hide)?;

    // Ask for key-release events where the terminal supports them
    // (kitty protocol); elsewhere held keys expire on their own.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && term
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::debug!("key release reporting: {keyboard_enhanced}");

    let result = play(&config, keyboard_enhanced, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = term.execute(PopKeyboardEnhancementFlags);
    }
    let _ = term.execute(cursor::Show);
    let _ = term.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let last = result?;
    log::info!("exiting, last score {}", last.frame_count);
    Ok(())
}

fn play(
    config: &GameConfig,
    keyboard_enhanced: bool,
    rng: &mut StdRng,
) -> Result<GameState, GameError> {
    let mut canvas = TerminalCanvas::fit_terminal(BufWriter::new(stdout()), config)?;
    let mut input = TerminalInput::spawn(keyboard_enhanced);
    let mut pacer = FramePacer::new();
    run(&mut canvas, &mut input, &mut pacer, config, rng)
}
