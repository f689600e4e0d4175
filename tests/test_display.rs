mod common;

use bullet_hell::compute::{intro_state, new_round};
use bullet_hell::config::GameConfig;
use bullet_hell::display::*;
use bullet_hell::entities::{GameStatus, Rect};

use common::{DrawOp, RecordingCanvas, GLYPH_HEIGHT, GLYPH_WIDTH};
use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rendered(state: &bullet_hell::entities::GameState) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::default();
    render(&mut canvas, state, &GameConfig::default()).unwrap();
    canvas
}

#[test]
fn format_elapsed_minutes_and_seconds() {
    assert_eq!(format_elapsed(0, 60), "00:00");
    assert_eq!(format_elapsed(59, 60), "00:00");
    assert_eq!(format_elapsed(60, 60), "00:01");
    assert_eq!(format_elapsed(7500, 60), "02:05");
}

#[test]
fn message_is_centred_with_offset() {
    let cfg = GameConfig::default();
    let mut canvas = RecordingCanvas::default();
    message_to_screen(&mut canvas, &cfg, "Game Over", Color::Red, -50, FontSize::Large);

    let label = match &canvas.pending[..] {
        [DrawOp::Text(label)] => label.clone(),
        other => panic!("unexpected ops {other:?}"),
    };
    let width = 9 * GLYPH_WIDTH;
    assert_eq!(
        label.rect,
        Rect::new(160 - width / 2, 70 - GLYPH_HEIGHT / 2, width, GLYPH_HEIGHT)
    );
    assert_eq!(label.color, Color::Red);
}

#[test]
fn intro_screen_text() {
    let canvas = rendered(&intro_state(&GameConfig::default()));
    let frame = canvas.last_frame();
    assert_eq!(frame[0], DrawOp::Clear(C_BACKGROUND));
    let texts: Vec<_> = RecordingCanvas::texts(frame).iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Welcome to BulletHell Training",
            "Press C to play, P to pause or Q to quit."
        ]
    );
    assert!(RecordingCanvas::fills(frame).is_empty());
}

#[test]
fn playing_frame_draws_every_entity_and_hud() {
    let cfg = GameConfig::default();
    let mut state = new_round(&cfg, &mut StdRng::seed_from_u64(3));
    state.frame_count = 125;
    let canvas = rendered(&state);
    let frame = canvas.last_frame();

    let fills = RecordingCanvas::fills(frame);
    assert_eq!(fills.len(), 51);
    assert_eq!(fills.iter().filter(|(_, c)| *c == C_PROJECTILE).count(), 50);
    assert_eq!(fills.last(), Some(&(Rect::new(160, 120, 4, 4), C_PLAYER)));

    let texts = RecordingCanvas::texts(frame);
    assert_eq!(texts[0].text, "Score: 125");
    assert_eq!((texts[0].rect.x, texts[0].rect.y), (0, 0));
    assert_eq!(texts[1].text, "Time: 00:02");
    assert_eq!(texts[1].rect.right(), 320);
}

#[test]
fn paused_frame_keeps_round_and_adds_banner() {
    let cfg = GameConfig::default();
    let mut state = new_round(&cfg, &mut StdRng::seed_from_u64(3));
    state.status = GameStatus::Paused;
    let canvas = rendered(&state);
    let frame = canvas.last_frame();

    assert_eq!(RecordingCanvas::fills(frame).len(), 51);
    let texts: Vec<_> = RecordingCanvas::texts(frame).iter().map(|l| l.text.as_str()).collect();
    assert!(texts.contains(&"Paused"));
    assert!(texts.contains(&"Press P to resume"));
}

#[test]
fn game_over_screen_shows_final_score() {
    let cfg = GameConfig::default();
    let mut state = new_round(&cfg, &mut StdRng::seed_from_u64(3));
    state.status = GameStatus::GameOver;
    state.frame_count = 314;
    let canvas = rendered(&state);
    let frame = canvas.last_frame();

    assert!(RecordingCanvas::fills(frame).is_empty());
    let texts = RecordingCanvas::texts(frame);
    assert_eq!(texts[0].text, "Game Over");
    assert_eq!(texts[0].color, C_GAME_OVER);
    assert_eq!(texts[0].size, FontSize::Large);
    assert_eq!(texts[1].text, "Total Score: 314");
    assert_eq!(texts[1].size, FontSize::Medium);
    assert_eq!(texts[2].text, "Press C to play, P to pause or Q to quit.");
}

#[test]
fn terminated_renders_nothing() {
    let mut state = intro_state(&GameConfig::default());
    state.status = GameStatus::Terminated;
    let canvas = rendered(&state);
    assert!(canvas.frames.is_empty());
}
