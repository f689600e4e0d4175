use bullet_hell::entities::*;

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges() {
    let r = Rect::new(10, 20, 4, 6);
    assert_eq!(r.right(), 14);
    assert_eq!(r.bottom(), 26);
}

#[test]
fn rect_overlapping_pixel_area_intersects() {
    let a = Rect::new(0, 0, 4, 4);
    assert!(a.intersects(&Rect::new(3, 3, 2, 2))); // one shared pixel
    assert!(a.intersects(&Rect::new(1, 1, 2, 2))); // fully inside
    assert!(Rect::new(1, 1, 2, 2).intersects(&a)); // symmetric
}

#[test]
fn rect_adjacent_does_not_intersect() {
    let a = Rect::new(0, 0, 4, 4);
    assert!(!a.intersects(&Rect::new(4, 0, 2, 2))); // touching on the right
    assert!(!a.intersects(&Rect::new(0, 4, 2, 2))); // touching below
    assert!(!a.intersects(&Rect::new(4, 4, 2, 2))); // touching a corner
    assert!(!a.intersects(&Rect::new(-2, 0, 2, 2))); // touching on the left
}

#[test]
fn rect_zero_sized_never_intersects() {
    let a = Rect::new(0, 0, 4, 4);
    assert!(!a.intersects(&Rect::new(2, 2, 0, 0)));
}

#[test]
fn rect_centered_at_keeps_size() {
    let r = Rect::new(0, 0, 54, 8).centered_at(160, 70);
    assert_eq!(r, Rect::new(133, 66, 54, 8));
}

// ── State ─────────────────────────────────────────────────────────────────────

#[test]
fn held_keys_default_to_released() {
    let held = HeldKeys::default();
    assert!(!held.left && !held.right && !held.up && !held.down);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player { x: 160, y: 120, change_x: 0, change_y: 0 },
        projectiles: Vec::new(),
        held: HeldKeys::default(),
        frame_count: 0,
        status: GameStatus::Playing,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99;
    cloned.frame_count = 999;
    cloned.projectiles.push(Projectile {
        fx: 5.0,
        fy: 5.0,
        x: 5,
        y: 5,
        change_x: 1.0,
        change_y: 0.0,
    });

    assert_eq!(original.player.x, 160);
    assert_eq!(original.frame_count, 0);
    assert!(original.projectiles.is_empty());
}
