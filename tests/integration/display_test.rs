//! Integration tests for display synchronization behaviour

use wallsync::display::{DisplayController, DisplayPhase, RenderInstruction};
use wallsync::{compute_sync_state, Playlist, PlaylistItem};

const T0: i64 = 1_800_000_000_000;

fn images(durations: &[f64]) -> Playlist {
    Playlist::new(
        "lobby",
        durations
            .iter()
            .enumerate()
            .map(|(i, d)| PlaylistItem::image(format!("img{}", i), *d))
            .collect(),
    )
}

/// Drive a controller through ticks and local deadlines in `[from, to)`.
///
/// Ticks fire `tick_phase_ms` after each wall-clock second, like a display
/// whose timer started at an arbitrary point. `after_tick` sees the
/// controller right after every tick.
fn simulate_with(
    controller: &mut DisplayController,
    from: i64,
    to: i64,
    tick_phase_ms: i64,
    mut after_tick: impl FnMut(i64, &DisplayController),
) {
    let mut next_tick = from - from.rem_euclid(1000) + tick_phase_ms;
    if next_tick < from {
        next_tick += 1000;
    }
    loop {
        let deadline = controller.next_local_deadline().unwrap_or(i64::MAX);
        let now = deadline.min(next_tick);
        if now >= to {
            break;
        }
        if now == deadline {
            controller.on_local_deadline(now);
        }
        if now == next_tick {
            controller.on_tick(now);
            after_tick(now, controller);
            next_tick += 1000;
        }
    }
}

fn simulate(controller: &mut DisplayController, from: i64, to: i64, tick_phase_ms: i64) {
    simulate_with(controller, from, to, tick_phase_ms, |_, _| {});
}

#[test]
fn local_rotation_never_disagrees_with_synchronizer_after_a_tick() {
    // boundaries fall on .0, .25, .5 and .75 of a second, all after the tick
    let playlist = images(&[3.0, 4.5, 2.0, 7.25]);
    let mut controller = DisplayController::new();
    controller.on_playlist(playlist.clone(), T0);

    let mut ticks = 0;
    simulate_with(&mut controller, T0, T0 + 600_000, 137, |now, c| {
        let expected = compute_sync_state(&playlist, now).unwrap();
        assert_eq!(c.current_index(), Some(expected.current_index), "diverged at {}", now);
        ticks += 1;
    });
    assert_eq!(ticks, 600);
}

#[test]
fn displays_with_different_tick_phases_converge() {
    let playlist = images(&[5.0, 5.0, 10.0]);
    let mut a = DisplayController::new();
    let mut b = DisplayController::new();
    a.on_playlist(playlist.clone(), T0 + 20);
    b.on_playlist(playlist, T0 + 940);

    simulate(&mut a, T0 + 20, T0 + 95_500, 20);
    simulate(&mut b, T0 + 940, T0 + 95_500, 940);

    assert_eq!(a.current_index(), b.current_index());
    assert_eq!(a.phase(), DisplayPhase::Synced);
}

#[test]
fn fresh_display_matches_long_running_one_within_a_tick() {
    let playlist = images(&[4.0, 6.0, 8.0]);
    let mut veteran = DisplayController::new();
    veteran.on_playlist(playlist.clone(), T0);
    simulate(&mut veteran, T0, T0 + 3_600_700, 500);

    let mut newcomer = DisplayController::new();
    let first = newcomer.on_playlist(playlist, T0 + 3_600_700);
    assert!(matches!(first, Some(RenderInstruction::Show { .. })));
    assert_eq!(newcomer.current_index(), veteran.current_index());
}

#[test]
fn playlist_change_mid_cycle_restarts_from_absolute_time() {
    let mut controller = DisplayController::new();
    controller.on_playlist(images(&[10.0, 10.0]), T0);
    simulate(&mut controller, T0, T0 + 12_000, 0);
    assert_eq!(controller.current_index(), Some(1));

    let replacement = images(&[4.0, 4.0, 4.0]);
    let expected = compute_sync_state(&replacement, T0 + 12_000).unwrap();
    controller.on_playlist(replacement, T0 + 12_000);
    assert_eq!(controller.current_index(), Some(expected.current_index));
}
