#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::error::SimError;
use flappy_evo::simulation::obstacle::{Obstacle, ObstacleTrack};
use flappy_evo::simulation::params::Params;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_track(seed: u64) -> (ObstacleTrack, Params) {
    let params = Params::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let track = ObstacleTrack::new(&params, &mut rng).unwrap();
    (track, params)
}

fn obstacle(x: f32, gap_y: f32) -> Obstacle {
    Obstacle {
        x,
        gap_y,
        gap: 150.0,
    }
}

#[test]
fn test_reset_lays_out_evenly_spaced_obstacles() {
    let (track, params) = create_track(1);

    let xs: Vec<f32> = track.iter().map(|o| o.x).collect();
    assert_eq!(xs, vec![750.0, 1150.0, 1550.0, 1950.0]);

    for o in track.iter() {
        assert!(o.gap_y >= params.height * 0.15);
        assert!(o.gap_y < params.height * 0.85);
        assert_eq!(o.gap, params.obstacle_gap);
    }
}

#[test]
fn test_front_obstacle_recycles_once_it_leaves_the_screen() {
    let (mut track, params) = create_track(2);
    let first_gap = track.iter().next().unwrap().gap_y;

    // Front starts at x=750 and must pass x < -32 (half of width 64).
    let mut recycled_at = None;
    for tick in 1..=200 {
        track.advance(params.obstacle_speed);
        if track.recycle(params.obstacle_spacing, params.obstacle_width) {
            recycled_at = Some(tick);
            break;
        }
        assert_eq!(track.len(), 4);
    }

    assert_eq!(recycled_at, Some(196));
    assert_eq!(track.len(), 4);

    let back = track.iter().last().unwrap();
    assert_eq!(back.x, 1950.0 - 4.0 * 196.0 + 400.0);
    assert_eq!(back.gap_y, first_gap);
}

#[test]
fn test_front_obstacle_still_in_place_after_188_ticks() {
    let (mut track, params) = create_track(3);

    for _ in 0..188 {
        track.advance(params.obstacle_speed);
        assert!(!track.recycle(params.obstacle_spacing, params.obstacle_width));
    }

    assert_eq!(track.iter().next().unwrap().x, -2.0);
    assert_eq!(track.len(), 4);
}

#[test]
fn test_track_length_is_constant_over_a_long_run() {
    let (mut track, params) = create_track(4);
    let mut recycles = 0;

    for _ in 0..5_000 {
        track.advance(params.obstacle_speed);
        if track.recycle(params.obstacle_spacing, params.obstacle_width) {
            recycles += 1;
        }
        assert_eq!(track.len(), params.obstacle_count);
    }

    assert!(recycles > 10);
    let xs: Vec<f32> = track.iter().map(|o| o.x).collect();
    for pair in xs.windows(2) {
        assert_eq!(pair[1] - pair[0], params.obstacle_spacing);
    }
}

#[test]
fn test_next_obstacle_skips_the_one_already_passed() {
    let track = ObstacleTrack::from_obstacles(vec![obstacle(100.0, 200.0), obstacle(500.0, 400.0)])
        .unwrap();

    assert_eq!(track.next_for(80.0).unwrap().x, 100.0);
    assert_eq!(track.next_for(100.0).unwrap().x, 500.0);
    assert_eq!(track.next_for(300.0).unwrap().x, 500.0);
}

#[test]
fn test_track_needs_two_obstacles() {
    let result = ObstacleTrack::from_obstacles(vec![obstacle(100.0, 200.0)]);
    assert!(matches!(result, Err(SimError::InvariantViolation(_))));

    let params = Params {
        obstacle_count: 1,
        ..Params::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        ObstacleTrack::new(&params, &mut rng),
        Err(SimError::InvariantViolation(_))
    ));
}

#[test]
fn test_reset_rerandomizes_gaps_and_positions() {
    let params = Params::default();
    let mut rng = StdRng::seed_from_u64(5);
    let mut track = ObstacleTrack::new(&params, &mut rng).unwrap();
    let before: Vec<f32> = track.iter().map(|o| o.gap_y).collect();

    for _ in 0..300 {
        track.advance(params.obstacle_speed);
        track.recycle(params.obstacle_spacing, params.obstacle_width);
    }
    track.reset(&params, &mut rng).unwrap();

    assert_eq!(track.iter().next().unwrap().x, 750.0);
    let after: Vec<f32> = track.iter().map(|o| o.gap_y).collect();
    assert_ne!(before, after);
}
