use bowling_core::game::bowling_game::Game;
use bowling_core::model::frame::FrameKind;
use bowling_core::model::pins::InvalidRollError;

fn roll_many(game: &mut Game, count: usize, pins: i64) {
    for _ in 0..count {
        game.roll(pins).expect("valid roll");
    }
}

fn roll_all(game: &mut Game, rolls: &[i64]) {
    for &pins in rolls {
        game.roll(pins).expect("valid roll");
    }
}

const MIXED_GAME: [i64; 17] = [10, 7, 3, 9, 0, 10, 0, 8, 8, 2, 0, 6, 10, 10, 10, 8, 1];

#[test]
fn gutter_game_scores_zero() {
    let mut game = Game::new();
    roll_many(&mut game, 20, 0);
    assert_eq!(game.score(), 0);
    assert!(game.is_complete());
}

#[test]
fn all_ones_scores_twenty() {
    let mut game = Game::new();
    roll_many(&mut game, 20, 1);
    assert_eq!(game.score(), 20);
}

#[test]
fn perfect_game_scores_three_hundred() {
    let mut game = Game::new();
    roll_many(&mut game, 12, 10);
    assert_eq!(game.score(), 300);
    assert!(game.is_complete());
    assert!(game.frames().iter().all(|f| f.kind() == FrameKind::Strike));
}

#[test]
fn tenth_frame_strike_with_two_bonus_strikes() {
    let mut game = Game::new();
    roll_many(&mut game, 18, 0);
    roll_all(&mut game, &[10, 10, 10]);
    assert_eq!(game.score(), 30);

    let frames = game.frames();
    assert_eq!(frames.len(), 10);
    assert_eq!(frames[9].rolls().len(), 3);
}

#[test]
fn mixed_game_scores_one_sixty_seven() {
    let mut game = Game::new();
    roll_all(&mut game, &MIXED_GAME);
    assert_eq!(game.score(), 167);
    assert_eq!(
        game.frames().last().map(|f| f.running_total()),
        Some(game.score())
    );
}

#[test]
fn invalid_rolls_are_rejected_without_mutation() {
    let mut game = Game::new();
    roll_all(&mut game, &[3, 4]);

    let err = game.roll(-1).unwrap_err();
    assert_eq!(err, InvalidRollError::OutOfRange(-1));
    let err = game.roll(11).unwrap_err();
    assert_eq!(err, InvalidRollError::OutOfRange(11));

    assert_eq!(game.len(), 2);
    assert_eq!(game.score(), 7);
}

#[test]
fn extra_rolls_after_completion_do_not_change_score() {
    let mut game = Game::new();
    roll_all(&mut game, &MIXED_GAME);
    let complete = game.score();
    roll_all(&mut game, &[10, 10, 9]);
    assert_eq!(game.score(), complete);
}

#[test]
fn incomplete_game_scores_a_lower_bound() {
    let mut game = Game::new();
    roll_all(&mut game, &MIXED_GAME[..5]);
    assert!(!game.is_complete());
    // strike(10+7+3) + spare(10+9) + 9 + nothing yet
    assert_eq!(game.score(), 48);
}

#[test]
fn scoring_every_prefix_never_panics() {
    let mut game = Game::new();
    for &pins in MIXED_GAME.iter() {
        game.roll(pins).unwrap();
        let first = game.score();
        assert_eq!(first, game.score());
        assert!(first <= 300);
    }
}
