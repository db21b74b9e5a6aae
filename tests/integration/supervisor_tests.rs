//! Integration tests for the restart supervisor.

use weatherdash::app::events::AppEvent;
use weatherdash::app::supervisor::{Supervisor, SupervisorStats};
use weatherdash::error::{DisplayError, Error};
use weatherdash::layout::Field;

use super::mock_board::{MockBoard, RecordingSink};

fn make_supervisor(board: &MockBoard) -> (Supervisor, RecordingSink) {
    (Supervisor::new(board.config.clone()), RecordingSink::new())
}

#[test]
fn healthy_cycles_never_restart() {
    let mut board = MockBoard::new();
    let (mut sup, mut sink) = make_supervisor(&board);

    let stats = sup.run_cycles(3, &mut board, &mut sink);

    assert_eq!(
        stats,
        SupervisorStats {
            cycles_completed: 3,
            cycles_failed: 0,
            restarts: 0,
        }
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Started)), 1, "service starts once");
    assert_eq!(board.sleeps, vec![10, 10, 10]);
    assert_eq!(sup.service().cycle_count(), 3);
}

#[test]
fn render_failure_restarts_with_fresh_state() {
    let mut board = MockBoard::new();
    let (mut sup, mut sink) = make_supervisor(&board);

    assert!(sup.step(&mut board, &mut sink));
    assert!(sup.service().state().clock_correction.is_some());

    board.failing_renders = 1;
    assert!(!sup.step(&mut board, &mut sink), "failed cycle reports false");

    // The failed cycle never reached its idle sleep; the cooldown replaces it.
    assert_eq!(board.sleeps, vec![10, 20]);
    assert_eq!(sup.stats().cycles_failed, 1);
    assert_eq!(sup.stats().restarts, 1);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::CycleFailed(Error::Display(DisplayError::DrawFailed))
    )));
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::Restarted { restarts: 1 })));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Started)), 2);

    // Everything, the clock correction included, is back at sentinel.
    assert_eq!(sup.service().state().clock_correction, None);
    assert_eq!(sup.service().cycle_count(), 0);
}

#[test]
fn restarted_service_polls_everything_again() {
    let mut board = MockBoard::new();
    let (mut sup, mut sink) = make_supervisor(&board);
    sup.step(&mut board, &mut sink);
    board.failing_renders = 1;
    sup.step(&mut board, &mut sink);
    assert_eq!(board.weather_requests(), 1, "nothing was due during the failed cycle");

    assert!(sup.step(&mut board, &mut sink));

    assert_eq!(board.weather_requests(), 2, "fresh scheduler polls immediately");
    assert_eq!(board.air_quality_requests(), 2);
    assert_eq!(board.text(Field::Temperature), "72");
    assert!(sup.service().state().clock_correction.is_some());
}

#[test]
fn repeated_failures_keep_the_loop_alive() {
    let mut board = MockBoard::new();
    board.failing_renders = 3;
    let (mut sup, mut sink) = make_supervisor(&board);

    let stats = sup.run_cycles(4, &mut board, &mut sink);

    assert_eq!(stats.cycles_failed, 3);
    assert_eq!(stats.restarts, 3);
    assert_eq!(stats.cycles_completed, 1);
    assert_eq!(board.frames.len(), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CycleFailed(_))), 3);
}
