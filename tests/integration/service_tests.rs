//! Integration tests for the DashboardService cycle: connectivity →
//! pollers → derived state → frame → indicator → sleep.

use serde_json::json;
use weatherdash::adapters::http::CannedReply;
use weatherdash::app::events::AppEvent;
use weatherdash::app::service::DashboardService;
use weatherdash::error::{FetchError, SensorError};
use weatherdash::layout::Field;
use weatherdash::palette::{Tone, WarningLevel};
use weatherdash::pollers::{PollOutcome, Source};

use super::mock_board::{API_NOW, MockBoard, READING, RecordingSink, air_quality_body, weather_body};

fn make_service(board: &MockBoard) -> (DashboardService, RecordingSink) {
    let mut service = DashboardService::new(board.config.clone());
    let mut sink = RecordingSink::new();
    service.start(&mut sink);
    (service, sink)
}

fn run(service: &mut DashboardService, board: &mut MockBoard, sink: &mut RecordingSink, cycles: usize) {
    for _ in 0..cycles {
        service.tick(board, sink).expect("cycle should complete");
    }
}

fn polls_of(sink: &RecordingSink, wanted: Source) -> usize {
    sink.count(|e| matches!(e, AppEvent::SourcePolled { source, .. } if *source == wanted))
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn first_cycle_fills_every_field() {
    let mut board = MockBoard::new();
    let (mut service, mut sink) = make_service(&board);

    let report = service.tick(&mut board, &mut sink).unwrap();

    assert!(report.connected);
    assert_eq!(report.cycle, 1);
    assert_eq!(report.outcome(Source::Weather), Some(&PollOutcome::Updated));
    assert_eq!(report.outcome(Source::AirQuality), Some(&PollOutcome::Updated));
    assert_eq!(report.outcome(Source::Inside), Some(&PollOutcome::Updated));

    assert_eq!(board.text(Field::Temperature), "72");
    assert_eq!(board.text(Field::Humidity), "50%");
    assert_eq!(board.text(Field::Conditions), "Light rain");
    assert_eq!(board.text(Field::Date), "Tue, Nov 14");
    assert_eq!(board.text(Field::Time), "21:13");
    assert_eq!(board.text(Field::AirQuality), "Air Quality:  Moderate");
    assert_eq!(board.text(Field::Uv), "UV Danger:  Medium");
    assert_eq!(board.text(Field::Flex), "North winds at 11mph, 1013mb");
    assert_eq!(board.text(Field::Inside), "Inside:   72   45%   612ppm");

    let tones = service.state().display.tones;
    assert_eq!(tones.temperature, Tone::Mild);
    assert_eq!(tones.humidity, Tone::Fair);
    assert_eq!(tones.uv, Tone::Fair);
    assert_eq!(tones.air_quality, Tone::Fair);

    assert_eq!(board.indicator, vec![WarningLevel::AllGood]);
    assert_eq!(board.brightness, vec![0.51]);
    assert_eq!(board.sleeps, vec![10], "cycle should end with the idle sleep");
}

#[test]
fn events_follow_cycle_order() {
    let mut board = MockBoard::new();
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);

    assert!(matches!(sink.events.first(), Some(AppEvent::Started)));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SourcePolled { .. })), 3);
    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::FlexChanged { text } if text == "North winds at 11mph, 1013mb")),
        "flex change should be announced"
    );
    assert!(matches!(sink.events.last(), Some(AppEvent::CycleCompleted(_))));
}

#[test]
fn bright_room_uses_bright_backlight() {
    let mut board = MockBoard::new();
    board.ambient = 1_500;
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.brightness, vec![0.89]);
}

// ── Cadence ───────────────────────────────────────────────────

#[test]
fn sources_refresh_on_their_own_intervals() {
    let mut board = MockBoard::new();
    let (mut service, mut sink) = make_service(&board);

    // Cycles start every 10s: the 61st begins 600s after the first.
    run(&mut service, &mut board, &mut sink, 61);
    assert_eq!(board.weather_requests(), 1, "600s is not past the 601s interval");

    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.weather_requests(), 2, "610s is past the 601s interval");
    assert_eq!(board.air_quality_requests(), 1);

    // Sensor every 50s (first cycle past 47s): cycles 0, 5, …, 60.
    assert_eq!(polls_of(&sink, Source::Inside), 13);
}

// ── API failures become display content ───────────────────────

#[test]
fn weather_http_error_shows_status_and_placeholders() {
    let mut board = MockBoard::new();
    board.set_weather(CannedReply::Body(500, String::from("oops")));
    let (mut service, mut sink) = make_service(&board);
    let report = service.tick(&mut board, &mut sink).unwrap();

    assert_eq!(report.outcome(Source::Weather), Some(&PollOutcome::HttpStatus(500)));
    assert_eq!(board.text(Field::Flex), "Weather API response: 500");
    assert_eq!(board.text(Field::Temperature), "--");
    assert_eq!(board.text(Field::Time), "--:--", "no correction without a good fetch");
    assert_eq!(service.state().display.flex.tone, Tone::Moderate);
    assert_eq!(board.text(Field::AirQuality), "Air Quality:  Moderate");
}

#[test]
fn transport_failure_reports_status_zero() {
    let mut board = MockBoard::new();
    board.set_weather(CannedReply::Fail(FetchError::ConnectFailed));
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.text(Field::Flex), "Weather API response: 0");
}

#[test]
fn air_quality_error_shows_after_weather_is_fine() {
    let mut board = MockBoard::new();
    board.set_air_quality(CannedReply::Body(401, String::new()));
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.text(Field::Flex), "Air Quality API response: 401");
    assert_eq!(board.text(Field::AirQuality), "Air Quality:  --");
}

#[test]
fn empty_air_quality_list_is_unknown() {
    let mut board = MockBoard::new();
    board.set_air_quality(CannedReply::Body(200, json!({ "list": [] }).to_string()));
    let (mut service, mut sink) = make_service(&board);
    let report = service.tick(&mut board, &mut sink).unwrap();

    assert_eq!(report.outcome(Source::AirQuality), Some(&PollOutcome::NoData));
    assert_eq!(board.text(Field::AirQuality), "Air Quality:  --");
    assert_eq!(board.text(Field::Flex), "North winds at 11mph, 1013mb");
}

#[test]
fn clock_correction_survives_a_failed_weather_poll() {
    let mut board = MockBoard::new();
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);
    let correction = service.state().clock_correction;
    assert!(correction.is_some());

    board.set_weather(CannedReply::Body(503, String::new()));
    run(&mut service, &mut board, &mut sink, 61);

    assert_eq!(board.weather_requests(), 2);
    assert_eq!(service.state().clock_correction, correction);
    assert_eq!(board.text(Field::Temperature), "--");
    assert_eq!(board.text(Field::Time), "21:23", "time keeps running from the old correction");
    assert_eq!(board.text(Field::Flex), "Weather API response: 503");
}

// ── Flex priorities end to end ────────────────────────────────

#[test]
fn active_alert_turns_led_red() {
    let mut board = MockBoard::new();
    let mut body = weather_body();
    body["alerts"] = json!([{
        "event": "Wind Advisory",
        "start": API_NOW - 60,
        "end": API_NOW + 3_600
    }]);
    board.set_weather(CannedReply::Body(200, body.to_string()));
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);

    assert_eq!(board.text(Field::Flex), "Wind Advisory");
    assert_eq!(service.state().display.flex.tone, Tone::Bad);
    assert_eq!(board.indicator, vec![WarningLevel::RedAlert]);
}

#[test]
fn sunrise_countdown_inside_the_hour() {
    let mut board = MockBoard::new();
    let mut body = weather_body();
    body["current"]["sunrise"] = json!(API_NOW + 30 * 60);
    board.set_weather(CannedReply::Body(200, body.to_string()));
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.text(Field::Flex), "30 minutes to sunrise");

    // Ten seconds later it still rounds to 30.
    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.text(Field::Flex), "30 minutes to sunrise");
}

// ── Connectivity ──────────────────────────────────────────────

#[test]
fn offline_cycle_skips_network_and_warns() {
    let mut board = MockBoard::new();
    board.wifi.set_ap_available(false);
    let (mut service, mut sink) = make_service(&board);
    let report = service.tick(&mut board, &mut sink).unwrap();

    assert!(!report.connected);
    assert!(board.http.requests().is_empty(), "no HTTP while offline");
    assert_eq!(report.outcome(Source::Weather), None);
    assert_eq!(report.outcome(Source::Inside), Some(&PollOutcome::Updated));
    assert_eq!(board.wifi.attempts(), 1, "one association attempt per cycle");

    assert_eq!(board.text(Field::Flex), "NO INTERNET CONNECTION");
    assert_eq!(service.state().display.flex.tone, Tone::VeryBad);
    assert_eq!(board.indicator, vec![WarningLevel::YellowAlert]);
}

#[test]
fn reconnect_fetches_sources_skipped_while_offline() {
    let mut board = MockBoard::new();
    board.wifi.set_ap_available(false);
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.weather_requests(), 0);

    board.wifi.set_ap_available(true);
    let report = service.tick(&mut board, &mut sink).unwrap();

    assert!(report.connected);
    assert_eq!(board.weather_requests(), 1);
    assert_eq!(board.air_quality_requests(), 1);
    assert_eq!(report.outcome(Source::Inside), None, "sensor ran 10s ago");
    assert_eq!(board.indicator.last(), Some(&WarningLevel::AllGood));
}

// ── Indoor sensor ─────────────────────────────────────────────

#[test]
fn absent_sensor_zeroes_inside_line() {
    let mut board = MockBoard::new();
    board.climate.clear();
    board.climate.push_back(Err(SensorError::NotPresent));
    let (mut service, mut sink) = make_service(&board);
    let report = service.tick(&mut board, &mut sink).unwrap();

    assert_eq!(report.outcome(Source::Inside), Some(&PollOutcome::SensorAbsent));
    assert_eq!(board.text(Field::Inside), "Inside:   0   0%   0ppm");
}

#[test]
fn lost_sensor_zeroes_previous_reading() {
    let mut board = MockBoard::new();
    board.climate.clear();
    board.climate.push_back(Ok(Some(READING)));
    board.climate.push_back(Err(SensorError::BusError));
    let (mut service, mut sink) = make_service(&board);

    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.text(Field::Inside), "Inside:   72   45%   612ppm");

    // Next sensor poll is the cycle at +50s.
    run(&mut service, &mut board, &mut sink, 4);
    assert_eq!(board.text(Field::Inside), "Inside:   72   45%   612ppm");
    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.text(Field::Inside), "Inside:   0   0%   0ppm");
}

#[test]
fn worst_air_quality_is_very_bad() {
    let mut board = MockBoard::new();
    board.set_air_quality(CannedReply::Body(200, air_quality_body(5).to_string()));
    let (mut service, mut sink) = make_service(&board);
    run(&mut service, &mut board, &mut sink, 1);
    assert_eq!(board.text(Field::AirQuality), "Air Quality:  Very Unhealthy");
    assert_eq!(service.state().display.tones.air_quality, Tone::VeryBad);
}
