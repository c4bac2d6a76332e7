use std::io::Cursor;

use annotate::config::SessionConfig;
use annotate::doc::Annotation;

use super::*;

fn run(script: &str) -> Session {
    let mut session = Session::new(SessionConfig::new("script.png"));
    for event in parse_script(Cursor::new(script)).unwrap() {
        apply(&mut session, &event);
    }
    session
}

#[test]
fn parses_events_and_skips_comments() {
    let script = "# setup\n\n{\"event\":\"viewport\",\"width\":100,\"height\":50}\n{\"event\":\"up\"}\n";
    let events = parse_script(Cursor::new(script)).unwrap();
    assert_eq!(events, vec![ScriptEvent::Viewport { width: 100.0, height: 50.0 }, ScriptEvent::Up]);
}

#[test]
fn parses_mode_and_speed() {
    let script = "{\"event\":\"mode\",\"mode\":\"content\"}\n{\"event\":\"speed\",\"speed\":\"fast\"}\n";
    let events = parse_script(Cursor::new(script)).unwrap();
    assert_eq!(events, vec![ScriptEvent::Mode { mode: Mode::Content }, ScriptEvent::Speed { speed: Speed::Fast }]);
}

#[test]
fn bad_line_reports_line_number() {
    let script = "{\"event\":\"up\"}\n{\"event\":\"jump\"}\n";
    let err = parse_script(Cursor::new(script)).unwrap_err();
    assert!(matches!(err, CliError::Script { line: 2, .. }));
}

#[test]
fn replay_motion_gesture() {
    let session = run(concat!(
        "{\"event\":\"image_loaded\",\"width\":1920,\"height\":1080}\n",
        "{\"event\":\"viewport\",\"width\":200,\"height\":100}\n",
        "{\"event\":\"speed\",\"speed\":\"slow\"}\n",
        "{\"event\":\"down\",\"x\":20,\"y\":10}\n",
        "{\"event\":\"move\",\"x\":180,\"y\":90}\n",
        "{\"event\":\"up\"}\n",
    ));
    let [Annotation::Motion(m)] = session.annotations() else {
        panic!("expected exactly one motion annotation");
    };
    assert_eq!(m.start_point, Point::new(10.0, 10.0));
    assert_eq!(m.end_point, Point::new(90.0, 90.0));
    assert_eq!(m.speed, Speed::Slow);
}

#[test]
fn replay_content_with_description() {
    let session = run(concat!(
        "{\"event\":\"image_loaded\",\"width\":10,\"height\":10}\n",
        "{\"event\":\"viewport\",\"width\":100,\"height\":100}\n",
        "{\"event\":\"mode\",\"mode\":\"content\"}\n",
        "{\"event\":\"down\",\"x\":40,\"y\":40}\n",
        "{\"event\":\"move\",\"x\":50,\"y\":50}\n",
        "{\"event\":\"up\"}\n",
        "{\"event\":\"describe\",\"text\":\"open the window\"}\n",
    ));
    let [Annotation::Content(c)] = session.annotations() else {
        panic!("expected exactly one content annotation");
    };
    assert_eq!(c.description, "open the window");
}

#[test]
fn replay_without_image_does_nothing() {
    let session = run(concat!(
        "{\"event\":\"viewport\",\"width\":100,\"height\":100}\n",
        "{\"event\":\"down\",\"x\":0,\"y\":0}\n",
        "{\"event\":\"move\",\"x\":50,\"y\":50}\n",
        "{\"event\":\"up\"}\n",
    ));
    assert!(session.annotations().is_empty());
}
