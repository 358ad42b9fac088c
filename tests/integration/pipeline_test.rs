//! Full-frame checks as a decoder would run them

use super::enforcing_constraints;
use stompguard_protocol::constants::CONTENT_TYPE;
use stompguard_protocol::{Command, ConstraintError, Constraints, Frame, CONSTRAINTS_MAX};
use stompguard_tests::{check_frame, frame_with_headers, send_frame};

#[test]
fn test_accepts_well_formed_send() {
    let constraints = enforcing_constraints();
    let frame = send_frame(Some("text/plain"), "hello");
    assert!(check_frame(&constraints, &frame).is_ok());
}

#[test]
fn test_rejections_by_reason() {
    let constraints = enforcing_constraints();

    let cases = [
        (
            send_frame(Some("application/json"), "{}"),
            "listed but not allowed",
        ),
        (send_frame(Some("application/xml"), "<a/>"), "unlisted"),
    ];
    for (frame, case) in cases {
        assert!(
            matches!(
                check_frame(&constraints, &frame),
                Err(ConstraintError::InvalidContentType { .. })
            ),
            "{case}"
        );
    }

    assert!(matches!(
        check_frame(&constraints, &send_frame(None, "payload")),
        Err(ConstraintError::MissingContentType {
            command: Command::Send,
            ..
        })
    ));
    assert!(check_frame(&constraints, &send_frame(None, "")).is_ok());
}

#[test]
fn test_header_checks_run_before_frame_checks() {
    let constraints = enforcing_constraints();
    let frame = send_frame(None, "payload").with_header("x-big", "v".repeat(4097));

    assert!(matches!(
        check_frame(&constraints, &frame),
        Err(ConstraintError::HeaderValueTooLarge {
            len: 4097,
            limit: 4096
        })
    ));
}

#[test]
fn test_long_header_name() {
    let constraints = enforcing_constraints();
    let frame = Frame::new(Command::Subscribe).with_header("n".repeat(257), "v");

    assert_eq!(
        check_frame(&constraints, &frame),
        Err(ConstraintError::HeaderNameTooLarge {
            len: 257,
            limit: 256
        })
    );
}

#[test]
fn test_non_body_commands_skip_missing_type() {
    let constraints = enforcing_constraints();

    for command in [
        Command::Connect,
        Command::Stomp,
        Command::Subscribe,
        Command::Unsubscribe,
        Command::Ack,
        Command::Nack,
        Command::Begin,
        Command::Commit,
        Command::Abort,
        Command::Disconnect,
        Command::Connected,
        Command::Receipt,
    ] {
        let frame = Frame::new(command).with_body("unexpected body");
        assert!(check_frame(&constraints, &frame).is_ok(), "{command}");
    }
}

#[test]
fn test_body_bearing_commands_require_type() {
    let constraints = enforcing_constraints();

    for command in [Command::Send, Command::Message, Command::Error] {
        let with_body = Frame::new(command).with_body("x");
        assert!(
            matches!(
                check_frame(&constraints, &with_body),
                Err(ConstraintError::MissingContentType { .. })
            ),
            "{command}"
        );

        let typed = with_body.with_header(CONTENT_TYPE, "text/plain");
        assert!(check_frame(&constraints, &typed).is_ok(), "{command}");
    }
}

#[test]
fn test_disabled_accepts_pathological_frames() {
    let mut constraints = enforcing_constraints();
    constraints.enabled = false;
    constraints.max_headers = 0;
    constraints.max_header_name_size = 0;
    constraints.max_header_value_size = 0;
    constraints.max_body_size = 0;

    let frames = [
        Frame::new(Command::Send),
        send_frame(None, vec![0u8; 2 * 1024 * 1024]),
        send_frame(Some("application/json"), "{}"),
        frame_with_headers(Command::Message, 10_000).with_body("x"),
    ];
    for frame in &frames {
        assert!(check_frame(&constraints, frame).is_ok());
    }
}

#[test]
fn test_absent_and_disabled_agree() {
    let absent: Option<Constraints> = None;
    let disabled = Some(Constraints::new());

    let frames = [
        send_frame(None, "payload"),
        send_frame(Some("application/json"), vec![1u8; 2 * 1024 * 1024]),
        frame_with_headers(Command::Send, 100),
    ];
    for frame in &frames {
        assert_eq!(check_frame(&absent, frame), check_frame(&disabled, frame));
        assert!(check_frame(&absent, frame).is_ok());
    }
}

#[test]
fn test_single_limit_disabled() {
    let mut constraints = enforcing_constraints();
    constraints.max_headers = CONSTRAINTS_MAX;

    let many = frame_with_headers(Command::Subscribe, 1000);
    assert!(check_frame(&constraints, &many).is_ok());

    let big_body = send_frame(Some("text/plain"), vec![0u8; 1_048_577]);
    assert!(matches!(
        check_frame(&constraints, &big_body),
        Err(ConstraintError::BodyTooLarge { .. })
    ));
}

#[test]
fn test_header_count_sweep() {
    let mut constraints = Constraints::new();
    constraints.enabled = true;
    constraints.max_headers = 8;

    for count in 0..=16 {
        let frame = frame_with_headers(Command::Subscribe, count);
        let result = constraints.validate_max_headers(&frame);
        assert_eq!(result.is_err(), count > 8, "count {count}");
    }
}

#[test]
fn test_length_sweeps() {
    let mut constraints = Constraints::new();
    constraints.enabled = true;
    constraints.max_header_name_size = 16;
    constraints.max_header_value_size = 16;
    constraints.max_body_size = 16;

    for len in 0..=32 {
        let over = len > 16;
        assert_eq!(constraints.validate_header_name_len(len).is_err(), over);
        assert_eq!(constraints.validate_header_value_len(len).is_err(), over);
        assert_eq!(constraints.validate_body_len(len).is_err(), over);
    }
}
