#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;
use stompguard_protocol::constants::CONTENT_TYPE;
use stompguard_protocol::{Command, Constraints, Frame, FrameConstraints};

#[derive(Debug, Arbitrary)]
struct Input {
    enabled: bool,
    enforce: bool,
    max_headers: u32,
    max_header_name_size: u32,
    max_header_value_size: u32,
    max_body_size: u32,
    allowed: Vec<(String, bool)>,
    command: String,
    headers: Vec<(String, String)>,
    content_type: Option<String>,
    body: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let constraints = Constraints {
        enabled: input.enabled,
        max_headers: input.max_headers,
        max_header_name_size: input.max_header_name_size,
        max_header_value_size: input.max_header_value_size,
        max_body_size: input.max_body_size,
        enforce_allowed_content_types: input.enforce,
        allowed_content_types: input.allowed.into_iter().collect::<HashMap<_, _>>(),
    };

    let command = input.command.parse().unwrap_or(Command::Send);
    let mut frame = Frame::new(command).with_body(input.body);
    if let Some(content_type) = input.content_type {
        frame.header.add(CONTENT_TYPE, content_type);
    }
    for (name, value) in input.headers {
        frame.header.add(name, value);
    }

    // Checks must never panic
    let results = [
        constraints.validate_max_headers(&frame),
        constraints.validate_body_len(frame.body.len()),
        constraints.validate_content_type(&frame),
    ];
    let mut header_results = Vec::new();
    for (name, value) in frame.header.iter() {
        header_results.push(constraints.validate_header_name_len(name.len()));
        header_results.push(constraints.validate_header_value_len(value.len()));
    }

    // Disabled or absent constraints never reject
    if !constraints.enabled {
        assert!(results.iter().chain(&header_results).all(Result::is_ok));
    }
    let absent: Option<&Constraints> = None;
    assert!(absent.validate_max_headers(&frame).is_ok());
    assert!(absent.validate_content_type(&frame).is_ok());
});
