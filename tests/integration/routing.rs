use std::sync::Mutex;

use remoteplay::{
    commands::{CommandLog, CommandTableEntry},
    session::{ConsoleTarget, DisplayMode, CREDENTIAL_LEN},
};

use crate::common::{
    host_entry, invoke, living_room_and_bedroom, RecordingRunner, RunnerCall, SettingsFixture,
};

static DISCOVER_CALLS: Mutex<Vec<Vec<String>>> = Mutex::new(Vec::new());

fn recording_discover(log: &CommandLog, argv: &[String]) -> i32 {
    assert_eq!(log.command(), "discover");
    assert!(!log.is_verbose());
    DISCOVER_CALLS
        .lock()
        .expect("call log is not poisoned")
        .push(argv.to_vec());
    42
}

const TEST_COMMANDS: &[CommandTableEntry] = &[CommandTableEntry {
    name: "discover",
    about: "Search the local network for consoles",
    handler: recording_discover,
}];

#[test]
fn list_prints_every_registered_host() {
    let fixture = SettingsFixture::new();
    fixture.write_default(&living_room_and_bedroom());
    let mut runner = RecordingRunner::default();

    let outcome = invoke(&fixture, &mut runner, &["list"], &[]);

    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.stdout, "Host: Living Room\nHost: Bedroom\n");
    assert!(runner.calls.is_empty());
}

#[test]
fn conflicting_display_flags_never_reach_the_runner() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner::default();

    let outcome = invoke(
        &fixture,
        &mut runner,
        &["stream", "--fullscreen", "--zoom"],
        &[],
    );

    assert_eq!(outcome.code, 1);
    assert!(
        outcome
            .stderr
            .contains("Must choose between fullscreen, zoom or stretch option"),
        "{}",
        outcome.stderr
    );
    assert_eq!(outcome.stderr.lines().count(), 1);
    assert!(runner.calls.is_empty());
}

#[test]
fn malformed_passcode_is_rejected() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner::default();

    let outcome = invoke(&fixture, &mut runner, &["stream", "--passcode", "12a4"], &[]);

    assert_eq!(outcome.code, 1);
    assert!(
        outcome.stderr.contains("Login passcode must be 4 digits"),
        "{}",
        outcome.stderr
    );
    assert!(runner.calls.is_empty());
}

#[test]
fn no_command_runs_main_once_with_the_last_used_profile() {
    let fixture = SettingsFixture::new();
    fixture.write_default("current_profile = \"couch\"\n");
    fixture.write_profile("couch", &living_room_and_bedroom());
    let mut runner = RecordingRunner::default();

    let outcome = invoke(&fixture, &mut runner, &[], &[]);

    assert_eq!(outcome.code, 0);
    assert_eq!(runner.calls.len(), 1);
    match &runner.calls[0] {
        RunnerCall::Main {
            settings,
            exit_app_on_stream_exit,
        } => {
            assert_eq!(settings.profile(), "couch");
            assert_eq!(settings.current_profile(), "couch");
            assert_eq!(settings.registered_hosts().len(), 2);
            assert!(!exit_app_on_stream_exit);
        }
        other => panic!("Unexpected runner call: {other:?}"),
    }
}

#[test]
fn runner_exit_code_is_forwarded() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner {
        exit_code: 3,
        ..RecordingRunner::default()
    };

    let outcome = invoke(&fixture, &mut runner, &["--exit-app-on-stream-exit"], &[]);

    assert_eq!(outcome.code, 3);
    assert!(matches!(
        runner.calls.as_slice(),
        [RunnerCall::Main {
            exit_app_on_stream_exit: true,
            ..
        }]
    ));
}

#[test]
fn external_command_receives_its_tokens_verbatim() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner::default();

    let outcome = invoke(
        &fixture,
        &mut runner,
        &["discover", "--timeout", "5"],
        TEST_COMMANDS,
    );

    assert_eq!(outcome.code, 42);
    assert!(runner.calls.is_empty());
    let calls = DISCOVER_CALLS.lock().expect("call log is not poisoned");
    assert_eq!(
        calls.as_slice(),
        [vec![
            "discover".to_string(),
            "--timeout".to_string(),
            "5".to_string()
        ]]
    );
}

#[test]
fn unknown_command_prints_usage_and_fails() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner::default();

    let outcome = invoke(&fixture, &mut runner, &["frobnicate"], TEST_COMMANDS);

    assert_eq!(outcome.code, 1);
    assert!(
        outcome.stderr.contains("Unrecognized command `frobnicate`"),
        "{}",
        outcome.stderr
    );
    assert!(outcome.stdout.contains("Usage"), "{}", outcome.stdout);
    assert!(outcome.stdout.contains("discover"), "{}", outcome.stdout);
    assert!(runner.calls.is_empty());
}

#[test]
fn help_word_is_an_unrecognized_command() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner::default();

    let outcome = invoke(&fixture, &mut runner, &["help"], TEST_COMMANDS);

    assert_eq!(outcome.code, 1);
    assert!(
        outcome.stderr.contains("Unrecognized command `help`"),
        "{}",
        outcome.stderr
    );
    assert!(outcome.stdout.contains("Usage"), "{}", outcome.stdout);
    assert!(runner.calls.is_empty());
}

#[test]
fn explicit_profile_is_persisted_for_the_next_launch() {
    let fixture = SettingsFixture::new();
    fixture.write_default(&living_room_and_bedroom());
    fixture.write_profile("desk", &host_entry(
        "Desk Console",
        "00000000000000000000000000000003",
        "00000000000000000000000000000004",
    ));
    let mut runner = RecordingRunner::default();

    let outcome = invoke(&fixture, &mut runner, &["--profile", "desk", "list"], &[]);
    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.stdout, "Host: Desk Console\n");
    assert!(fixture.read_default().contains("current_profile = \"desk\""));
    assert!(fixture.read_default().contains("Living Room"));

    let outcome = invoke(&fixture, &mut runner, &[], &[]);
    assert_eq!(outcome.code, 0);
    match runner.calls.as_slice() {
        [RunnerCall::Main { settings, .. }] => {
            assert_eq!(settings.profile(), "desk");
            assert_eq!(settings.registered_hosts()[0].nickname, "Desk Console");
        }
        other => panic!("Unexpected runner calls: {other:?}"),
    }
}

#[test]
fn stream_keeps_registered_credentials_byte_exact() {
    let fixture = SettingsFixture::new();
    fixture.write_default(&host_entry(
        "Living Room",
        "61620063000000000000000000000000",
        "00ff00ff00ff00ff00ff00ff00ff0000",
    ));
    let mut runner = RecordingRunner::default();

    let outcome = invoke(
        &fixture,
        &mut runner,
        &["stream", "Living Room", "10.0.0.2", "--stretch", "--passcode", "0420"],
        &[],
    );

    assert_eq!(outcome.code, 0, "{}", outcome.stderr);
    match runner.calls.as_slice() {
        [RunnerCall::Stream(info)] => {
            let mut key = [0u8; CREDENTIAL_LEN];
            key[..4].copy_from_slice(b"ab\0c");
            assert_eq!(info.regist_key().as_bytes(), &key);
            let mut morning = [0u8; CREDENTIAL_LEN];
            for pair in morning[..14].chunks_mut(2) {
                pair[1] = 0xff;
            }
            assert_eq!(info.morning().as_bytes(), &morning);
            assert_eq!(info.host(), "10.0.0.2");
            assert_eq!(info.nickname(), "Living Room");
            assert_eq!(info.target(), ConsoleTarget::Ps4V10);
            assert_eq!(info.display_mode(), DisplayMode::Stretch);
            assert_eq!(info.passcode().map(|code| code.as_str()), Some("0420"));
        }
        other => panic!("Unexpected runner calls: {other:?}"),
    }
}

#[test]
fn stream_accepts_credentials_from_flags() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner::default();

    let outcome = invoke(
        &fixture,
        &mut runner,
        &[
            "stream",
            "Anywhere",
            "10.0.0.9",
            "--registkey",
            "876c0c48",
            "--morning",
            "a9be6ef0bf873f1b84e11ff35782c706",
            "--dualsense",
        ],
        &[],
    );

    assert_eq!(outcome.code, 0, "{}", outcome.stderr);
    match runner.calls.as_slice() {
        [RunnerCall::Stream(info)] => {
            assert_eq!(&info.regist_key().as_bytes()[..8], b"876c0c48");
            assert_eq!(&info.regist_key().as_bytes()[8..], &[0u8; 8]);
            assert_eq!(info.morning().to_hex(), "a9be6ef0bf873f1b84e11ff35782c706");
            assert!(info.dualsense());
        }
        other => panic!("Unexpected runner calls: {other:?}"),
    }
}

#[test]
fn oversized_flag_key_is_rejected() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner::default();

    let outcome = invoke(
        &fixture,
        &mut runner,
        &[
            "stream",
            "Anywhere",
            "10.0.0.9",
            "--registkey",
            "0123456789abcdefX",
            "--morning",
            "a9be6ef0bf873f1b84e11ff35782c706",
        ],
        &[],
    );

    assert_eq!(outcome.code, 1);
    assert!(outcome.stderr.contains("Registration key is too long"), "{}", outcome.stderr);
    assert!(runner.calls.is_empty());
}

#[test]
fn unknown_nickname_is_reported() {
    let fixture = SettingsFixture::new();
    fixture.write_default(&living_room_and_bedroom());
    let mut runner = RecordingRunner::default();

    let outcome = invoke(&fixture, &mut runner, &["stream", "Garage", "10.0.0.2"], &[]);

    assert_eq!(outcome.code, 1);
    assert!(
        outcome.stderr.contains("No registered host named `Garage`"),
        "{}",
        outcome.stderr
    );
    assert!(runner.calls.is_empty());
}

#[test]
fn unsafe_profile_name_is_rejected_without_writing() {
    let fixture = SettingsFixture::new();
    let mut runner = RecordingRunner::default();

    let outcome = invoke(&fixture, &mut runner, &["--profile", "../outside"], &[]);

    assert_eq!(outcome.code, 1);
    assert!(outcome.stderr.contains("Invalid profile name"), "{}", outcome.stderr);
    assert!(fixture.read_default().is_empty());
    assert!(runner.calls.is_empty());
}
