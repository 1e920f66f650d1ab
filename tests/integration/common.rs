#![allow(dead_code)]

use std::{fs, path::Path};

use remoteplay::{
    cli::{parse_launch_args, run_launch},
    commands::CommandTableEntry,
    runner::AppRunner,
    session::StreamConnectInfo,
    settings::{FileSettingsStore, Settings},
};
use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_remoteplay");

/// Settings root in a temporary directory.
pub struct SettingsFixture {
    dir: TempDir,
}

impl SettingsFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("can create temporary directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_default(&self, content: &str) -> &Self {
        fs::write(self.root().join("settings.toml"), content).expect("can write settings.toml");
        self
    }

    pub fn write_profile(&self, profile: &str, content: &str) -> &Self {
        let dir = self.root().join("profiles");
        fs::create_dir_all(&dir).expect("can create profiles dir");
        fs::write(dir.join(format!("{profile}.toml")), content).expect("can write profile");
        self
    }

    pub fn read_default(&self) -> String {
        fs::read_to_string(self.root().join("settings.toml")).unwrap_or_default()
    }

    pub fn store(&self) -> FileSettingsStore {
        FileSettingsStore::new(self.root())
    }
}

/// One `[[registered_hosts]]` table.
pub fn host_entry(nickname: &str, regist_key_hex: &str, morning_hex: &str) -> String {
    format!(
        "[[registered_hosts]]\nnickname = \"{nickname}\"\naddress = \"192.168.1.20\"\nregist_key = \"{regist_key_hex}\"\nmorning = \"{morning_hex}\"\n\n"
    )
}

pub fn living_room_and_bedroom() -> String {
    let mut document = host_entry(
        "Living Room",
        "38373663306334380000000000000000",
        "a9be6ef0bf873f1b84e11ff35782c706",
    );
    document.push_str(&host_entry(
        "Bedroom",
        "00000000000000000000000000000001",
        "00000000000000000000000000000002",
    ));
    document
}

#[derive(Debug)]
pub enum RunnerCall {
    Main {
        settings: Settings,
        exit_app_on_stream_exit: bool,
    },
    Stream(StreamConnectInfo),
}

/// Runner that records every call and returns a fixed exit code.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<RunnerCall>,
    pub exit_code: i32,
}

impl AppRunner for RecordingRunner {
    fn run_main(&mut self, settings: Settings, exit_app_on_stream_exit: bool) -> i32 {
        self.calls.push(RunnerCall::Main {
            settings,
            exit_app_on_stream_exit,
        });
        self.exit_code
    }

    fn run_stream(&mut self, connect_info: StreamConnectInfo) -> i32 {
        self.calls.push(RunnerCall::Stream(connect_info));
        self.exit_code
    }
}

pub struct Outcome {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run one invocation in-process against the fixture's settings root.
pub fn invoke(
    fixture: &SettingsFixture,
    runner: &mut RecordingRunner,
    args: &[&str],
    commands: &[CommandTableEntry],
) -> Outcome {
    let argv = std::iter::once("remoteplay").chain(args.iter().copied());
    let parsed = parse_launch_args(argv, commands).expect("arguments parse");
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run_launch(
        parsed,
        &fixture.store(),
        runner,
        commands,
        &mut stdout,
        &mut stderr,
    );
    Outcome {
        code,
        stdout: String::from_utf8(stdout).expect("stdout is utf-8"),
        stderr: String::from_utf8(stderr).expect("stderr is utf-8"),
    }
}
