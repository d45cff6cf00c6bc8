#![allow(dead_code)]
//! Shared helpers for the CLI integration tests.

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ADMIN: &str = "zeta1admin";
pub const ETH_CONTRACT: &str = "0x5f0b1a82749cb4e2278ec87f8bf6b618dc71a8bf";
pub const UNREGISTERED: &str = "0x9fd96203f7b22bcf72d9dcb40ff98302376ce09c";

/// A temp directory holding one session state file.
pub struct Session {
    _dir: TempDir,
    pub state_file: PathBuf,
}

impl Session {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let state_file = dir.path().join("state.json");
        Self {
            _dir: dir,
            state_file,
        }
    }

    /// `fungible-admin` bound to this session's state file.
    pub fn cmd(&self) -> Command {
        admin_cmd(&self.state_file)
    }

    /// Run with `--json` and parse stdout; panics if the command fails.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .arg("--json")
            .args(args)
            .output()
            .expect("run fungible-admin");
        assert!(
            output.status.success(),
            "{:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("json output")
    }

    /// Session with [`ADMIN`] configured and ETH deployed at fee 0.
    pub fn with_eth() -> Self {
        let session = Self::new();
        session
            .cmd()
            .args(["init", "--admin", ADMIN])
            .assert()
            .success();
        session
            .cmd()
            .args([
                "deploy",
                "--contract",
                ETH_CONTRACT,
                "--symbol",
                "ETH",
                "--name",
                "Ether",
                "--chain-id",
                "5",
            ])
            .assert()
            .success();
        session
    }
}

pub fn admin_cmd(state_file: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("fungible-admin").expect("binary not found");
    cmd.env_remove("FUNGIBLE_ADMIN_STATE")
        .env_remove("FUNGIBLE_MODULE_ADDRESS")
        .env_remove("FUNGIBLE_CALL_GAS_LIMIT")
        .arg("--state-file")
        .arg(state_file);
    cmd
}
