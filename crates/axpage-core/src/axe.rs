//! `axe`-backed automation driver.
//!
//! [`AxeDriver`] implements [`AutomationDriver`] on top of the third-party
//! `axe` accessibility CLI (`brew install cameroncooke/axe/axe`), which can
//! dump the accessibility hierarchy of a booted simulator and synthesize
//! taps and swipes. The CLI is synchronous, so every invocation runs inside
//! `spawn_blocking`.

use std::process::Command;

use async_trait::async_trait;
use tracing::debug;

use crate::driver::{AutomationDriver, DriverError};
use crate::element::UIElement;

/// Automation driver backed by the `axe` CLI for a single simulator.
pub struct AxeDriver {
    udid: String,
    connected: bool,
}

impl AxeDriver {
    /// Binds a driver to the simulator with the given UDID.
    ///
    /// Fails if the `axe` tool is not on the PATH.
    pub fn attach(udid: impl Into<String>) -> Result<Self, DriverError> {
        if !Self::is_installed() {
            return Err(DriverError::CommandFailed(
                "axe tool not found - install with: brew install cameroncooke/axe/axe".to_string(),
            ));
        }
        Ok(Self {
            udid: udid.into(),
            connected: true,
        })
    }

    /// Check if the `axe` tool is installed.
    pub fn is_installed() -> bool {
        Command::new("which")
            .arg("axe")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// The UDID of the simulator this driver targets.
    pub fn udid(&self) -> &str {
        &self.udid
    }

    /// Runs `axe` with the given arguments plus `--udid`, off the async
    /// runtime, and returns stdout.
    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>, DriverError> {
        let udid = self.udid.clone();
        debug!(command = ?args, "running axe");
        let output = tokio::task::spawn_blocking(move || {
            Command::new("axe")
                .args(&args)
                .args(["--udid", &udid])
                .output()
        })
        .await
        .map_err(|e| DriverError::CommandFailed(format!("axe task panicked: {}", e)))??;

        if !output.status.success() {
            return Err(DriverError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl AutomationDriver for AxeDriver {
    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn tap_location(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.run(vec![
            "tap".to_string(),
            "-x".to_string(),
            x.to_string(),
            "-y".to_string(),
            y.to_string(),
        ])
        .await?;
        Ok(())
    }

    // axe can tap by id directly; skip the local tree search.
    async fn tap_element(&self, identifier: &str) -> Result<(), DriverError> {
        self.run(vec![
            "tap".to_string(),
            "--id".to_string(),
            identifier.to_string(),
        ])
        .await?;
        Ok(())
    }

    async fn swipe(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        duration: Option<f64>,
    ) -> Result<(), DriverError> {
        let mut args = vec![
            "swipe".to_string(),
            "--start-x".to_string(),
            start_x.to_string(),
            "--start-y".to_string(),
            start_y.to_string(),
            "--end-x".to_string(),
            end_x.to_string(),
            "--end-y".to_string(),
            end_y.to_string(),
        ];
        if let Some(duration) = duration {
            args.push("--duration".to_string());
            args.push(duration.to_string());
        }
        self.run(args).await?;
        Ok(())
    }

    async fn dump_tree(&self) -> Result<Vec<UIElement>, DriverError> {
        let stdout = self.run(vec!["describe-ui".to_string()]).await?;
        serde_json::from_slice(&stdout).map_err(|e| DriverError::JsonParse(e.to_string()))
    }
}
