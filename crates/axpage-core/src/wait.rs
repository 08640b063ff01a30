//! Polling waits for element visibility.
//!
//! UI rendering is asynchronous; instead of fixed sleeps, callers poll the
//! accessibility tree until a locator resolves to a visible element or a
//! timeout elapses. The wait never blocks past its timeout.

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::driver::{AutomationDriver, DriverError};
use crate::element::UIElement;
use crate::locator::ElementLocator;

/// Errors produced by polling waits.
#[derive(Error, Debug)]
pub enum WaitError {
    /// The element did not become visible (or gone) within the timeout.
    #[error("Timeout after {elapsed_ms}ms waiting for {locator}")]
    Timeout {
        /// Display form of the locator that was being resolved.
        locator: String,
        /// How long the wait actually ran, in milliseconds.
        elapsed_ms: u64,
    },

    /// The driver session is closed; polling cannot proceed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Blocks until the locator resolves to a visible element, polling the tree
/// at `poll_interval`.
///
/// An element that exists but is reported as not hittable does not satisfy
/// the wait. Transient driver errors during a poll are retried until the
/// timeout; a closed session fails immediately.
pub async fn wait_for_visible(
    driver: &dyn AutomationDriver,
    locator: &ElementLocator,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<UIElement, WaitError> {
    let start = Instant::now();
    loop {
        if !driver.is_connected() {
            return Err(WaitError::Driver(DriverError::NotConnected));
        }

        match driver.find_element(locator).await {
            Ok(Some(element)) if element.is_visible() => {
                debug!(%locator, elapsed_ms = start.elapsed().as_millis() as u64, "element visible");
                return Ok(element);
            }
            Ok(Some(_)) => trace!(%locator, "element present but not hittable"),
            Ok(None) => trace!(%locator, "element not yet in tree"),
            Err(e) => trace!(%locator, error = %e, "poll failed, retrying"),
        }

        if start.elapsed() >= timeout {
            return Err(WaitError::Timeout {
                locator: locator.to_string(),
                elapsed_ms: start.elapsed().as_millis() as u64,
            });
        }
        tokio::time::sleep(poll_interval).await;
    }
}

/// Polls until the locator matches at least one element, returning every
/// match in tree order.
///
/// An empty result means nothing matched within the timeout; list reads
/// treat that as "absent" rather than an error. A closed session fails
/// immediately.
pub async fn collect_within(
    driver: &dyn AutomationDriver,
    locator: &ElementLocator,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Vec<UIElement>, WaitError> {
    let start = Instant::now();
    loop {
        if !driver.is_connected() {
            return Err(WaitError::Driver(DriverError::NotConnected));
        }

        match driver.find_elements(locator).await {
            Ok(matches) if !matches.is_empty() => {
                debug!(
                    %locator,
                    count = matches.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "elements present"
                );
                return Ok(matches);
            }
            Ok(_) => trace!(%locator, "no matches yet"),
            Err(e) => trace!(%locator, error = %e, "poll failed, retrying"),
        }

        if start.elapsed() >= timeout {
            debug!(
                %locator,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "no elements within budget"
            );
            return Ok(Vec::new());
        }
        tokio::time::sleep(poll_interval).await;
    }
}

/// Blocks until the locator no longer resolves to any element.
///
/// Used after dismissing dialogs or deleting rows.
pub async fn wait_for_gone(
    driver: &dyn AutomationDriver,
    locator: &ElementLocator,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), WaitError> {
    let start = Instant::now();
    loop {
        if !driver.is_connected() {
            return Err(WaitError::Driver(DriverError::NotConnected));
        }

        match driver.find_element(locator).await {
            Ok(None) => {
                debug!(%locator, elapsed_ms = start.elapsed().as_millis() as u64, "element gone");
                return Ok(());
            }
            Ok(Some(_)) => trace!(%locator, "element still present"),
            Err(e) => trace!(%locator, error = %e, "poll failed, retrying"),
        }

        if start.elapsed() >= timeout {
            return Err(WaitError::Timeout {
                locator: locator.to_string(),
                elapsed_ms: start.elapsed().as_millis() as u64,
            });
        }
        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_error_mentions_locator_and_elapsed() {
        let err = WaitError::Timeout {
            locator: "id 'Trash'".to_string(),
            elapsed_ms: 30_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("id 'Trash'"));
        assert!(msg.contains("30000ms"));
    }
}
