//! Page-object base: a screen bound to a live driver session.
//!
//! A [`Page`] borrows a driver session (`Arc<dyn AutomationDriver>`), applies
//! a settle delay when bound, and offers the locator-driven primitives the
//! concrete pages are built from: wait, tap, swipe, read text. Every
//! primitive is recorded in the page's action log.
//!
//! The page never owns the session's lifecycle; when the screen it represents
//! goes away, the page is simply dropped and a new one bound.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info_span, Instrument};

use crate::action::{ActionLog, ActionResult, ActionType};
use crate::config::PageConfig;
use crate::driver::{AutomationDriver, DriverError};
use crate::element::UIElement;
use crate::gesture::SwipeGesture;
use crate::locator::{ElementLocator, Strategy};
use crate::wait::{self, WaitError};

/// Maximum number of action log entries retained per page.
const MAX_ACTION_LOG_SIZE: usize = 1000;

/// Errors produced by page-object operations.
#[derive(Error, Debug)]
pub enum PageError {
    /// The page could not be bound to the driver session.
    #[error("Page initialization failed: {0}")]
    Initialization(String),

    /// A locator resolved to no element.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// An element did not become visible within its wait budget.
    #[error("Timeout after {elapsed_ms}ms waiting for {locator}")]
    Timeout {
        /// Display form of the locator that was being resolved.
        locator: String,
        /// How long the wait actually ran, in milliseconds.
        elapsed_ms: u64,
    },

    /// The underlying driver failed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl From<WaitError> for PageError {
    fn from(err: WaitError) -> Self {
        match err {
            WaitError::Timeout {
                locator,
                elapsed_ms,
            } => PageError::Timeout {
                locator,
                elapsed_ms,
            },
            WaitError::Driver(e) => PageError::Driver(e),
        }
    }
}

/// A screen bound to a live driver session.
pub struct Page {
    driver: Arc<dyn AutomationDriver>,
    config: PageConfig,
    actions: Mutex<VecDeque<ActionLog>>,
}

impl Page {
    /// Binds a page to the driver session with default timings.
    ///
    /// Fails with [`PageError::Initialization`] if the session is closed.
    /// Applies the configured settle delay before returning, giving the
    /// screen time to finish its transition.
    pub async fn attach(driver: Arc<dyn AutomationDriver>) -> Result<Self, PageError> {
        Self::attach_with_config(driver, PageConfig::default()).await
    }

    /// Like [`attach`](Self::attach), with explicit timings.
    pub async fn attach_with_config(
        driver: Arc<dyn AutomationDriver>,
        config: PageConfig,
    ) -> Result<Self, PageError> {
        if !driver.is_connected() {
            return Err(PageError::Initialization(
                "driver session is closed".to_string(),
            ));
        }
        let settle = config.settle_delay();
        if !settle.is_zero() {
            debug!(settle_ms = settle.as_millis() as u64, "settling page");
            tokio::time::sleep(settle).await;
        }
        Ok(Self {
            driver,
            config,
            actions: Mutex::new(VecDeque::new()),
        })
    }

    /// The borrowed driver session.
    pub fn driver(&self) -> &Arc<dyn AutomationDriver> {
        &self.driver
    }

    /// The timings this page runs with.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Snapshot of the recorded action log, oldest first.
    pub fn actions(&self) -> Vec<ActionLog> {
        self.actions.lock().unwrap().iter().cloned().collect()
    }

    fn record(&self, action: ActionType, result: ActionResult, duration: Duration) {
        let mut log = self.actions.lock().unwrap();
        if log.len() >= MAX_ACTION_LOG_SIZE {
            log.pop_front();
        }
        log.push_back(ActionLog::new(
            action,
            result,
            Some(duration.as_millis() as u64),
        ));
    }

    /// Runs a page operation inside a tracing span, recording its outcome
    /// and duration in the action log.
    async fn run_logged<T, F>(&self, action: ActionType, op: F) -> Result<T, PageError>
    where
        F: std::future::Future<Output = Result<T, PageError>>,
    {
        let span = info_span!("page_action", action = action.name());
        async {
            let start = Instant::now();
            let result = op.await;
            let elapsed = start.elapsed();
            let outcome = match &result {
                Ok(_) => ActionResult::Success,
                Err(e) => ActionResult::Failure(e.to_string()),
            };
            debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                success = result.is_ok(),
                "action complete"
            );
            self.record(action, outcome, elapsed);
            result
        }
        .instrument(span)
        .await
    }

    /// The wait budget for a locator: its own timeout if set, otherwise the
    /// page default.
    fn budget(&self, locator: &ElementLocator) -> Duration {
        locator.timeout.unwrap_or_else(|| self.config.wait_timeout())
    }

    /// Blocks until the locator resolves to a visible element, using the
    /// locator's own timeout or the page default.
    pub async fn wait_for(&self, locator: &ElementLocator) -> Result<UIElement, PageError> {
        self.wait_for_with_timeout(locator, self.budget(locator)).await
    }

    /// Blocks until the locator resolves to a visible element or the given
    /// timeout elapses.
    pub async fn wait_for_with_timeout(
        &self,
        locator: &ElementLocator,
        timeout: Duration,
    ) -> Result<UIElement, PageError> {
        let action = ActionType::WaitFor {
            locator: locator.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        };
        self.run_logged(action, async {
            let element = wait::wait_for_visible(
                self.driver.as_ref(),
                locator,
                timeout,
                self.config.poll_interval(),
            )
            .await?;
            Ok(element)
        })
        .await
    }

    /// Waits for the element and taps it.
    ///
    /// Id locators use the backend's native id-addressed tap; query locators
    /// tap the center of the resolved element's frame.
    pub async fn tap(&self, locator: &ElementLocator) -> Result<(), PageError> {
        let action = ActionType::Tap {
            locator: locator.to_string(),
        };
        self.run_logged(action, async {
            let element = wait::wait_for_visible(
                self.driver.as_ref(),
                locator,
                self.budget(locator),
                self.config.poll_interval(),
            )
            .await?;

            match &locator.strategy {
                Strategy::AccessibilityId(id) => self.driver.tap_element(id).await?,
                Strategy::Query(_) => {
                    let frame = element.frame.as_ref().ok_or_else(|| {
                        PageError::ElementNotFound(format!("{} has no frame", locator))
                    })?;
                    let (x, y) = frame.center();
                    self.driver.tap_location(x, y).await?;
                }
            }
            Ok(())
        })
        .await
    }

    /// Waits for the element, then swipes across it from its right edge to
    /// its left edge.
    ///
    /// Coordinates are derived from the element's frame at the moment of the
    /// call; they go stale if the UI shifts mid-gesture.
    pub async fn swipe_across(&self, locator: &ElementLocator) -> Result<(), PageError> {
        let action = ActionType::Swipe {
            locator: locator.to_string(),
        };
        self.run_logged(action, async {
            let element = wait::wait_for_visible(
                self.driver.as_ref(),
                locator,
                self.budget(locator),
                self.config.poll_interval(),
            )
            .await?;
            let frame = element
                .frame
                .as_ref()
                .ok_or_else(|| PageError::ElementNotFound(format!("{} has no frame", locator)))?;
            SwipeGesture::row_reveal(frame)
                .perform(self.driver.as_ref())
                .await?;
            Ok(())
        })
        .await
    }

    /// Reads the text of the first element the locator resolves to.
    ///
    /// Returns `Ok(None)` when the element exists but carries no text; fails
    /// with [`PageError::ElementNotFound`] when nothing matches.
    pub async fn read_text(&self, locator: &ElementLocator) -> Result<Option<String>, PageError> {
        let action = ActionType::ReadText {
            locator: locator.to_string(),
        };
        self.run_logged(action, async {
            let element = self
                .driver
                .find_element(locator)
                .await?
                .ok_or_else(|| PageError::ElementNotFound(locator.to_string()))?;
            Ok(element.text().map(String::from))
        })
        .await
    }

    /// Resolves every element the locator matches, in on-screen order.
    ///
    /// Polls until at least one element matches or the locator's wait budget
    /// elapses; an empty result means nothing rendered within the budget.
    pub async fn find_all(&self, locator: &ElementLocator) -> Result<Vec<UIElement>, PageError> {
        Ok(wait::collect_within(
            self.driver.as_ref(),
            locator,
            self.budget(locator),
            self.config.poll_interval(),
        )
        .await?)
    }
}
