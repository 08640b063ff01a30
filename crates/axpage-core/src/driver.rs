//! Automation driver trait for backend-agnostic UI automation.
//!
//! This module defines the [`AutomationDriver`] trait, which provides a common
//! interface for the automation backends a page object can run against (e.g.
//! the `axe` accessibility CLI, or a scripted mock in tests). Page objects
//! work against this trait and never know the backend.
//!
//! The trait includes default implementations for locator resolution that
//! fetch the full hierarchy via [`dump_tree`](AutomationDriver::dump_tree) and
//! search it locally. Backends with server-side search can override these.
//!
//! A driver session is an external shared resource: page objects borrow it
//! (`Arc<dyn AutomationDriver>`) and never manage its lifecycle.

use async_trait::async_trait;
use thiserror::Error;

use crate::element::UIElement;
use crate::locator::ElementLocator;

/// Errors that can occur during automation driver operations.
///
/// Unifies errors from all backends behind a single type so consumers can
/// handle them uniformly.
#[derive(Error, Debug)]
pub enum DriverError {
    /// A command or operation failed with the given message.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The backend is not available or the session is closed.
    #[error("Not connected to automation backend")]
    NotConnected,

    /// No element matched a locator.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// An operation timed out.
    #[error("Operation timed out")]
    Timeout,

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON data from the backend.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

/// Recursively searches a UI element hierarchy for the first element
/// satisfying the locator.
pub fn find_first(elements: &[UIElement], locator: &ElementLocator) -> Option<UIElement> {
    for element in elements {
        if locator.matches(element) {
            return Some(element.clone());
        }
        if let Some(found) = find_first(&element.children, locator) {
            return Some(found);
        }
    }
    None
}

/// Recursively collects every element satisfying the locator, in tree order.
///
/// Tree order is the order the backend reports, which for table views follows
/// the on-screen row order.
pub fn find_all(elements: &[UIElement], locator: &ElementLocator) -> Vec<UIElement> {
    let mut result = Vec::new();
    collect_matches(elements, locator, &mut result);
    result
}

fn collect_matches(elements: &[UIElement], locator: &ElementLocator, result: &mut Vec<UIElement>) {
    for element in elements {
        if locator.matches(element) {
            result.push(element.clone());
        }
        collect_matches(&element.children, locator, result);
    }
}

/// Flattens a UI element hierarchy into a list of actionable elements.
///
/// Recursively traverses the tree and collects all elements that have either
/// an accessibility identifier or a label. Elements without both are
/// excluded, as they are typically not directly actionable.
pub fn flatten_elements(elements: &[UIElement]) -> Vec<UIElement> {
    let mut result = Vec::new();
    collect_elements(elements, &mut result);
    result
}

fn collect_elements(elements: &[UIElement], result: &mut Vec<UIElement>) {
    for element in elements {
        if element.identifier.is_some() || element.label.is_some() {
            result.push(element.clone());
        }
        collect_elements(&element.children, result);
    }
}

/// Trait for backend-agnostic UI automation.
///
/// Implementors provide the raw automation capabilities (tapping, gestures,
/// hierarchy inspection); locator resolution is layered on top via default
/// methods. All methods that touch the device are async so both synchronous
/// CLI tools (wrapped in `spawn_blocking`) and async backends fit behind the
/// same interface.
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    /// Check if the session is open and ready to accept commands.
    fn is_connected(&self) -> bool;

    /// Tap at specific screen coordinates.
    async fn tap_location(&self, x: i32, y: i32) -> Result<(), DriverError>;

    /// Tap an element by its accessibility identifier.
    ///
    /// Backends with native id-addressed taps should use them; the default
    /// resolves the element locally and taps the center of its frame.
    async fn tap_element(&self, identifier: &str) -> Result<(), DriverError> {
        let locator = ElementLocator::by_id(identifier);
        let element = self
            .find_element(&locator)
            .await?
            .ok_or_else(|| DriverError::ElementNotFound(locator.to_string()))?;
        let frame = element
            .frame
            .ok_or_else(|| DriverError::CommandFailed(format!("{} has no frame", locator)))?;
        let (x, y) = frame.center();
        self.tap_location(x, y).await
    }

    /// Perform a press-move-release gesture from one point to another.
    ///
    /// `duration` is the time between press and release, in seconds.
    async fn swipe(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        duration: Option<f64>,
    ) -> Result<(), DriverError>;

    /// Get the full UI element hierarchy for the current screen.
    async fn dump_tree(&self) -> Result<Vec<UIElement>, DriverError>;

    /// Get a flattened list of actionable elements (those with an identifier
    /// or a label).
    async fn list_elements(&self) -> Result<Vec<UIElement>, DriverError> {
        let tree = self.dump_tree().await?;
        Ok(flatten_elements(&tree))
    }

    /// Resolve a locator to the first matching element, if any.
    ///
    /// The default fetches the tree and searches locally.
    async fn find_element(
        &self,
        locator: &ElementLocator,
    ) -> Result<Option<UIElement>, DriverError> {
        let tree = self.dump_tree().await?;
        Ok(find_first(&tree, locator))
    }

    /// Resolve a locator to every matching element, in tree order.
    async fn find_elements(
        &self,
        locator: &ElementLocator,
    ) -> Result<Vec<UIElement>, DriverError> {
        let tree = self.dump_tree().await?;
        Ok(find_all(&tree, locator))
    }

    /// Read an element's text (value, falling back to label).
    ///
    /// Returns `Ok(None)` when the element exists but carries no text.
    async fn element_text(
        &self,
        locator: &ElementLocator,
    ) -> Result<Option<String>, DriverError> {
        let element = self
            .find_element(locator)
            .await?
            .ok_or_else(|| DriverError::ElementNotFound(locator.to_string()))?;
        Ok(element.text().map(String::from))
    }
}
