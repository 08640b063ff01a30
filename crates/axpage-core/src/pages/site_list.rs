//! The site-list screen of the consent-manager demo app.
//!
//! This page shows the list of registered sites ("properties"), a toolbar
//! with Add / Edit / Reset / Trash buttons, and, after a horizontal swipe on
//! a row, the contextual Reset / Edit / Delete row actions. Deleting a site
//! raises a YES / NO confirmation dialog.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::PageConfig;
use crate::driver::AutomationDriver;
use crate::element::UIElement;
use crate::locator::{ElementLocator, ElementQuery, NameMatch};
use crate::page::{Page, PageError};

/// How long the contextual action sheet gets to render after a swipe before
/// a missing button counts as absent.
const ACTION_SHEET_TIMEOUT: Duration = Duration::from_secs(3);

/// How long the revealed row actions get to appear after the swipe gesture.
const ROW_REVEAL_TIMEOUT: Duration = Duration::from_secs(8);

/// Leading phrase of the delete confirmation dialog.
const DELETE_PROMPT: &str = "Are you sure you want to";

/// A contextual action revealed by swiping a site row.
///
/// Actions are addressed by button name, so an unknown action is
/// unrepresentable and a missing button is a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Reset the site's stored consent data.
    Reset,
    /// Edit the site entry.
    Edit,
    /// Delete the site entry.
    Delete,
}

impl RowAction {
    /// The on-screen name of the action button.
    pub fn button_name(&self) -> &'static str {
        match self {
            RowAction::Reset => "Reset",
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
        }
    }

    fn locator(&self) -> ElementLocator {
        ElementLocator::query(ElementQuery::of_type("Button").named(self.button_name()))
            .with_timeout(ACTION_SHEET_TIMEOUT)
    }
}

/// Declarative locators for the screen's elements.
mod locators {
    use super::*;

    pub fn add_button() -> ElementLocator {
        ElementLocator::by_id("Add")
    }

    pub fn header() -> ElementLocator {
        ElementLocator::query(
            ElementQuery::of_type("Other").name(NameMatch::Contains("Property List".into())),
        )
    }

    pub fn trash_button() -> ElementLocator {
        ElementLocator::query(ElementQuery::of_type("Button").named("Trash"))
            .with_timeout(Duration::from_secs(30))
    }

    pub fn site_cells() -> ElementLocator {
        ElementLocator::by_id("propertyCell").with_timeout(Duration::from_secs(30))
    }

    pub fn site_cell(name: &str) -> ElementLocator {
        ElementLocator::query(ElementQuery::of_type("StaticText").named(name))
            .with_timeout(Duration::from_secs(30))
    }

    pub fn site_name() -> ElementLocator {
        ElementLocator::by_id("propertyName").with_timeout(Duration::from_secs(30))
    }

    pub fn static_texts() -> ElementLocator {
        ElementLocator::query(ElementQuery::of_type("StaticText"))
            .with_timeout(Duration::from_secs(50))
    }

    pub fn yes_button() -> ElementLocator {
        ElementLocator::by_id("YES")
    }

    pub fn no_button() -> ElementLocator {
        ElementLocator::by_id("NO")
    }
}

/// Page object for the site-list screen.
pub struct SiteListPage {
    page: Page,
}

impl SiteListPage {
    /// Binds the page to a live driver session with default timings.
    ///
    /// Fails with [`PageError::Initialization`] if the session is closed;
    /// applies the settle delay before the page is usable.
    pub async fn attach(driver: Arc<dyn AutomationDriver>) -> Result<Self, PageError> {
        Self::attach_with_config(driver, PageConfig::default()).await
    }

    /// Like [`attach`](Self::attach), with explicit timings.
    pub async fn attach_with_config(
        driver: Arc<dyn AutomationDriver>,
        config: PageConfig,
    ) -> Result<Self, PageError> {
        let page = Page::attach_with_config(driver, config).await?;
        info!("bound SiteListPage");
        Ok(Self { page })
    }

    /// The underlying page, exposing the action log and raw primitives.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Returns true iff some site cell's text equals `name` exactly
    /// (case-sensitive). Searches the full list, not just the first cell.
    ///
    /// Waits for the cell list to render, up to its locator budget; a list
    /// that never renders counts as "site absent".
    pub async fn is_site_present(&self, name: &str) -> Result<bool, PageError> {
        let cells = self.page.find_all(&locators::site_cells()).await?;
        let found = cells.iter().any(|cell| cell.text() == Some(name));
        info!(site = name, found, "site presence check");
        Ok(found)
    }

    /// Waits for the named site cell and taps it.
    pub async fn tap_site(&self, name: &str) -> Result<(), PageError> {
        self.page.tap(&locators::site_cell(name)).await
    }

    /// Swipes the named site row from its right edge to its left edge,
    /// revealing the contextual row actions, and waits for them to appear.
    pub async fn swipe_site_row(&self, name: &str) -> Result<(), PageError> {
        self.page.swipe_across(&locators::site_cell(name)).await?;

        // The revealed buttons render with a spring animation; give them the
        // post-swipe budget before the caller selects one.
        let delete = RowAction::Delete.locator();
        self.page
            .wait_for_with_timeout(&delete, ROW_REVEAL_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Taps the named contextual row action.
    ///
    /// Fails with [`PageError::ElementNotFound`] if the button never renders
    /// within the action-sheet budget.
    pub async fn select_action(&self, action: RowAction) -> Result<(), PageError> {
        let locator = action.locator();
        match self.page.tap(&locator).await {
            Err(PageError::Timeout { locator, .. }) => {
                Err(PageError::ElementNotFound(locator))
            }
            other => other,
        }
    }

    /// Blocks until the locator resolves to a visible element or the timeout
    /// elapses; fails with [`PageError::Timeout`] on expiry.
    pub async fn wait_for_element(
        &self,
        locator: &ElementLocator,
        timeout: Duration,
    ) -> Result<UIElement, PageError> {
        self.page.wait_for_with_timeout(locator, timeout).await
    }

    /// Returns true iff one of the on-screen static texts contains the
    /// delete confirmation phrase.
    pub async fn verify_delete_prompt(&self) -> Result<bool, PageError> {
        let texts = self.page.find_all(&locators::static_texts()).await?;
        Ok(texts
            .iter()
            .any(|el| el.text().is_some_and(|t| t.contains(DELETE_PROMPT))))
    }

    /// Reads the text of the site-name field.
    ///
    /// Returns `Ok(None)` when the field is present but empty.
    pub async fn site_name(&self) -> Result<Option<String>, PageError> {
        self.page.read_text(&locators::site_name()).await
    }

    /// Taps the toolbar "Add" button.
    pub async fn tap_add_button(&self) -> Result<(), PageError> {
        self.page.tap(&locators::add_button()).await
    }

    /// Taps the toolbar "Trash" button.
    pub async fn tap_trash_button(&self) -> Result<(), PageError> {
        self.page.tap(&locators::trash_button()).await
    }

    /// Accepts the confirmation dialog ("YES").
    pub async fn confirm(&self) -> Result<(), PageError> {
        self.page.tap(&locators::yes_button()).await
    }

    /// Dismisses the confirmation dialog ("NO").
    pub async fn cancel(&self) -> Result<(), PageError> {
        self.page.tap(&locators::no_button()).await
    }

    /// Waits for the screen header to be visible.
    pub async fn wait_until_loaded(&self) -> Result<(), PageError> {
        self.page.wait_for(&locators::header()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_actions_map_to_button_names() {
        assert_eq!(RowAction::Reset.button_name(), "Reset");
        assert_eq!(RowAction::Edit.button_name(), "Edit");
        assert_eq!(RowAction::Delete.button_name(), "Delete");
    }

    #[test]
    fn row_action_locators_carry_the_action_sheet_budget() {
        let locator = RowAction::Delete.locator();
        assert_eq!(locator.timeout, Some(ACTION_SHEET_TIMEOUT));
        assert_eq!(locator.to_string(), "Button[name='Delete']");
    }
}
