//! # axpage-core
//!
//! Page-object abstraction layer for iOS UI test automation.
//!
//! This crate lets a test suite describe each screen as a page object: a set
//! of named [`locator::ElementLocator`]s bound to a live automation session,
//! with semantic actions (tap, swipe, select a contextual row action, verify
//! a confirmation dialog) and polling waits layered on top.
//!
//! ## Modules
//!
//! - [`element`] - Accessibility-tree element types shared by all backends
//! - [`locator`] - Declarative element locators (accessibility id or query)
//! - [`driver`] - The [`driver::AutomationDriver`] trait and tree search
//! - [`axe`] - Driver backend wrapping the `axe` accessibility CLI
//! - [`wait`] - Polling wait-for-visible / wait-for-gone
//! - [`gesture`] - Press-move-release gesture construction
//! - [`action`] - Per-page action logging
//! - [`config`] - Settle / poll / timeout configuration
//! - [`page`] - The page-object base type
//! - [`pages`] - Concrete page objects for the demo app under test
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use axpage_core::axe::AxeDriver;
//! use axpage_core::pages::site_list::{RowAction, SiteListPage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = Arc::new(AxeDriver::attach("SIMULATOR-UDID")?);
//!     let page = SiteListPage::attach(driver).await?;
//!
//!     if page.is_site_present("mobile.demo").await? {
//!         page.swipe_site_row("mobile.demo").await?;
//!         page.select_action(RowAction::Delete).await?;
//!         assert!(page.verify_delete_prompt().await?);
//!         page.confirm().await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod axe;
pub mod config;
pub mod driver;
pub mod element;
pub mod gesture;
pub mod locator;
pub mod page;
pub mod pages;
pub mod wait;
