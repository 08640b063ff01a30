//! Shared test helpers for axpage-core integration tests.
//!
//! Provides a scripted [`MockDriver`] that serves canned accessibility trees
//! and records every driver call, plus builders for the site-list screen's
//! trees.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use axpage_core::config::PageConfig;
use axpage_core::driver::{AutomationDriver, DriverError};
use axpage_core::element::{ElementFrame, UIElement};

/// A driver call recorded by the mock.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)] // not every test file exercises every call variant
pub enum DriverCall {
    TapLocation { x: i32, y: i32 },
    TapElement { identifier: String },
    Swipe {
        start: (i32, i32),
        end: (i32, i32),
        duration: Option<f64>,
    },
    DumpTree,
}

/// Scripted automation driver.
///
/// Each `dump_tree` call pops the next scripted tree; the last tree repeats
/// once the script is exhausted, so polling waits see a stable final screen.
pub struct MockDriver {
    connected: AtomicBool,
    trees: Mutex<VecDeque<Vec<UIElement>>>,
    calls: Mutex<Vec<DriverCall>>,
}

#[allow(dead_code)]
impl MockDriver {
    /// A connected driver that always serves the given tree.
    pub fn with_tree(tree: Vec<UIElement>) -> Self {
        Self::scripted(vec![tree])
    }

    /// A connected driver serving the given trees in order, repeating the
    /// last one.
    pub fn scripted(trees: Vec<Vec<UIElement>>) -> Self {
        Self {
            connected: AtomicBool::new(true),
            trees: Mutex::new(trees.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A driver whose session is already closed.
    pub fn disconnected() -> Self {
        let driver = Self::scripted(vec![]);
        driver.connected.store(false, Ordering::SeqCst);
        driver
    }

    /// Opens or closes the session mid-test.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Snapshot of the recorded calls, oldest first.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The recorded calls excluding tree dumps, which polling makes noisy.
    pub fn interaction_calls(&self) -> Vec<DriverCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, DriverCall::DumpTree))
            .collect()
    }

    fn record(&self, call: DriverCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AutomationDriver for MockDriver {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn tap_location(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.record(DriverCall::TapLocation { x, y });
        Ok(())
    }

    async fn tap_element(&self, identifier: &str) -> Result<(), DriverError> {
        self.record(DriverCall::TapElement {
            identifier: identifier.to_string(),
        });
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
        self.record(DriverCall::Swipe {
            start: (start_x, start_y),
            end: (end_x, end_y),
            duration,
        });
        Ok(())
    }

    async fn dump_tree(&self) -> Result<Vec<UIElement>, DriverError> {
        self.record(DriverCall::DumpTree);
        let mut trees = self.trees.lock().unwrap();
        if trees.len() > 1 {
            Ok(trees.pop_front().unwrap())
        } else {
            Ok(trees.front().cloned().unwrap_or_default())
        }
    }
}

// ---------------------------------------------------------------------------
// Tree builders
// ---------------------------------------------------------------------------

/// A leaf element with the given identifier, label, and type.
pub fn el(id: Option<&str>, label: Option<&str>, typ: &str) -> UIElement {
    UIElement {
        identifier: id.map(String::from),
        label: label.map(String::from),
        value: None,
        element_type: Some(typ.to_string()),
        frame: None,
        children: vec![],
        hittable: None,
    }
}

/// Attaches a frame to an element.
#[allow(dead_code)]
pub fn framed(mut element: UIElement, x: f64, y: f64, width: f64, height: f64) -> UIElement {
    element.frame = Some(ElementFrame {
        x,
        y,
        width,
        height,
    });
    element
}

/// A site cell: a `propertyCell` static text labelled with the site name,
/// positioned at the given row index.
pub fn site_cell(name: &str, row: usize) -> UIElement {
    framed(
        el(Some("propertyCell"), Some(name), "StaticText"),
        0.0,
        120.0 + 44.0 * row as f64,
        375.0,
        44.0,
    )
}

/// The site-list screen with the given site names, wrapped in an anonymous
/// window container the way the backend reports it.
pub fn site_list_tree(names: &[&str]) -> Vec<UIElement> {
    let mut children = vec![
        el(Some("Add"), Some("Add"), "Button"),
        el(None, Some("GDPR Property List Screen"), "Other"),
        el(None, Some("Site List"), "StaticText"),
    ];
    for (row, name) in names.iter().enumerate() {
        children.push(site_cell(name, row));
    }

    vec![UIElement {
        identifier: None,
        label: None,
        value: None,
        element_type: Some("Window".to_string()),
        frame: None,
        children,
        hittable: None,
    }]
}

/// The site-list screen after a row swipe: cells plus the revealed
/// Reset / Edit / Delete row-action buttons.
pub fn tree_with_row_actions(names: &[&str]) -> Vec<UIElement> {
    let mut tree = site_list_tree(names);
    for (i, action) in ["Reset", "Edit", "Delete"].iter().enumerate() {
        tree[0].children.push(framed(
            el(None, Some(action), "Button"),
            250.0 + 40.0 * i as f64,
            120.0,
            40.0,
            44.0,
        ));
    }
    tree
}

/// The site-list screen with the delete confirmation dialog on top.
#[allow(dead_code)]
pub fn tree_with_delete_prompt(names: &[&str], site: &str) -> Vec<UIElement> {
    let mut tree = site_list_tree(names);
    tree[0].children.push(el(
        None,
        Some(&format!("Are you sure you want to delete {}?", site)),
        "StaticText",
    ));
    tree[0]
        .children
        .push(el(Some("YES"), Some("YES"), "Button"));
    tree[0].children.push(el(Some("NO"), Some("NO"), "Button"));
    tree
}

/// Page timings tuned for tests: no settle delay, tight polling.
pub fn fast_config() -> PageConfig {
    PageConfig {
        settle_delay_ms: 0,
        poll_interval_ms: 10,
        wait_timeout_ms: 500,
    }
}

/// Installs a test tracing subscriber once per process.
#[allow(dead_code)]
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env(),
            )
            .with_test_writer()
            .try_init();
    });
}
