//! Concrete page objects for the consent-manager demo app.

pub mod site_list;
