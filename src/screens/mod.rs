//! Per-screen view state. Each screen caches its own copy of the events and
//! reconciles backend results into it.

pub mod browser;
pub mod dashboard;
pub mod home;
pub mod list;

pub use browser::EventBrowser;
pub use dashboard::{DashboardScreen, Tab};
pub use home::HomeScreen;
pub use list::EventList;
