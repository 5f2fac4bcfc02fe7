//! Widget modules for UI rendering.
//!
//! Each widget is a pure function of the session and UI state; none of them
//! mutate anything.

pub mod footer;
pub mod header;
pub mod map;
pub mod messages;
pub mod side_panel;
