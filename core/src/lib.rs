//! Building blocks for launcher workflows: turn a typed query into a filtered
//! list of actions and render it as the feedback message the host expects.

pub mod api;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod feedback;
pub mod info;
pub mod logging;
pub mod matcher;
pub mod menu;
pub mod services;
