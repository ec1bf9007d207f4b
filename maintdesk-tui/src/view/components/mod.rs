//! Reusable UI components

pub mod form;
pub mod modal;
pub mod notifications;
pub mod pagination;
pub mod statusbar;
pub mod table;
pub mod tabs;
