pub mod charts;
pub mod history_table;
pub mod insights_panel;
pub mod navbar;
pub mod notification;
pub mod pagination;
pub mod protected_route;
pub mod select;
