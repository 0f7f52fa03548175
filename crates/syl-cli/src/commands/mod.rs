pub mod dispatch;
pub mod import;
pub mod list;
pub mod remove;
pub mod scan;
pub mod schema;
pub mod show;
pub mod validate;
