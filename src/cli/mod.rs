pub mod controller;
pub mod format;
pub mod proxy_client;
pub mod setup;
pub mod ui;
pub mod view;
pub mod watch;
