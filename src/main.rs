use log::debug;

mod anchor;
mod app;
mod carousel;
mod config;
mod dom;
mod feed;
mod lazy;
mod menu;
mod offline;
mod reveal;
mod scroll;
mod styles;
mod throttle;
mod form {
    pub mod binding;
    pub mod controller;
    pub mod mask;
    pub mod message;
    pub mod validate;
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    debug!("Starting landing page enhancements");
    app::start();
}
