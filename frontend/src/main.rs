use log::{error, info};

mod banner;
mod chartjs;
mod charts;
mod config;
mod dom;
mod nav;
mod page;
mod reveal;
mod scroll;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page controller");
    if let Err(err) = page::start() {
        error!("Failed to start page controller: {:?}", err);
    }
}
