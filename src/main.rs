mod app;
mod catalog;
mod config;
mod error;
mod logging;
mod runtime;
mod store;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
