mod app;
mod audio;
mod catalog;
mod config;
mod mpris;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
