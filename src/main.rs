mod actions;
mod app;
mod audio;
mod catalog;
mod config;
mod logging;
mod menu;
mod notify;
mod runtime;
mod session;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
