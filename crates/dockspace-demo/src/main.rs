// Dockspace demo: runs a scripted docking session in the headless host and
// prints the final layout as JSON.

mod session;
mod settings;

use session::Session;

fn main() {
    env_logger::init();

    let settings = settings::load_settings();
    if std::env::args().any(|arg| arg == "--write-settings") {
        settings::save_settings(&settings);
    }

    let mut session = Session::new(&settings);
    let snapshot = session.run();
    log::info!(
        "session finished with {} records",
        session.context().registry().len()
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize layout: {}", e),
    }
}
