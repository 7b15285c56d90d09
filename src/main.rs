/* 3rd party libraries */
use clap::{Arg, Command};
use log::{error, info};
use serde_json::json;
use std::io::BufRead;

/* Custom libraries */
use controller::Controller;
use shared::Request;

/* Modules */
mod config;
mod controller;
mod shared;
mod unit;

/* Main */
fn main() {
    env_logger::init();

    let matches = Command::new("elevator")
        .about("Simulated elevator dispatch service")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .get_matches();

    // Load the configuration
    let config = unwrap_or_exit!(config::load_config(matches.value_of("config").unwrap()));

    // Start the elevator pool
    let controller = Controller::new(&config);
    info!("elevator service started, {} units", config.pool.n_units);

    // Line protocol towards the request boundary: one JSON ride request per
    // line, or the word "status" for the first idle unit. EOF drains and
    // stops the pool.
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = unwrap_or_exit!(line);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "status" {
            match controller.query_idle_unit() {
                Some(snapshot) => println!("{}", json!(snapshot)),
                None => println!("{}", json!({ "error": "no idle elevator available" })),
            }
            continue;
        }

        match serde_json::from_str::<Request>(line) {
            Ok(request) => match controller.request_ride(request) {
                Ok(id) => println!("{}", json!({ "assigned_unit_id": id })),
                Err(e) => println!("{}", json!({ "error": e.to_string() })),
            },
            Err(e) => error!("malformed request: {}", e),
        }
    }

    controller.shutdown();
}
