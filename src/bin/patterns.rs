use colored::Colorize;

use patterns::{application, logging, Session, Settings};

fn main() {
    logging::init();

    println!("Welcome to the design patterns CLI.\n");

    let mut session = Session::stdio(Settings::default());
    if let Err(e) = application::run(&mut session) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
