//! `examink-replay <drawing.json> <out.png> [width]`

use clap::Parser;
use examink_app::{ReplayArgs, run};

fn main() {
    env_logger::init();

    let args = ReplayArgs::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
