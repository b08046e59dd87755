use clap::Parser;
use typofix::app;
use typofix::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = app::run(cli) {
        eprintln!("typofix: error: {e:#}");
        std::process::exit(1);
    }
}
