mod args;
mod inventory;

use clap::Parser;
use log::LevelFilter;
use snafu::ErrorCompat;

use crate::inventory::InvResult;

fn run(args: &args::Args) -> InvResult<()> {
    let config = inventory::resolve_config(args)?;
    if args.print_form {
        let catalog = config.catalog()?;
        inventory::print_form(&catalog);
        return Ok(());
    }
    inventory::run_inventory(&config, args.reference.clone())
}

fn main() {
    let args = args::Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
