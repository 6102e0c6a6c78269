use clap::Parser;
use jsv::cli::{self, Cli};
use std::io;
use std::process;

fn main() {
    let args = Cli::parse();
    cli::init_logging(args.verbose);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let status = cli::execute(&args, &mut stdout.lock(), &mut stderr.lock());
    process::exit(status);
}
