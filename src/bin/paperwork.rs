use clap::Parser;
use paperwork_core::{
    cli::{run, Args},
    init,
};

fn main() {
    init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
