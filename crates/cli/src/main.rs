//! cvbench CLI entry point.

fn main() {
    if let Err(e) = cvbench_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
