fn main() {
    if let Err(err) = plagcheck_cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
