fn main() {
    if let Err(e) = bloqueo::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
