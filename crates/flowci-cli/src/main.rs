fn main() {
    if let Err(error) = flowci_cli::run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
