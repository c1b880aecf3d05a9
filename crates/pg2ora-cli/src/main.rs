fn main() {
    if let Err(e) = pg2ora_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
