fn main() {
    if let Err(e) = tarot_assets::cli::main() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
