fn main() {
    if let Err(err) = product_finder::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
