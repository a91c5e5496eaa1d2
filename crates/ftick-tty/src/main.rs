#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = ftick_tty::run_from_env() {
        eprintln!("ftick: {error}");
        std::process::exit(error.exit_code());
    }
}
