//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use soundmap_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    env_logger::init();
    match soundmap_cli::run() {
        Ok(()) => {}
        // Clap renders help, version, and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("soundmap: {err}");
            std::process::exit(1);
        }
    }
}
