//! Entry point for the `parkbench` command-line interface.
#![forbid(unsafe_code)]

use parkbench_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match parkbench_cli::run() {
        Ok(()) => {}
        // Clap renders help, version, and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            report_failure(&err);
            std::process::exit(1);
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn report_failure(err: &CliError) {
    eprintln!("parkbench: {err}");
}
