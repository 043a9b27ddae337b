use std::process::ExitCode;

fn main() -> ExitCode {
    mememart_cli::run()
}
