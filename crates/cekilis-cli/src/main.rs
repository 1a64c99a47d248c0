#![forbid(unsafe_code)]

fn main() -> std::process::ExitCode {
    cekilis_cli::main_entry()
}
