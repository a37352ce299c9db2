use std::process::ExitCode;

fn main() -> ExitCode {
    qpair_prep_lib::run()
}
