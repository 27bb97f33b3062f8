use redshiftctl::{cmd, logger, redshift::Redshift, state::Store};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cmd = match cmd::parse(&args) {
        Ok(cmd) => cmd,
        Err(error) => {
            println!("Error: {error}\n");
            std::process::exit(1);
        }
    };

    if let Err(error) = logger::init() {
        eprintln!("Failed to initialize logging: {error:?}");
    }

    // Everything past argument parsing is best-effort: adjustment must never
    // block on a transient failure, so nothing below changes the exit code.
    let store = Store::from_env();
    if let Err(error) = store.ensure_initialized() {
        tracing::warn!(?error, "First-run initialization failed.");
    }
    let stdout = std::io::stdout().lock();
    if let Err(error) = cmd::run(&cmd, &store, &Redshift::new(), stdout) {
        tracing::warn!(?error, "Failed to write command output.");
    }
}
