/// Install a global `tracing` subscriber for host binaries and tests.
///
/// The core's library crates only ever call into `tracing`'s macros; they
/// never install a subscriber themselves (a library that does so would fight
/// with whatever the host already configured). This helper exists for the
/// host application (or an integration test) to opt into `env-filter`-driven
/// formatting.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
