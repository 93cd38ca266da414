/// Configures `env_logger`: everything at trace level when `verbose` is set,
/// nothing otherwise.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();
}
