use log::LevelFilter;

pub struct Logger;

impl Logger {
    /// Colored terminal logging at `verbosity`. HTTP internals stay at warn
    /// unless trace is requested.
    pub fn init(verbosity: LevelFilter) {
        let mut builder: env_logger::Builder = colog::default_builder();
        builder.filter_level(verbosity);

        if verbosity < LevelFilter::Trace {
            for noisy in ["reqwest", "hyper", "hyper_util", "rustls"] {
                builder.filter_module(noisy, LevelFilter::Warn);
            }
        }

        builder.init();
    }
}
