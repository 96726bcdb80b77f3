//! Apiserver building blocks
//!
//! - errors: failures raised while estimating or configuring
//! - features: feature gates read from the environment
//! - flowcontrol: request width estimation for priority and fairness

pub mod errors;
pub mod features;
pub mod flowcontrol;

#[cfg(test)]
mod test_setup {
    use std::sync::Once;
    static INIT: Once = Once::new();

    #[ctor::ctor]
    fn init_tracing() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .init();
        });
    }
}
