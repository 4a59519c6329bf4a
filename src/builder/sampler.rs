//! Client side sampling of metrics.
//!
//! With the `sample-rate` feature enabled, a metric sent with a rate below
//! `1.0` is only written to the sink with that probability. Without it every
//! metric is written and the rate is only passed along to the server.

#[cfg(feature = "sample-rate")]
pub(crate) use rng::Sampler;

#[cfg(not(feature = "sample-rate"))]
pub(crate) use noop::Sampler;

pub(crate) trait Sampling {
    fn new() -> Self;
    fn sample(&self, rate: f64) -> bool;
}

#[cfg(not(feature = "sample-rate"))]
mod noop {
    use super::Sampling;

    #[derive(Debug, Clone, Copy)]
    pub struct Sampler;

    impl Sampling for Sampler {
        fn new() -> Self {
            Self
        }

        fn sample(&self, _rate: f64) -> bool {
            true
        }
    }
}

#[cfg(feature = "sample-rate")]
mod rng {
    use super::Sampling;
    use rand::Rng;

    #[derive(Debug, Clone, Copy)]
    pub struct Sampler;

    impl Sampling for Sampler {
        fn new() -> Self {
            Self
        }

        fn sample(&self, rate: f64) -> bool {
            sample_with(&mut rand::thread_rng(), rate)
        }
    }

    pub(crate) fn sample_with<R: Rng>(rng: &mut R, rate: f64) -> bool {
        if rate >= 1.0 {
            true
        } else if rate > 0.0 {
            rng.gen_bool(rate)
        } else {
            // zero, negative, and NaN rates never pass
            false
        }
    }

}
