//! Randomness extractors over a shared NTT kernel.
//!
//! Five extractors turn a weak entropy source into (close to) uniform bits,
//! either by combining it with a second weak source ([`extractors::dodis`],
//! [`extractors::circulant`], [`extractors::toeplitz`], [`extractors::raz`])
//! or with a short uniform seed ([`extractors::trevisan`]). All but
//! [`extractors::raz`] work over integers mod a prime via the cyclic
//! convolution in [`math::ntt`]; Raz and Trevisan's one-bit extractor work
//! over `GF(2^n)` ([`gf2n`]) instead. [`von_neumann`] offers a much cheaper
//! debiaser for the special case of an exchangeable source, and
//! [`von_neumann::suggest_extractor`] gives a starting recommendation.
//!
//! Re-exports the four number-theory predicates
//! ([`is_prime`], [`is_na_set`], [`next_prime`]/[`previous_prime`], and
//! friends) the extractors' `from_params` methods are built on, since
//! callers doing their own parameter exploration need the same primitives.

pub mod error;
pub mod extractors;
pub mod gf2n;
pub mod math;
pub mod trinomials;
pub mod von_neumann;

pub use error::{Error, Result};

pub use extractors::circulant::Circulant;
pub use extractors::dodis::Dodis;
pub use extractors::raz::Raz;
pub use extractors::toeplitz::Toeplitz;
pub use extractors::trevisan::Trevisan;
pub use extractors::AdjustedLengths;

pub use math::na_set::{closest_na_set, is_na_set, next_na_set, previous_na_set};
pub use math::prime::{
    closest_prime, divisors, factorize, is_prime, next_prime, prime_factor, previous_prime,
    primitive_root,
};

pub use von_neumann::{suggest_extractor, von_neumann};
