//! Broker Cryptography
//!
//! Keccak-256, payment hashlocks, the digests both parties sign, and the
//! pluggable signing seam.

mod digest;
mod hash;
mod hashlock;
mod sign;
mod stub;

pub use digest::*;
pub use hash::*;
pub use hashlock::*;
pub use sign::*;
pub use stub::*;
