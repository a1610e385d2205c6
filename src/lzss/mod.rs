//! LZSS codec: the flag-group wire format described in SPEC_FULL.md §4.2,
//! layered over [`crate::dict::RingDictionary`].

mod decode;
mod encode;

pub use decode::{decode, decode_with_budget};
pub use encode::encode;
