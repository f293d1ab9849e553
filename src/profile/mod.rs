// Text profiling — character n-gram frequency profiles and fragmentation.

pub mod fragment;
pub mod ngram;

pub use fragment::fragment;
pub use ngram::{char_len, NgramProfile, ProfileEntry};
