pub mod constants;
pub mod context;
pub mod errors;
pub mod hashing;
pub mod locktime;
pub mod tx;
