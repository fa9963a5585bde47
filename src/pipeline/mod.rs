pub mod acquire;
pub mod dedup;
pub mod enrich;
pub mod normalize;
pub mod pacing;

pub use acquire::ListingAcquirer;
