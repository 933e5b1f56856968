// Profiles: one record per identity, upserted by its owner.

pub mod handlers;
pub mod store;
