// Authentication: thin handlers over the identity API plus reset-link helpers.

pub mod handlers;
pub mod recovery;
