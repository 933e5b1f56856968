// Jobs: employer postings and the public job search.

pub mod handlers;
pub mod search;
pub mod store;
