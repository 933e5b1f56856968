// Candidate matching: pure scorer plus the ranked-matches route.

pub mod contact;
pub mod handlers;
pub mod scorer;
