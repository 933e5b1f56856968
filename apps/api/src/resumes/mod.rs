// Resumes: file upload to object storage, metadata rows, and the editable parsed field.

pub mod handlers;
pub mod store;
pub mod text;
