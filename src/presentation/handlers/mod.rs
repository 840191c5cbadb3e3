mod health;
mod process_documents;
mod root;

pub use health::health_handler;
pub use process_documents::{ErrorResponse, process_documents_handler};
pub use root::root_handler;
