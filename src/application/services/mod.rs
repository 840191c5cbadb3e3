mod document_aggregator;
mod document_processing_service;
mod field_extraction_service;
pub mod prompts;
mod transient_storage;

pub use document_aggregator::DocumentAggregator;
pub use document_processing_service::{
    DocumentProcessingService, ProcessingError, ProcessingOptions, UnrecognizedPolicy,
};
pub use field_extraction_service::{
    FieldExtractionError, FieldExtractionService, ModelResponseParseError, interpret_reply,
};
pub use transient_storage::{TransientStorage, TransientStorageError};
