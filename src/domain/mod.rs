mod document_kind;
mod document_text;
mod extracted_record;
mod pipeline_stage;
mod uploaded_file;

pub use document_kind::DocumentKind;
pub use document_text::{AggregatedDocuments, DocumentTexts};
pub use extracted_record::{
    ExtractedRecord, ExtractionOutcome, FieldValue, SHIPMENT_FIELD_NAMES, ShipmentFields,
};
pub use pipeline_stage::PipelineStage;
pub use uploaded_file::UploadedFile;
