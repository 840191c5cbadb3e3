mod form_submitter_factory;
mod http_form_submitter;
mod stub_form_submitter;

pub use form_submitter_factory::FormSubmitterFactory;
pub use http_form_submitter::HttpFormSubmitter;
pub use stub_form_submitter::StubFormSubmitter;
