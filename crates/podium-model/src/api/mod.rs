mod submit_request;
pub use submit_request::SubmitRequest;
