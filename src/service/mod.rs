//! ResourceService: the generic resource contract over a `DocumentStore`.

mod resource;
mod validation;
pub use resource::ResourceService;
pub use validation::RequestValidator;
