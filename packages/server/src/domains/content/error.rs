use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no successfully processed photos to build a project from")]
    NoProcessedPhotos,

    #[error("could not derive a slug from service {service:?} and city {city:?}")]
    EmptySlug { service: String, city: String },
}
