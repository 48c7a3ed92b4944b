//! Kernel module - server infrastructure and dependencies.

pub mod cloudinary_client;
pub mod deps;
pub mod github_publisher;
pub mod gmb_client;
pub mod postmark_client;
pub mod run_history;
pub mod test_dependencies;
pub mod traits;

pub use cloudinary_client::{create_photo_processor, CloudinaryPhotoProcessor, NoopPhotoProcessor};
pub use deps::{JobberJobSource, ServerDeps};
pub use github_publisher::{
    create_repository_publisher, GithubRepositoryPublisher, NoopRepositoryPublisher,
};
pub use gmb_client::{create_social_publisher, GoogleBusinessPublisher, NoopSocialPublisher};
pub use postmark_client::{create_notification_sender, NoopNotificationSender, PostmarkEmailSender};
pub use run_history::RunHistory;
pub use test_dependencies::TestDependencies;
pub use traits::*;
