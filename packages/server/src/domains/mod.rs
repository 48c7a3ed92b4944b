// Business domains
pub mod content;
pub mod jobber;
pub mod jobs;
pub mod pipeline;
