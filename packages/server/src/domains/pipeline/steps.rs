//! Zero-sized step markers tying each step name to its outcome data type.

use super::models::{
    CommitData, EmailData, FetchJobData, GenerateProjectData, ProcessPhotosData, RunSteps,
    SocialPostData, StepName, StepOutcome,
};

pub trait Step {
    type Data;
    const NAME: StepName;

    fn slot(steps: &mut RunSteps) -> &mut StepOutcome<Self::Data>;
}

macro_rules! step {
    ($marker:ident, $data:ty, $name:expr, $field:ident) => {
        pub struct $marker;

        impl Step for $marker {
            type Data = $data;
            const NAME: StepName = $name;

            fn slot(steps: &mut RunSteps) -> &mut StepOutcome<Self::Data> {
                &mut steps.$field
            }
        }
    };
}

step!(FetchJob, FetchJobData, StepName::FetchJob, fetch_job);
step!(ProcessPhotos, ProcessPhotosData, StepName::ProcessPhotos, process_photos);
step!(GenerateProject, GenerateProjectData, StepName::GenerateProject, generate_project);
step!(CommitToGithub, CommitData, StepName::CommitToGithub, commit_to_github);
step!(PostToGmb, SocialPostData, StepName::PostToGmb, post_to_gmb);
step!(EmailSocialDrafts, EmailData, StepName::EmailSocialDrafts, email_social_drafts);
