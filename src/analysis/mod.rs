mod estimator;
pub mod fsm;
pub mod prompts;

pub use estimator::{CalorieEstimator, Estimate, Submission};
pub use fsm::{
    Rejection, SubmissionContext, SubmissionEvent, SubmissionState, SubmissionStateMachine,
};
