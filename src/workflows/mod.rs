// User-facing workflows driven against the backend and identity provider

pub mod articles;
pub mod editor;
pub mod profile_sync;
pub mod signup;

pub use articles::{
    available_actions, ArticleAction, ArticleWorkspace, Confirmation, DeleteOutcome, SubmissionError,
    SubmitOutcome,
};
pub use editor::{html_is_blank, parse_tags, slugify, ArticleForm};
pub use profile_sync::{dual_sync, SyncOutcome};
pub use signup::{
    AccountType, SignupCompletion, SignupEntry, SignupError, SignupFlow, SignupProfile, SignupState,
};
