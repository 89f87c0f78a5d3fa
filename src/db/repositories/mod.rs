//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod answer_repo;
pub mod cohort_repo;
pub mod instance_repo;
pub mod option_repo;
pub mod settings_repo;
pub mod user_repo;

pub use answer_repo::AnswerRepository;
pub use cohort_repo::CohortRepository;
pub use instance_repo::InstanceRepository;
pub use option_repo::OptionRepository;
pub use settings_repo::SettingsRepository;
pub use user_repo::UserRepository;
