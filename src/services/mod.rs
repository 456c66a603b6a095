pub mod auth;
pub mod grades;
pub(crate) mod helpers;
pub mod penalties;
pub mod subjects;
pub mod system;
pub mod tasks;

pub use auth::AuthService;
pub use grades::GradeService;
pub use penalties::PenaltyService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use tasks::TaskService;
