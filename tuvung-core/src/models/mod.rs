pub mod ease_factor;
pub mod progress;
pub mod status;
pub mod topic;
pub mod user;
pub mod vocabulary;

pub use ease_factor::EaseFactor;
pub use progress::VocabularyProgress;
pub use status::LearningStatus;
pub use topic::{SelectedTopic, Topic, TopicSession};
pub use user::{NewUser, User};
pub use vocabulary::{NewVocabulary, VocabularyEntry};
