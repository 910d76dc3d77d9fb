pub mod card;
pub mod collection;
pub mod language;
pub mod progress;

pub use card::{Card, CardStatus, Definition, Example};
pub use collection::{Collection, CollectionStats};
pub use language::{Language, LanguageInfo};
pub use progress::{LanguageProgress, LearningStats, ProficiencyLevel};
