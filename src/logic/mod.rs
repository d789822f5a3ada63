mod clause;
mod kb;

pub use clause::Clause;
pub use kb::KnowledgeBase;
