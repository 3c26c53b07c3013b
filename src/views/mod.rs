pub mod analyze;
pub mod chat;
pub mod crossref;
pub mod shared;
pub mod translate;

pub use analyze::AnalyzeView;
pub use chat::ChatView;
pub use crossref::CrossRefView;
pub use translate::TranslateView;
