pub mod release_matching;
pub mod source_layout;

pub use release_matching::ReleaseMatcher;
pub use source_layout::SourceLayout;
