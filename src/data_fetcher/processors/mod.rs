pub mod page_context;

pub use page_context::{PageContext, TeamSummary, team_summaries};
