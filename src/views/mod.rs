//! View models for the dashboard pages. Each view owns its fetch state and
//! UI selections; nothing is shared between view instances.

pub mod question_list;
pub mod state;
pub mod submissions;
pub mod test_results;
pub mod user_details;
