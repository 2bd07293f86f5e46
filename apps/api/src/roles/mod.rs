// Role posting surface: CRUD persistence and the create/update endpoints,
// including the background re-analysis spawned on text changes.

pub mod handlers;
pub mod repo;
