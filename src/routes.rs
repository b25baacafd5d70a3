mod api;
mod web;

pub use api::ApiRocketBuildExt;
pub use api::session_guard::{Authenticated, MaybeAuthenticated, OrganizerAccess};
pub use web::WebRocketBuildExt;
