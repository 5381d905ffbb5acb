//! Presentation Layer
//!
//! Cookie session, HTML views, handlers, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod session;
pub mod views;

pub use handlers::AuthAppState;
pub use middleware::{CurrentUser, load_logged_in_user, login_required};
pub use router::{auth_router, require_login, with_auth};
pub use session::{Session, SessionCodecError, SessionData, session_layer};
