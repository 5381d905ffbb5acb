use kernel::id::Id;

pub struct UserMarker;

/// Primary key of the `users` table
pub type UserId = Id<UserMarker>;
