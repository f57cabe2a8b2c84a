//! sea-orm entities for the auth service database.

pub mod login_codes;
pub mod role_user;
pub mod roles;
pub mod users;
