pub mod login_code;
pub mod role;
pub mod token;
pub mod user;
