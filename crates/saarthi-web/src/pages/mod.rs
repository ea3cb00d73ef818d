//! Page Components

mod auth;
mod home;
mod users;

pub use auth::AuthPage;
pub use home::HomePage;
pub use users::UsersPage;
