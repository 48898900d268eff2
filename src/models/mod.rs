pub mod movie;
pub mod user;

pub use movie::{Movie, MovieDraft};
pub use user::User;
