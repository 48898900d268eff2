pub mod auth_service;
pub use auth_service::{AuthError, AuthService, AuthUser};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod movie_service;
pub use movie_service::{MovieError, MovieService};

pub mod movie_service_impl;
pub use movie_service_impl::SeaOrmMovieService;

pub mod password;
pub use password::{PasswordError, PasswordHasher};

pub mod token;
pub use token::{Claims, IssuedToken, SigningSecret, TokenError, TokenService};
