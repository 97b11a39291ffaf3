//! Authentication utilities

mod jwt;
mod password;
mod tokens;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use password::{
    hash_password, validate_password_strength, verify_password, PasswordService, MIN_PASSWORD_LEN,
};
pub use tokens::{constant_time_eq, generate_numeric_code, generate_url_token};
