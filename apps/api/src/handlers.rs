pub mod fallback;
pub mod health;
pub mod organizations;
pub mod profile;
