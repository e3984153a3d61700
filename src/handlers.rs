pub mod forecast;
pub mod health;
pub mod overrides;
pub mod plan;
pub mod segments;
pub mod session;
