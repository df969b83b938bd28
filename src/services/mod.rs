pub mod auth;
pub mod events;
pub mod ids;
pub mod image;

pub use auth::{AuthService, Session};
pub use events::EventsApi;
pub use ids::{IdGenerator, UuidGenerator};
