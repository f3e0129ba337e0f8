pub mod api;
pub mod model;
pub mod resolver;

pub use api::{MojangApi, ProfileApi};
pub use model::{IdentityResponse, ResolvedPlayer, SessionProfile};
pub use resolver::IdentityResolver;
