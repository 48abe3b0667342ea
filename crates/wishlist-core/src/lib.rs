pub mod error;
pub mod search;
pub mod traits;
pub mod types;

pub use error::Error;
pub use traits::{MovieCatalog, TokenProvider};
pub use types::{AccessToken, Movie};
