mod adapter;
mod error;
mod handler;
mod http;
mod page;

pub use adapter::StoreAdapter;
pub use error::ApiError;
pub use handler::LeaderboardHandler;
pub use http::HttpApi;
pub use page::{PageOptions, render_page};
