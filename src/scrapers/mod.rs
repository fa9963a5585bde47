pub mod browser;
#[cfg(test)]
pub mod fixture;
pub mod html;
pub mod http;
pub mod traits;
pub mod types;

pub use browser::ChromePageSource;
pub use http::HttpPageSource;
pub use traits::PageSource;
