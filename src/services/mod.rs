pub mod link_service;
pub mod page_service;
pub mod path_service;

pub use link_service::LinkService;
pub use page_service::PageStore;
pub use path_service::{decode_path, parse_page_path, parse_static_path, StaticAsset};
