pub mod download;
pub mod duration;
pub mod export;
pub mod jwt;
pub mod navigation;
pub mod storage;
pub mod time;
pub mod timer;
pub mod upload;

pub use download::trigger_csv_download;
