pub mod app_data_dir;
pub mod image_blob_store;

pub use app_data_dir::AppDataPaths;
pub use image_blob_store::FsImageBlobStore;
