mod factory;
mod store;

pub use factory::FileStoreFactory;
pub use store::JsonFileStore;
