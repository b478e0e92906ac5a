pub mod directory;
pub mod pool;
pub mod slots;


pub use directory::Directory;
