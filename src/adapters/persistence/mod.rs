pub mod waitlist_file;

pub use waitlist_file::JsonFileWaitlistStore;
