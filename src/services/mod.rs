mod file;

pub use file::{DefaultFileService, FileService};

#[cfg(test)]
pub use file::MockDefaultFileService;
