pub mod clones;
pub mod config;
pub mod note;
pub mod time;
pub mod timeline;
pub mod voice;

#[cfg(test)]
pub(crate) mod test_support;
