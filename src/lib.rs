pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Build information shown in the page footer.
pub struct VersionInfo {
    pub version: &'static str,
}

pub static VERSION_INFO: VersionInfo = VersionInfo {
    version: env!("CARGO_PKG_VERSION"),
};
