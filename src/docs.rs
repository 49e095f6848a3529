//! Links into the versioned documentation site.

use semver::Version;

/// Host serving the documentation.
pub const DOCS_HOST: &str = "www.pantsbuild.org";

/// Link to `slug` in the docs for this crate's own `major.minor` release.
pub fn docs_url(slug: &str) -> String {
    format!(
        "https://{}/v{}.{}/docs/{}",
        DOCS_HOST,
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        slug
    )
}

/// Link to `slug` in the docs for `version`.
///
/// Patch and pre-release components are dropped; the slug is used verbatim.
pub fn docs_url_for(version: &Version, slug: &str) -> String {
    format!(
        "https://{}/v{}.{}/docs/{}",
        DOCS_HOST, version.major, version.minor, slug
    )
}
