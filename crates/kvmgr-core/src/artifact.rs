//! Release artifact addressing.
//!
//! kubectl binaries are published per version and platform:
//! `<base>/<version>/bin/<os>/<arch>/kubectl`.

use crate::platform::Platform;

/// Official Kubernetes release mirror.
pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com/kubernetes-release/release";

/// Name of the managed binary, last segment of every artifact URL.
pub const BINARY_NAME: &str = "kubectl";

/// URL of the kubectl binary for `version` on `platform`.
///
/// The version string is used verbatim as a path segment. A trailing slash
/// on `base_url` is tolerated.
///
/// # Examples
///
/// - `release_url(DEFAULT_BASE_URL, "1.18.0", linux_amd64)` →
///   `https://storage.googleapis.com/kubernetes-release/release/1.18.0/bin/linux/amd64/kubectl`
pub fn release_url(base_url: &str, version: &str, platform: &Platform) -> String {
    format!(
        "{}/{}/bin/{}/{}/{}",
        base_url.trim_end_matches('/'),
        version,
        platform.os.as_str(),
        platform.arch.as_str(),
        BINARY_NAME
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Arch, Os};

    #[test]
    fn release_url_substitutes_version_os_arch_in_order() {
        let p = Platform {
            os: Os::Linux,
            arch: Arch::Amd64,
        };
        assert_eq!(
            release_url(DEFAULT_BASE_URL, "1.18.0", &p),
            "https://storage.googleapis.com/kubernetes-release/release/1.18.0/bin/linux/amd64/kubectl"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let p = Platform {
            os: Os::Darwin,
            arch: Arch::Arm64,
        };
        assert_eq!(
            release_url("http://127.0.0.1:8080/", "v1.27.1", &p),
            "http://127.0.0.1:8080/v1.27.1/bin/darwin/arm64/kubectl"
        );
    }
}
