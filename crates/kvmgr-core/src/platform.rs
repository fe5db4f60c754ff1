//! Host platform detection and mapping to release artifact names.
//!
//! The Kubernetes release mirror keys artifacts by lowercase OS and Go-style
//! architecture names (`linux/amd64`, `darwin/arm64`). Validation is strict:
//! only the exact uname values those artifacts exist for are accepted, and a
//! `Platform` is only ever constructed after validation succeeds.

use std::fmt;
use thiserror::Error;

/// The host OS or machine architecture has no published kubectl artifact.
/// Carries the raw uname value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported platform: {0}")]
pub struct UnsupportedPlatform(pub String);

/// Operating systems with published kubectl binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Darwin,
}

impl Os {
    /// Artifact path segment for this OS.
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
        }
    }
}

/// CPU architectures with published kubectl binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm,
    Arm64,
}

impl Arch {
    /// Artifact path segment for this architecture.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
        }
    }
}

/// Validated OS + architecture pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os.as_str(), self.arch.as_str())
    }
}

impl Platform {
    /// Validates raw host identification against the release naming scheme.
    ///
    /// The sysname comparison is case-sensitive: the mirror publishes for
    /// kernels reporting exactly `Linux` or `Darwin`. `x86_64` maps to
    /// `amd64`; `arm` and `arm64` pass through unchanged. Anything else is
    /// rejected with the offending raw value.
    pub fn from_host(host: &HostInfo) -> Result<Self, UnsupportedPlatform> {
        let os = match host.sysname.as_str() {
            "Linux" => Os::Linux,
            "Darwin" => Os::Darwin,
            other => return Err(UnsupportedPlatform(other.to_string())),
        };
        let arch = match host.machine.as_str() {
            "x86_64" => Arch::Amd64,
            "arm" => Arch::Arm,
            "arm64" => Arch::Arm64,
            other => return Err(UnsupportedPlatform(other.to_string())),
        };
        Ok(Platform { os, arch })
    }
}

/// Raw host identification as reported by uname(2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Kernel name, e.g. `Linux` or `Darwin`.
    pub sysname: String,
    /// Machine hardware name, e.g. `x86_64`.
    pub machine: String,
}

impl HostInfo {
    pub fn new(sysname: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            sysname: sysname.into(),
            machine: machine.into(),
        }
    }

    /// Reads the running kernel's sysname and machine via uname(2).
    #[cfg(unix)]
    pub fn detect() -> std::io::Result<Self> {
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        if unsafe { libc::uname(&mut uts) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(Self {
            sysname: utsname_field(&uts.sysname),
            machine: utsname_field(&uts.machine),
        })
    }

    /// Non-unix hosts have no uname; report the compile-time identifiers.
    /// These never pass `Platform::from_host` validation, which is correct.
    #[cfg(not(unix))]
    pub fn detect() -> std::io::Result<Self> {
        Ok(Self::new(std::env::consts::OS, std::env::consts::ARCH))
    }
}

/// NUL-terminated C char array to an owned string.
#[cfg(unix)]
fn utsname_field(field: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = field
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_amd64_maps() {
        let p = Platform::from_host(&HostInfo::new("Linux", "x86_64")).unwrap();
        assert_eq!(p.os, Os::Linux);
        assert_eq!(p.arch, Arch::Amd64);
        assert_eq!(p.to_string(), "linux/amd64");
    }

    #[test]
    fn darwin_arm64_maps() {
        let p = Platform::from_host(&HostInfo::new("Darwin", "arm64")).unwrap();
        assert_eq!(p.os, Os::Darwin);
        assert_eq!(p.arch, Arch::Arm64);
        assert_eq!(p.to_string(), "darwin/arm64");
    }

    #[test]
    fn arm_passes_through() {
        let p = Platform::from_host(&HostInfo::new("Linux", "arm")).unwrap();
        assert_eq!(p.arch.as_str(), "arm");
    }

    #[test]
    fn unknown_os_rejected_with_raw_value() {
        let err = Platform::from_host(&HostInfo::new("Windows", "x86_64")).unwrap_err();
        assert_eq!(err, UnsupportedPlatform("Windows".to_string()));
        assert_eq!(err.to_string(), "unsupported platform: Windows");
    }

    #[test]
    fn os_match_is_case_sensitive() {
        assert!(Platform::from_host(&HostInfo::new("linux", "x86_64")).is_err());
        assert!(Platform::from_host(&HostInfo::new("DARWIN", "arm64")).is_err());
    }

    #[test]
    fn unknown_arch_rejected_with_raw_value() {
        let err = Platform::from_host(&HostInfo::new("Linux", "aarch64")).unwrap_err();
        assert_eq!(err, UnsupportedPlatform("aarch64".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn detect_reads_host_identity() {
        let host = HostInfo::detect().unwrap();
        assert!(!host.sysname.is_empty());
        assert!(!host.machine.is_empty());
    }
}
