//! Apple platforms and the SDKs a scheme is archived for.

use std::fmt;

/// Platform a scheme can be configured for.
///
/// Declaration order is the order targets are built in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Platform {
    /// watchOS (device + simulator)
    WatchOs,
    /// iOS (device + simulator)
    Ios,
    /// tvOS (device + simulator)
    TvOs,
    /// macOS (device only)
    MacOs,
}

impl Platform {
    /// SDKs one scheme is archived for: device first, then simulator.
    pub fn sdks(self) -> &'static [Sdk] {
        match self {
            Platform::WatchOs => &[Sdk::WatchOs, Sdk::WatchSimulator],
            Platform::Ios => &[Sdk::IphoneOs, Sdk::IphoneSimulator],
            Platform::TvOs => &[Sdk::AppleTvOs, Sdk::AppleTvSimulator],
            Platform::MacOs => &[Sdk::MacOsx],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::WatchOs => "watchOS",
            Platform::Ios => "iOS",
            Platform::TvOs => "tvOS",
            Platform::MacOs => "macOS",
        })
    }
}

/// One SDK passed to `xcodebuild -sdk`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Sdk {
    /// `iphoneos`
    IphoneOs,
    /// `iphonesimulator`
    IphoneSimulator,
    /// `watchos`
    WatchOs,
    /// `watchsimulator`
    WatchSimulator,
    /// `appletvos`
    AppleTvOs,
    /// `appletvsimulator`
    AppleTvSimulator,
    /// `macosx`
    MacOsx,
}

impl Sdk {
    /// Name understood by `xcodebuild -sdk`.
    pub fn name(self) -> &'static str {
        match self {
            Sdk::IphoneOs => "iphoneos",
            Sdk::IphoneSimulator => "iphonesimulator",
            Sdk::WatchOs => "watchos",
            Sdk::WatchSimulator => "watchsimulator",
            Sdk::AppleTvOs => "appletvos",
            Sdk::AppleTvSimulator => "appletvsimulator",
            Sdk::MacOsx => "macosx",
        }
    }

    /// Architecture the bundles of this SDK are tagged with.
    pub fn architecture(self) -> &'static str {
        match self {
            Sdk::IphoneOs | Sdk::AppleTvOs => "arm64",
            Sdk::WatchOs => "armv7k",
            Sdk::WatchSimulator => "i386",
            Sdk::IphoneSimulator | Sdk::AppleTvSimulator | Sdk::MacOsx => "x86_64",
        }
    }

    /// Whether this is a simulator SDK.
    pub fn is_simulator(self) -> bool {
        matches!(
            self,
            Sdk::IphoneSimulator | Sdk::WatchSimulator | Sdk::AppleTvSimulator
        )
    }
}

impl fmt::Display for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scheme archived for one SDK.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildTarget {
    /// Xcode scheme name
    pub scheme: String,
    /// SDK the invocation is scoped to
    pub sdk: Sdk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macos_is_device_only() {
        assert_eq!(Platform::MacOs.sdks(), &[Sdk::MacOsx]);
        for platform in [Platform::Ios, Platform::WatchOs, Platform::TvOs] {
            let sdks = platform.sdks();
            assert_eq!(sdks.len(), 2);
            assert!(!sdks[0].is_simulator());
            assert!(sdks[1].is_simulator());
        }
    }

    #[test]
    fn test_sdk_names() {
        assert_eq!(Sdk::IphoneSimulator.to_string(), "iphonesimulator");
        assert_eq!(Sdk::IphoneOs.architecture(), "arm64");
        assert_eq!(Sdk::WatchOs.architecture(), "armv7k");
    }
}
