//! Kodegen Bundler XCFramework - multi-platform framework assembler.
//!
//! This binary merges per-architecture .framework bundles, or the products
//! of per-platform Xcode archives, into .xcframework artifacts.

use kodegen_bundler_xcframework::cli::{self, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            // Never quiet for fatal errors
            let output = OutputManager::new(false, false);
            output.error(&format!("{e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.indent("");
                for suggestion in suggestions {
                    let _ = output.indent(&format!("💡 {suggestion}"));
                }
            }
            1
        }
    };

    process::exit(exit_code);
}
