//! Version command implementation

use crate::error::Result;
use crate::package::PLUGIN_API_VERSION;
use crate::platform::Platform;
use crate::remote::default_user_agent;

/// Run version command
pub fn run() -> Result<()> {
    println!("kpkg {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!("  Platform: {}", Platform::host());
    println!("  Plugin API: {PLUGIN_API_VERSION}");
    println!("  User agent: {}", default_user_agent());

    Ok(())
}

fn rustc_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
