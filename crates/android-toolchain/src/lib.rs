//! Android toolchain checks
//!
//! Confirms the Java and Android SDK pieces a mobile automation setup needs:
//! - `JAVA_HOME` and `ANDROID_HOME` are set
//! - java, adb, android and emulator are where those homes say they are

pub mod env_check;
pub mod locator;

pub use env_check::{EnvironmentCheck, REQUIRED_VARS};
pub use locator::{BinaryLocator, ToolDescriptor, WindowsSuffix, REQUIRED_TOOLS};
