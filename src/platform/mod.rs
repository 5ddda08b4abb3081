// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors

#[cfg(unix)]
pub mod posix;

#[cfg(not(unix))]
compile_error!("confsync is built on POSIX threads and only supports unix targets");

// Re-export the platform-specific implementations under a uniform name.

#[cfg(unix)]
pub use posix::PlatformCondition;
#[cfg(unix)]
pub use posix::PlatformMutex;
