//! Runtime and process counters reported under `system` in the status report.

use crate::models::{MemoryInfo, SystemInfo};
use stats_alloc::{INSTRUMENTED_SYSTEM, Stats};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// # Heap Counters
///
/// Live and cumulative heap bytes, derived from [`stats_alloc::Stats`].
///
/// The counters come from [`INSTRUMENTED_SYSTEM`], so they only move when the
/// binary installs it as its global allocator:
///
/// ```rust,ignore
/// use stats_alloc::{INSTRUMENTED_SYSTEM, StatsAlloc};
/// use std::alloc::System;
///
/// #[global_allocator]
/// static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapCounters {
    pub allocated_bytes: u64,
    pub total_allocated_bytes: u64,
}

impl From<Stats> for HeapCounters {
    fn from(stats: Stats) -> Self {
        // Growing reallocations are counted in `bytes_allocated`, shrinking
        // ones in `bytes_deallocated`.
        let total = stats.bytes_allocated as u64;
        Self {
            allocated_bytes: total.saturating_sub(stats.bytes_deallocated as u64),
            total_allocated_bytes: total,
        }
    }
}

pub fn heap_counters() -> HeapCounters {
    INSTRUMENTED_SYSTEM.stats().into()
}

/// Resident set size of this process, or 0 when it cannot be read.
pub fn resident_bytes() -> u64 {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return 0;
    };

    let mut system = sysinfo::System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );
    system.process(pid).map(|p| p.memory()).unwrap_or(0)
}

/// Whole megabytes, truncating.
pub fn to_mb(bytes: u64) -> u64 {
    bytes / BYTES_PER_MB
}

/// Alive tasks on the tokio runtime driving the caller, 1 outside of one.
///
/// actix-web runs each worker on its own current-thread runtime, so inside a
/// request handler this is the count for that worker only, not for the whole
/// process.
pub fn task_count() -> usize {
    tokio::runtime::Handle::try_current()
        .map(|handle| handle.metrics().num_alive_tasks())
        .unwrap_or(1)
}

pub fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Version of the rustc toolchain that compiled this binary, e.g. `1.85.0`.
pub fn rust_version() -> String {
    rustc_version_runtime::version().to_string()
}

pub fn memory_info() -> MemoryInfo {
    let heap = heap_counters();
    MemoryInfo {
        alloc_mb: to_mb(heap.allocated_bytes),
        total_alloc_mb: to_mb(heap.total_allocated_bytes),
        sys_mb: to_mb(resident_bytes()),
    }
}

/// Reads all counters for one report.
pub fn collect() -> SystemInfo {
    SystemInfo {
        rust_version: rust_version(),
        num_tasks: task_count(),
        num_cpu: cpu_count(),
        memory: memory_info(),
    }
}
