//! The privileged memory-read primitive and allocator query
//!
//! Everything above this seam treats process memory as an external,
//! possibly-vanishing resource: a read may fail between classification and
//! acquisition, and failure is a value, never a panic.

use crate::core::types::{Address, ScanError, ScanResult};

/// Raw access to the inspected process's memory.
///
/// Implementations must return failure values for invalid or unmapped
/// addresses, never raise.
pub trait MemoryAccess {
    /// Reads exactly `buf.len()` bytes starting at `address`.
    ///
    /// Partial reads are failures: either the whole span was readable or
    /// the call returns `ReadFailed`.
    fn read(&self, address: Address, buf: &mut [u8]) -> ScanResult<()>;

    /// Reports the allocator's block size at `address`, or 0 when the
    /// address is not the start of a live heap allocation.
    fn allocated_size_of(&self, address: Address) -> usize;

    /// Reads `len` bytes into a fresh buffer
    fn read_vec(&self, address: Address, len: usize) -> ScanResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read(address, &mut buf)?;
        Ok(buf)
    }
}

/// Reads the running process's own memory via `process_vm_readv`.
///
/// Going through the kernel instead of dereferencing raw pointers means an
/// unmapped or protected page yields `EFAULT` rather than a segfault, which
/// is what makes speculative pointer chasing viable.
#[cfg(target_os = "linux")]
pub struct ProcessMemory {
    pid: libc::pid_t,
}

#[cfg(target_os = "linux")]
impl ProcessMemory {
    /// Creates an adapter for the current process
    pub fn current() -> Self {
        // Safe: getpid never fails
        ProcessMemory {
            pid: unsafe { libc::getpid() },
        }
    }
}

#[cfg(target_os = "linux")]
impl Default for ProcessMemory {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(target_os = "linux")]
impl MemoryAccess for ProcessMemory {
    fn read(&self, address: Address, buf: &mut [u8]) -> ScanResult<()> {
        if buf.is_empty() {
            return Ok(());
        }
        if address.is_null() {
            return Err(ScanError::read_failed(address, "null address"));
        }

        let local = libc::iovec {
            iov_base: buf.as_mut_ptr() as *mut libc::c_void,
            iov_len: buf.len(),
        };
        let remote = libc::iovec {
            iov_base: address.as_usize() as *mut libc::c_void,
            iov_len: buf.len(),
        };

        let copied = unsafe { libc::process_vm_readv(self.pid, &local, 1, &remote, 1, 0) };

        if copied == buf.len() as isize {
            Ok(())
        } else if copied < 0 {
            let errno = std::io::Error::last_os_error();
            Err(ScanError::read_failed(address, errno.to_string()))
        } else {
            // The kernel stops at the first unreadable page; a short copy
            // means part of the span is unmapped.
            Err(ScanError::read_failed(
                address,
                format!("short read: {} of {} bytes", copied, buf.len()),
            ))
        }
    }

    fn allocated_size_of(&self, address: Address) -> usize {
        if address.is_null() {
            return 0;
        }
        // malloc_usable_size is only defined for pointers obtained from
        // malloc. Probe readability through the kernel first so wild
        // candidates never reach the allocator.
        let mut probe = [0u8; 1];
        if self.read(address, &mut probe).is_err() {
            return 0;
        }
        unsafe { libc::malloc_usable_size(address.as_usize() as *mut libc::c_void) }
    }
}
