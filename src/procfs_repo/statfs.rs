// Filesystem capacity via statvfs(3).

use nix::sys::statvfs::statvfs;

/// `(total_kb, free_kb)` for the filesystem mounted at `mount_point`.
pub(super) fn capacity_kb(mount_point: &str) -> nix::Result<(u64, u64)> {
    let st = statvfs(mount_point)?;
    let frsize = st.fragment_size() as u64;
    let total_kb = st.blocks().saturating_mul(frsize) / 1024;
    let free_kb = st.blocks_free().saturating_mul(frsize) / 1024;
    Ok((total_kb, free_kb))
}
