use std::sync::Mutex;

use xv11_data::Scan;

/// Double-buffered scan store. One slot is the write target mutated by the
/// decoder, the other is stable and safe for readers; `publish` swaps the
/// roles once a revolution has been written in full.
///
/// The stable index is guarded by its own mutex so an index read can never
/// observe a half-finished flip. Every acquisition is a scoped guard; there
/// is no manual unlock to bypass.
pub(crate) struct ScanBuffers {
    slots: [Mutex<Scan>; 2],
    stable: Mutex<usize>,
}

impl ScanBuffers {
    pub(crate) fn new() -> ScanBuffers {
        ScanBuffers {
            slots: [Mutex::new(Scan::new()), Mutex::new(Scan::new())],
            stable: Mutex::new(0),
        }
    }

    /// Runs `f` on the write-target slot, the one `snapshot` never returns.
    pub(crate) fn with_write_target<T>(&self, f: impl FnOnce(&mut Scan) -> T) -> T {
        let write_index = 1 - *self.stable.lock().unwrap();
        let mut slot = self.slots[write_index].lock().unwrap();
        f(&mut slot)
    }

    /// Swaps the write-target and stable roles. Called by the decoder only
    /// after a revolution has been completely written.
    pub(crate) fn publish(&self) {
        let mut stable = self.stable.lock().unwrap();
        *stable = 1 - *stable;
    }

    /// Copy of the stable buffer. The index lock is released before the
    /// slot is cloned, and the decoder never writes into the stable slot,
    /// so the clone always captures one complete revolution.
    pub(crate) fn snapshot(&self) -> Scan {
        let stable = *self.stable.lock().unwrap();
        self.slots[stable].lock().unwrap().clone()
    }
}
